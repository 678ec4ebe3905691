//! Rendering of the task collection into displayed rows.
//!
//! `render` is a pure function of the task list and the filter flag. It always
//! rebuilds the complete row list; hidden rows stay in the output so the row
//! order never depends on the filter.

use chrono::NaiveDate;

use crate::task::Task;

/// Text of the single row shown for an empty collection.
pub const NO_TASKS: &str = "No task found";
/// Shown in place of a missing due date.
pub const NO_DATE: &str = "No date";

/// An action control attached to a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    ToggleComplete,
    Delete,
}

impl Control {
    /// Glyph drawn for the control.
    pub fn glyph(self) -> &'static str {
        match self {
            Control::ToggleComplete => "✓",
            Control::Delete => "✗",
        }
    }
}

/// A control bound to the task it acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAction {
    pub control: Control,
    pub task_id: u64,
}

/// One displayed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: u64,
    pub text: String,
    pub date: String,
    pub status: &'static str,
    pub completed: bool,
    /// Completed while the filter is active; kept in place but not laid out.
    pub hidden: bool,
    pub actions: [RowAction; 2],
}

/// One entry of the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    Placeholder,
    Task(TaskRow),
}

impl DisplayRow {
    pub fn task_id(&self) -> Option<u64> {
        match self {
            DisplayRow::Task(row) => Some(row.id),
            DisplayRow::Placeholder => None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, DisplayRow::Task(row) if row.hidden)
    }
}

/// Build the full displayed list for `tasks` in stored order.
pub fn render(tasks: &[Task], filter_active: bool) -> Vec<DisplayRow> {
    if tasks.is_empty() {
        return vec![DisplayRow::Placeholder];
    }

    tasks
        .iter()
        .map(|task| {
            DisplayRow::Task(TaskRow {
                id: task.id,
                text: task.text.clone(),
                date: format_date(&task.date),
                status: task.status_label(),
                completed: task.completed,
                hidden: filter_active && task.completed,
                actions: [
                    RowAction { control: Control::ToggleComplete, task_id: task.id },
                    RowAction { control: Control::Delete, task_id: task.id },
                ],
            })
        })
        .collect()
}

/// Format a stored date for display as a short day/month/year string.
/// Unparseable dates are shown as entered.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return NO_DATE.to_string();
    }
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%-d/%-m/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Label of the filter toggle for the given filter value.
pub fn filter_label(filter_active: bool) -> &'static str {
    if filter_active {
        "Show All"
    } else {
        "Filter Completed"
    }
}

/// Positions of the rows that take part in layout.
pub fn visible_indices(rows: &[DisplayRow]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| !row.is_hidden())
        .map(|(i, _)| i)
        .collect()
}

/// Rows that take part in layout.
pub fn visible_rows(rows: &[DisplayRow]) -> impl Iterator<Item = &DisplayRow> {
    rows.iter().filter(|row| !row.is_hidden())
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Print the visible rows as a plain table.
pub fn print_table(rows: &[DisplayRow]) {
    println!("{:<15} {:<12} {:<8} {}", "ID", "Date", "Status", "Task");
    for row in visible_rows(rows) {
        match row {
            DisplayRow::Placeholder => println!("{NO_TASKS}"),
            DisplayRow::Task(t) => println!(
                "{:<15} {:<12} {:<8} {}",
                t.id,
                truncate(&t.date, 12),
                t.status,
                t.text
            ),
        }
    }
}
