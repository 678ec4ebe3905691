//! Drawing of the task list screen and its popups.
//!
//! Everything here draws from plain data so a snapshot of the screen can be
//! redrawn underneath a modal dialog while the store is busy.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, HighlightSpacing, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::render::{filter_label, visible_rows, Control, DisplayRow, NO_TASKS};
use crate::input::InputField;
use crate::store::Counts;
use crate::task_form::TaskForm;
use crate::tui::{
    colors::{AMBER, DARK_BLUE, DARK_RED, GOLD, GREEN, INK},
    enums::DialogKind,
    utils::centered_rect,
};

/// Width of the highlight symbol column in front of every row.
pub const HIGHLIGHT_WIDTH: u16 = 3;
/// Width of the actions column, `[✓] [✗]`.
pub const ACTIONS_WIDTH: u16 = 7;

/// Everything needed to draw the main screen.
pub struct ScreenView<'a> {
    pub rows: &'a [DisplayRow],
    pub filter_active: bool,
    pub counts: Counts,
    pub form: &'a TaskForm,
    pub editing: bool,
    pub status: &'a str,
    pub table_state: &'a mut TableState,
}

/// An owned copy of the screen, drawn behind modal dialogs.
pub struct Backdrop {
    pub rows: Vec<DisplayRow>,
    pub filter_active: bool,
    pub counts: Counts,
    pub form: TaskForm,
    pub editing: bool,
    pub table_state: TableState,
}

impl Backdrop {
    pub fn view(&mut self) -> ScreenView<'_> {
        ScreenView {
            rows: &self.rows,
            filter_active: self.filter_active,
            counts: self.counts,
            form: &self.form,
            editing: self.editing,
            status: "",
            table_state: &mut self.table_state,
        }
    }
}

/// Column that a mouse x position falls in, relative to the table's inner
/// left edge.
pub fn control_at(offset_x: u16) -> Option<Control> {
    let x = offset_x.checked_sub(HIGHLIGHT_WIDTH)?;
    match x {
        0..=2 => Some(Control::ToggleComplete),
        4..=6 => Some(Control::Delete),
        _ => None,
    }
}

/// Draw the full screen. Returns the area of the task table.
pub fn draw_screen(f: &mut Frame, view: ScreenView<'_>) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // form
            Constraint::Min(0),    // table
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    draw_header(f, chunks[0], view.filter_active, view.counts);
    draw_form(f, chunks[1], view.form, view.editing);
    draw_table(f, chunks[2], view.rows, view.table_state);
    draw_status_bar(f, chunks[3], view.status, view.editing);
    chunks[2]
}

fn draw_header(f: &mut Frame, area: Rect, filter_active: bool, counts: Counts) {
    let filter_style = if filter_active {
        Style::default().fg(INK).bg(GREEN)
    } else {
        Style::default().fg(INK).bg(AMBER)
    };
    let line = Line::from(vec![
        Span::styled("TO-DO LIST", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} tasks, {} done, {} pending",
                counts.total, counts.completed, counts.pending
            ),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ),
        Span::raw("   "),
        Span::styled(format!(" [f] {} ", filter_label(filter_active)), filter_style),
        Span::raw(" "),
        Span::styled(" [D] Delete All ", Style::default().fg(Color::White).bg(DARK_RED)),
    ]);
    let header = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn field_spans<'a>(label: &'a str, field: &'a InputField, editing: bool) -> Vec<Span<'a>> {
    let style = if editing && field.active {
        Style::default().fg(INK).bg(GOLD)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };
    vec![
        Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {} ", field.value), style),
    ]
}

fn draw_form(f: &mut Frame, area: Rect, form: &TaskForm, editing: bool) {
    const TEXT_LABEL: &str = "Task:";
    const DATE_LABEL: &str = "   Due:";

    let mut spans = field_spans(TEXT_LABEL, &form.text, editing);
    spans.extend(field_spans(DATE_LABEL, &form.date, editing));
    let title = if editing {
        "Add Task - Tab to switch, Enter to add, Esc to close"
    } else {
        "Add Task - press 'a'"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if editing {
        // Cursor sits one cell after the label and the padding space.
        let text_start = area.x.saturating_add(cells(TEXT_LABEL.len()).saturating_add(2));
        let x = if form.date.active {
            text_start
                .saturating_add(cells(form.text.value.chars().count()))
                .saturating_add(cells(DATE_LABEL.len()).saturating_add(2))
                .saturating_add(cells(form.date.cursor))
        } else {
            text_start.saturating_add(cells(form.text.cursor))
        };
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn draw_table(f: &mut Frame, area: Rect, rows: &[DisplayRow], table_state: &mut TableState) {
    let header = Row::new(["Actions", "Task", "Date", "Status"].map(|h| {
        Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(GOLD).fg(INK))
    .height(1);

    let body: Vec<Row> = visible_rows(rows)
        .map(|row| match row {
            DisplayRow::Placeholder => Row::new(vec![
                Cell::from(""),
                Cell::from(NO_TASKS),
                Cell::from(""),
                Cell::from(""),
            ])
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)),
            DisplayRow::Task(t) => {
                let actions = format!(
                    "[{}] [{}]",
                    t.actions[0].control.glyph(),
                    t.actions[1].control.glyph()
                );
                let (style, status_style) = if t.completed {
                    (
                        Style::default().fg(Color::DarkGray),
                        Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
                    )
                } else {
                    (Style::default().fg(Color::White), Style::default().fg(AMBER))
                };
                Row::new(vec![
                    Cell::from(actions),
                    Cell::from(t.text.clone()),
                    Cell::from(t.date.clone()),
                    Cell::from(t.status).style(status_style),
                ])
                .style(style)
            }
        })
        .collect();

    let widths = [
        Constraint::Length(ACTIONS_WIDTH),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(8),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Tasks - Press 'h' for help"))
        .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
        .highlight_symbol(">> ")
        .highlight_spacing(HighlightSpacing::Always);

    f.render_stateful_widget(table, area, table_state);
}

fn draw_status_bar(f: &mut Frame, area: Rect, status: &str, editing: bool) {
    let text = if !status.is_empty() {
        status.to_string()
    } else if editing {
        "Add New Task".to_string()
    } else {
        "a add | c toggle | d delete | f filter | D delete all | h help | q quit".to_string()
    };
    let bar = Paragraph::new(text)
        .style(Style::default().bg(GOLD).fg(INK))
        .alignment(Alignment::Left);
    f.render_widget(bar, area);
}

/// Draw a modal alert or confirmation.
pub fn draw_dialog(f: &mut Frame, area: Rect, kind: DialogKind, message: &str) {
    let (title, bg, hint) = match kind {
        DialogKind::Alert => ("Notice", DARK_BLUE, "Press Enter to continue"),
        DialogKind::Confirm => ("Confirm Action", DARK_RED, "Press 'y' to confirm, 'n' to cancel"),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().bg(bg));

    let area = centered_rect(50, 20, area);
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(hint),
    ];
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Draw the key reference popup.
pub fn draw_help(f: &mut Frame, area: Rect) {
    let area = centered_rect(60, 60, area);
    f.render_widget(Clear, area);

    let keys = [
        ("a", "Add a task"),
        ("c / Space", "Toggle done on the selected task"),
        ("d / Del", "Delete the selected task"),
        ("f", "Hide or show completed tasks"),
        ("D", "Delete all tasks"),
        ("Up / Down", "Move selection"),
        ("Mouse", "Click [✓] or [✗] on a row"),
        ("q / Esc", "Quit"),
    ];
    let mut text = vec![Line::from("")];
    for (key, what) in keys {
        text.push(Line::from(vec![
            Span::styled(format!("{key:>10}  "), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(what),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from("Press any key to return"));

    let paragraph = Paragraph::new(text).block(Block::default().title("Help").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_hit_areas() {
        assert_eq!(control_at(0), None);
        assert_eq!(control_at(HIGHLIGHT_WIDTH), Some(Control::ToggleComplete));
        assert_eq!(control_at(HIGHLIGHT_WIDTH + 2), Some(Control::ToggleComplete));
        assert_eq!(control_at(HIGHLIGHT_WIDTH + 3), None);
        assert_eq!(control_at(HIGHLIGHT_WIDTH + 4), Some(Control::Delete));
        assert_eq!(control_at(HIGHLIGHT_WIDTH + 6), Some(Control::Delete));
        assert_eq!(control_at(HIGHLIGHT_WIDTH + 7), None);
    }

    #[test]
    fn test_long_form_values_keep_cursor_on_screen() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut form = TaskForm::with_values(&"x".repeat(70_000), "tomorrow");
        form.next_field();
        let rows = [DisplayRow::Placeholder];
        let mut table_state = TableState::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|f| {
                draw_screen(
                    f,
                    ScreenView {
                        rows: &rows,
                        filter_active: false,
                        counts: Counts::default(),
                        form: &form,
                        editing: true,
                        status: "",
                        table_state: &mut table_state,
                    },
                );
            })
            .unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 60);
        assert_eq!(cursor.y, 4);
    }
}
