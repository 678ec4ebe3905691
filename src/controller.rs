//! Gesture handlers that drive the task store.
//!
//! Each handler is synchronous: it validates the gesture, calls into the
//! store, and only returns once the store has persisted and re-rendered.
//! Blocking dialogs are supplied by the caller through [`Dialogs`].

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::due::normalise_date_input;
use crate::error::TodoError;
use crate::render::{filter_label, Control, DisplayRow};
use crate::storage::TaskStorage;
use crate::store::TaskStore;
use crate::task::Task;
use crate::task_form::TaskForm;

pub const EMPTY_FIELDS_ALERT: &str = "Task text and date must not be empty!";
pub const DELETE_ALL_PROMPT: &str = "Are you sure you want to delete ALL tasks?";

/// Modal dialogs shown to the user.
pub trait Dialogs {
    /// Show a message and wait until it is acknowledged.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
}

/// A gesture on the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListGesture {
    /// Index into the store's displayed rows, `None` when the gesture hit no row.
    pub row: Option<usize>,
    /// The control under the gesture, `None` for the row body.
    pub control: Option<Control>,
}

/// Add a task from the form. The form is cleared once the task exists and
/// left as typed when the task is rejected.
///
/// Returns `Ok(None)` after a validation alert. A save failure is returned
/// as an error; the task is still in the store's list.
pub fn submit<S: TaskStorage>(
    store: &mut TaskStore<S>,
    form: &mut TaskForm,
    dialogs: &mut dyn Dialogs,
) -> Result<Option<Task>, TodoError> {
    let date = normalise_date_input(&form.date.value);
    match store.add_task(&form.text.value, &date) {
        Ok(task) => {
            form.clear();
            Ok(Some(task))
        }
        Err(TodoError::Validation(e)) => {
            debug!("rejected task: {e}");
            dialogs.alert(EMPTY_FIELDS_ALERT);
            Ok(None)
        }
        Err(e) => {
            form.clear();
            Err(e)
        }
    }
}

/// Apply a row control. Gestures outside a task row do nothing.
pub fn handle_list_gesture<S: TaskStorage>(
    store: &mut TaskStore<S>,
    gesture: ListGesture,
) -> Result<(), TodoError> {
    let Some(id) = gesture
        .row
        .and_then(|i| store.rows().get(i))
        .and_then(DisplayRow::task_id)
    else {
        return Ok(());
    };

    match gesture.control {
        Some(Control::Delete) => store.delete_task(id),
        Some(Control::ToggleComplete) => match store.toggle_complete(id) {
            Ok(_) => Ok(()),
            Err(TodoError::NotFound(id)) => {
                debug!(id, "toggle on a row with no task");
                Ok(())
            }
            Err(e) => Err(e),
        },
        None => Ok(()),
    }
}

/// Flip the filter and return the label the toggle should now show.
pub fn toggle_filter<S: TaskStorage>(store: &mut TaskStore<S>) -> &'static str {
    filter_label(store.toggle_filter())
}

/// Clear the list after the user confirms. Returns whether it was cleared.
pub fn delete_all<S: TaskStorage>(
    store: &mut TaskStore<S>,
    dialogs: &mut dyn Dialogs,
) -> Result<bool, TodoError> {
    if !dialogs.confirm(DELETE_ALL_PROMPT) {
        return Ok(false);
    }
    store.delete_all()?;
    Ok(true)
}

/// Dialogs on the terminal's standard streams.
pub struct StdioDialogs;

impl Dialogs for StdioDialogs {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Confirms everything; alerts go to stderr.
pub struct AssumeYes;

impl Dialogs for AssumeYes {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::visible_rows;
    use crate::storage::MemoryStorage;

    #[derive(Default)]
    struct Scripted {
        answer: bool,
        alerts: Vec<String>,
        prompts: Vec<String>,
    }

    impl Dialogs for Scripted {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn confirm(&mut self, message: &str) -> bool {
            self.prompts.push(message.to_string());
            self.answer
        }
    }

    fn store() -> TaskStore<MemoryStorage> {
        TaskStore::open(MemoryStorage::new())
    }

    fn gesture(row: usize, control: Control) -> ListGesture {
        ListGesture { row: Some(row), control: Some(control) }
    }

    #[test]
    fn test_submit_clears_form() {
        let mut store = store();
        let mut dialogs = Scripted::default();
        let mut form = TaskForm::with_values("Buy milk", "2024-01-01");

        let task = submit(&mut store, &mut form, &mut dialogs).unwrap().unwrap();
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.date, "2024-01-01");
        assert!(form.text.value.is_empty());
        assert!(form.date.value.is_empty());
        assert!(dialogs.alerts.is_empty());
    }

    #[test]
    fn test_submit_normalises_date() {
        let mut store = store();
        let mut form = TaskForm::with_values("Call mum", "today");
        let task = submit(&mut store, &mut form, &mut Scripted::default()).unwrap().unwrap();
        assert_eq!(task.date.len(), "2024-01-01".len());
        assert!(chrono::NaiveDate::parse_from_str(&task.date, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_submit_invalid_alerts_and_keeps_form() {
        let mut store = store();
        let mut dialogs = Scripted::default();
        let mut form = TaskForm::with_values("   ", "2024-01-01");

        assert!(submit(&mut store, &mut form, &mut dialogs).unwrap().is_none());
        assert_eq!(dialogs.alerts, vec![EMPTY_FIELDS_ALERT.to_string()]);
        assert_eq!(form.text.value, "   ");
        assert_eq!(form.date.value, "2024-01-01");
        assert!(store.is_empty());

        let mut form = TaskForm::with_values("Buy milk", "");
        assert!(submit(&mut store, &mut form, &mut dialogs).unwrap().is_none());
        assert_eq!(form.text.value, "Buy milk");
        assert_eq!(dialogs.alerts.len(), 2);
    }

    #[test]
    fn test_row_gestures() {
        let mut store = store();
        let a = store.add_task("a", "2024-01-01").unwrap();
        let b = store.add_task("b", "2024-01-01").unwrap();

        // Row 0 is the newest task.
        handle_list_gesture(&mut store, gesture(0, Control::ToggleComplete)).unwrap();
        assert!(store.get(b.id).unwrap().completed);

        handle_list_gesture(&mut store, gesture(1, Control::Delete)).unwrap();
        assert!(store.get(a.id).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_gesture_outside_rows_is_noop() {
        let mut store = store();
        store.add_task("a", "2024-01-01").unwrap();
        let before = store.tasks().to_vec();

        handle_list_gesture(&mut store, ListGesture { row: None, control: Some(Control::Delete) }).unwrap();
        handle_list_gesture(&mut store, gesture(7, Control::Delete)).unwrap();
        handle_list_gesture(&mut store, ListGesture { row: Some(0), control: None }).unwrap();
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn test_gesture_on_placeholder_is_noop() {
        let mut store = store();
        assert_eq!(store.rows(), &[DisplayRow::Placeholder]);
        handle_list_gesture(&mut store, gesture(0, Control::ToggleComplete)).unwrap();
        handle_list_gesture(&mut store, gesture(0, Control::Delete)).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_filter_label_follows_value() {
        let mut store = store();
        assert_eq!(toggle_filter(&mut store), "Show All");
        assert_eq!(toggle_filter(&mut store), "Filter Completed");
    }

    #[test]
    fn test_delete_all_requires_confirmation() {
        let mut store = store();
        store.add_task("a", "2024-01-01").unwrap();

        let mut declined = Scripted::default();
        assert!(!delete_all(&mut store, &mut declined).unwrap());
        assert_eq!(declined.prompts, vec![DELETE_ALL_PROMPT.to_string()]);
        assert_eq!(store.len(), 1);

        let mut accepted = Scripted { answer: true, ..Default::default() };
        assert!(delete_all(&mut store, &mut accepted).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_buy_milk_through_gestures() {
        let mut store = store();
        let mut dialogs = Scripted { answer: true, ..Default::default() };
        let mut form = TaskForm::with_values("Buy milk", "2024-01-01");
        submit(&mut store, &mut form, &mut dialogs).unwrap().unwrap();

        handle_list_gesture(&mut store, gesture(0, Control::ToggleComplete)).unwrap();
        assert!(store.tasks()[0].completed);

        assert_eq!(toggle_filter(&mut store), "Show All");
        assert_eq!(visible_rows(store.rows()).count(), 0);

        assert_eq!(toggle_filter(&mut store), "Filter Completed");
        let visible: Vec<_> = visible_rows(store.rows()).collect();
        assert!(matches!(visible.as_slice(), [DisplayRow::Task(row)] if row.status == "Done"));

        assert!(delete_all(&mut store, &mut dialogs).unwrap());
        assert_eq!(store.rows(), &[DisplayRow::Placeholder]);
    }
}
