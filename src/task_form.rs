//! The add-task form: a text field and a due date field.

use crate::input::InputField;

pub const TEXT_FIELD: usize = 0;
pub const DATE_FIELD: usize = 1;
const FIELD_COUNT: usize = 2;

/// Form state shared by the TUI and the CLI `add` command.
#[derive(Clone, Debug)]
pub struct TaskForm {
    pub text: InputField,
    pub date: InputField,
    pub current_field: usize,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskForm {
    /// Create an empty form with the text field focused.
    pub fn new() -> Self {
        let mut form = Self {
            text: InputField::new(),
            date: InputField::new(),
            current_field: TEXT_FIELD,
        };
        form.update_active_field();
        form
    }

    /// Create a form pre-filled with values.
    pub fn with_values(text: &str, date: &str) -> Self {
        let mut form = Self {
            text: InputField::with_value(text),
            date: InputField::with_value(date),
            current_field: TEXT_FIELD,
        };
        form.update_active_field();
        form
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Sync the `active` flags with `current_field`.
    pub fn update_active_field(&mut self) {
        self.text.active = self.current_field == TEXT_FIELD;
        self.date.active = self.current_field == DATE_FIELD;
    }

    pub fn current_input_mut(&mut self) -> &mut InputField {
        match self.current_field {
            DATE_FIELD => &mut self.date,
            _ => &mut self.text,
        }
    }

    /// Empty both fields and focus the text field.
    pub fn clear(&mut self) {
        self.text.clear();
        self.date.clear();
        self.current_field = TEXT_FIELD;
        self.update_active_field();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycling() {
        let mut form = TaskForm::new();
        assert!(form.text.active && !form.date.active);
        form.next_field();
        assert!(form.date.active && !form.text.active);
        form.next_field();
        assert_eq!(form.current_field, TEXT_FIELD);
        form.prev_field();
        assert_eq!(form.current_field, DATE_FIELD);
    }

    #[test]
    fn test_typing_goes_to_current_field() {
        let mut form = TaskForm::new();
        form.current_input_mut().handle_char('a');
        form.next_field();
        form.current_input_mut().handle_char('b');
        assert_eq!(form.text.value, "a");
        assert_eq!(form.date.value, "b");
        form.clear();
        assert!(form.text.value.is_empty() && form.date.value.is_empty());
    }
}
