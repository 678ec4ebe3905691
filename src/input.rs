//! Single-line text input with a character cursor.

/// A text input field with cursor position and active state management.
///
/// The cursor counts characters, not bytes.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let idx = self.byte_index(self.cursor - 1);
            self.value.remove(idx);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_at_cursor() {
        let mut field = InputField::with_value("milk");
        field.move_cursor_left();
        field.move_cursor_left();
        field.handle_char('X');
        assert_eq!(field.value, "miXlk");
        field.handle_backspace();
        field.handle_delete();
        assert_eq!(field.value, "mik");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn test_multibyte_text() {
        let mut field = InputField::new();
        for c in "café ☕".chars() {
            field.handle_char(c);
        }
        field.handle_backspace();
        field.move_cursor_left();
        field.handle_char('!');
        assert_eq!(field.value, "café! ");
        field.move_cursor_right();
        field.move_cursor_right();
        assert_eq!(field.cursor, 6);
    }

    #[test]
    fn test_clear() {
        let mut field = InputField::with_value("abc");
        field.clear();
        assert!(field.value.is_empty());
        assert_eq!(field.cursor, 0);
    }
}
