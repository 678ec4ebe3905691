//! Task data structure.
//!
//! This module defines the `Task` struct that represents a single to-do entry.
//! The serialized shape is shared with the durable store: `id`, `text`, `date`
//! and `completed`, in that order.

use serde::{Deserialize, Serialize};

/// A single to-do entry with a due date and completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    /// Due date, `YYYY-MM-DD` when entered through the date parser.
    pub date: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a pending task.
    pub fn new(id: u64, text: impl Into<String>, date: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            date: date.into(),
            completed: false,
        }
    }

    /// Human-readable status label.
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Done"
        } else {
            "Pending"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_browser_shape() {
        let raw = r#"{"id":1704067200000,"text":"Buy milk","date":"2024-01-01","completed":true}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id, 1_704_067_200_000);
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.date, "2024-01-01");
        assert!(task.completed);
        assert_eq!(task.status_label(), "Done");
    }

    #[test]
    fn test_missing_completed_defaults_to_pending() {
        let raw = r#"{"id":7,"text":"Walk","date":"2024-02-02"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert!(!task.completed);
        assert_eq!(task.status_label(), "Pending");
    }
}
