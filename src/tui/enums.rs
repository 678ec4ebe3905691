//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    TaskList,
    AddTask,
    Help,
}

/// Kind of modal dialog.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DialogKind {
    Alert,
    Confirm,
}
