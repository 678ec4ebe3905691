//! Command implementations for the CLI interface.
//!
//! Every handler works on an explicitly opened `TaskStore` and routes its
//! gesture through the controller, so the CLI and the TUI share validation,
//! confirmation and persistence.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::controller::{self, AssumeYes, Dialogs, StdioDialogs};
use crate::error::TodoError;
use crate::render::{filter_label, print_table};
use crate::storage::TaskStorage;
use crate::store::TaskStore;
use crate::tui::run::run_tui;
use crate::task_form::TaskForm;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Add a new task.
    Add {
        /// What needs doing.
        text: String,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "friday" or "in Nd".
        #[arg(long, short)]
        date: String,
    },

    /// List tasks, newest first.
    List {
        /// Hide completed tasks.
        #[arg(long)]
        hide_completed: bool,
    },

    /// Flip a task between pending and done.
    Toggle {
        /// Task ID.
        id: u64,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID.
        id: u64,
    },

    /// Delete all tasks.
    Clear {
        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

/// Launch the terminal user interface.
pub fn cmd_ui<S: TaskStorage>(storage: S) {
    if let Err(e) = run_tui(storage) {
        fail(format!("UI error: {e}"));
    }
}

/// Add a new task.
pub fn cmd_add<S: TaskStorage>(store: &mut TaskStore<S>, text: String, date: String) {
    let mut form = TaskForm::with_values(&text, &date);
    match controller::submit(store, &mut form, &mut StdioDialogs) {
        Ok(Some(task)) => println!("Added task {}", task.id),
        Ok(None) => std::process::exit(1),
        Err(e) => fail(e),
    }
}

/// Print the task table.
pub fn cmd_list<S: TaskStorage>(store: &mut TaskStore<S>, hide_completed: bool) {
    if hide_completed {
        controller::toggle_filter(store);
    }
    print_table(store.rows());
    let counts = store.counts();
    println!();
    println!(
        "{} tasks, {} done, {} pending ({})",
        counts.total,
        counts.completed,
        counts.pending,
        if store.filter_active() { "completed hidden" } else { "showing all" }
    );
    println!("Toggle with --hide-completed: {}", filter_label(store.filter_active()));
}

/// Flip a task's completion flag.
pub fn cmd_toggle<S: TaskStorage>(store: &mut TaskStore<S>, id: u64) {
    match store.toggle_complete(id) {
        Ok(true) => println!("Task {id} marked done"),
        Ok(false) => println!("Task {id} marked pending"),
        Err(TodoError::NotFound(id)) => fail(format!("Task {id} not found.")),
        Err(e) => fail(e),
    }
}

/// Delete a task. Unknown ids are reported but not an error.
pub fn cmd_delete<S: TaskStorage>(store: &mut TaskStore<S>, id: u64) {
    let existed = store.get(id).is_some();
    if let Err(e) = store.delete_task(id) {
        fail(e);
    }
    if existed {
        println!("Deleted {id}");
    } else {
        println!("No task {id}; nothing deleted");
    }
}

/// Delete every task after confirmation.
pub fn cmd_clear<S: TaskStorage>(store: &mut TaskStore<S>, yes: bool) {
    let mut dialogs: Box<dyn Dialogs> = if yes { Box::new(AssumeYes) } else { Box::new(StdioDialogs) };
    match controller::delete_all(store, dialogs.as_mut()) {
        Ok(true) => println!("Deleted all tasks."),
        Ok(false) => println!("Cancelled."),
        Err(e) => fail(e),
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
