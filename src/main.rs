//! # todo - a terminal task list
//!
//! A small task list manager with a scriptable CLI and an interactive
//! terminal user interface (TUI) over the same file-backed store.
//!
//! ## Key Features
//!
//! - **Tasks with due dates**: every task has text, a due date and a done flag
//! - **Newest first**: new tasks go to the top of the list
//! - **Hide completed**: a filter toggle that hides done tasks without losing their place
//! - **Write-through storage**: every change is saved to a JSON file immediately
//! - **Two interfaces**: one-shot CLI commands for scripting, a TUI for day-to-day use
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! todo
//!
//! # Add a task via CLI
//! todo add "Buy milk" --date tomorrow
//!
//! # List tasks, hiding the completed ones
//! todo list --hide-completed
//!
//! # Mark a task done, then remove it
//! todo toggle 1704067200000
//! todo delete 1704067200000
//! ```
//!
//! Data is stored locally in `~/.todo/todos.json`; logs go to `~/.todo/todo.log`
//! when the TUI is running and to stderr otherwise (`RUST_LOG` sets the level).

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod controller;
pub mod due;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;
pub mod storage;
pub mod store;
pub mod task;
pub mod task_form;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod dialog;
    pub mod enums;
    pub mod run;
    pub mod utils;
    pub mod view;
}

use cli::Cli;
use cmd::*;
use logging::{init_logging, LogTarget};
use storage::JsonFileStorage;
use store::TaskStore;

fn main() {
    let cli = Cli::parse();

    // Determine the data directory
    let data_dir = if let Some(db_path) = cli.db.as_ref() {
        db_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf()
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_dir = PathBuf::from(home).join(".todo");
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
            std::process::exit(1);
        }
        data_dir
    };

    let storage = match cli.db {
        Some(path) => JsonFileStorage::new(path),
        None => JsonFileStorage::in_dir(&data_dir),
    };

    let command = cli.command.unwrap_or(Commands::Ui);

    // The TUI owns the terminal, so its logs go to a file
    match command {
        Commands::Ui => init_logging(LogTarget::File(data_dir.join("todo.log"))),
        _ => init_logging(LogTarget::Stderr),
    }

    match command {
        Commands::Ui => cmd_ui(storage),
        Commands::Completions { shell } => cmd_completions(shell),
        command => {
            let mut store = TaskStore::open(storage);
            match command {
                Commands::Add { text, date } => cmd_add(&mut store, text, date),
                Commands::List { hide_completed } => cmd_list(&mut store, hide_completed),
                Commands::Toggle { id } => cmd_toggle(&mut store, id),
                Commands::Delete { id } => cmd_delete(&mut store, id),
                Commands::Clear { yes } => cmd_clear(&mut store, yes),
                Commands::Ui | Commands::Completions { .. } => unreachable!("handled above"),
            }
        }
    }
}
