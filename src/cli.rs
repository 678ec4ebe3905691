use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed task list.
/// Storage defaults to ~/.todo/todos.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "todo", version, about = "Terminal task list")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true, env = "TODO_DB")]
    pub db: Option<PathBuf>,

    /// Defaults to `ui`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
