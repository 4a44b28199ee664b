use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Migrate the content export into the backend.
    Migrate(MigrateArgs),
    /// Check configuration and backend connectivity without writing anything.
    Check,
    /// Print the JSON Schema of a source export record.
    Schema,
}

#[derive(Clone, Debug, Default, Args)]
pub struct MigrateArgs {
    /// Only migrate the project with this id (repeatable)
    #[arg(long = "only", value_name = "SLUG")]
    pub only: Vec<String>,

    /// Stop after the first failed project
    #[arg(long)]
    pub fail_fast: bool,

    /// Path to the JSON export (overrides source.content_file)
    #[arg(long, value_name = "PATH")]
    pub content_file: Option<PathBuf>,

    /// Media root directory (overrides source.media_dir)
    #[arg(long, value_name = "PATH")]
    pub media_dir: Option<PathBuf>,
}
