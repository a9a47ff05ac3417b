// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::model::{TaskId, TaskStatus};

/// Command-line arguments for `taskdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskdag",
    version,
    about = "Track tasks and their dependencies in an acyclic graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the graph file (JSON).
    ///
    /// Default: `Taskdag.json` in the current working directory. The file is
    /// created on the first mutating command.
    #[arg(long, value_name = "PATH", default_value = "Taskdag.json")]
    pub file: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a task. New tasks start as `pending`.
    Add {
        title: String,

        #[arg(long, value_name = "TEXT")]
        description: Option<String>,
    },

    /// List all tasks with their statuses.
    List,

    /// Show one task with its dependencies and dependents.
    Show { id: TaskId },

    /// Edit a task's title or description.
    Edit {
        id: TaskId,

        #[arg(long, value_name = "TEXT")]
        title: Option<String>,

        #[arg(long, value_name = "TEXT")]
        description: Option<String>,
    },

    /// Set a task's status directly; dependents are re-derived.
    ///
    /// This is the manual override path: it may also move a task out of
    /// `completed`, which automatic derivation never does.
    Status { id: TaskId, status: TaskStatus },

    /// Delete a task and every edge touching it.
    Rm { id: TaskId },

    /// Manage dependency edges.
    #[command(subcommand)]
    Dep(DepCommand),

    /// Print the graph as JSON (`{nodes, edges}`) for visualization.
    Graph,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DepCommand {
    /// Record that `task` depends on `depends_on`.
    ///
    /// Rejected if it duplicates an existing edge, is a self-loop, or would
    /// create a cycle (the offending cycle path is reported).
    Add { task: TaskId, depends_on: TaskId },

    /// Remove a dependency edge; the dependent's status is re-derived.
    Rm { task: TaskId, depends_on: TaskId },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
