// src/errors.rs

//! Structured error taxonomy for the graph engine.
//!
//! Every variant is a recoverable, user-facing condition: a rejected edge
//! leaves the store untouched, and the caller gets enough detail to act on
//! the failure (notably the cycle path for [`GraphError::CyclicDependency`]).
//!
//! The CLI layer wraps these in `anyhow` with extra context; the engine
//! itself only ever returns `GraphError`.

use thiserror::Error;

use crate::model::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A task cannot depend on itself. Checked before the cycle detector
    /// runs; a self-loop is just a degenerate one-node cycle.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),

    #[error("dependency {task} -> {depends_on} already exists")]
    DuplicateDependency { task: TaskId, depends_on: TaskId },

    /// Inserting the edge would make the graph cyclic. Carries the cycle
    /// path that would be formed, closed on the repeated node
    /// (e.g. `[1, 2, 3, 1]`).
    #[error("circular dependency detected: {}", fmt_cycle(.path))]
    CyclicDependency { path: Vec<TaskId> },

    #[error("task {0} not found")]
    NotFound(TaskId),

    /// Malformed input, e.g. an empty task title.
    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;

fn fmt_cycle(path: &[TaskId]) -> String {
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
