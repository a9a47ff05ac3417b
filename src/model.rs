// src/model.rs

//! Core data model: tasks, statuses and dependency edges.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a task. Assigned by the store on creation, immutable afterwards.
pub type TaskId = u64;

/// Status of a task.
///
/// `Pending`, `InProgress` and `Blocked` are normally *derived* from the
/// statuses of the task's direct dependencies (see [`crate::engine::resolve`]).
/// `Completed` is only ever set by an explicit user action and is never
/// overwritten by derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        };
        f.write_str(s)
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" | "in-progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            other => Err(format!(
                "invalid status: {other} (expected \"pending\", \"in_progress\", \"completed\" or \"blocked\")"
            )),
        }
    }
}

/// A unit of work with a derived or user-set status.
///
/// `created_at` / `updated_at` are maintained by the store: set on creation,
/// and `updated_at` is bumped on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,

    /// Non-empty title; validated at the engine boundary.
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Directed edge "`task` depends on `depends_on`": the task must wait for
/// its target.
///
/// Identified by the `(task, depends_on)` pair. Duplicates and self-loops
/// never reach the store; they are rejected on the validated insertion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub task: TaskId,
    pub depends_on: TaskId,
}
