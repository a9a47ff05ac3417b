// src/engine/resolve.rs

//! The status resolver: derive a task's status from its direct dependencies.

use crate::model::TaskStatus;

/// Compute a task's status from its current status and the statuses of its
/// direct dependencies.
///
/// Rules, evaluated in order:
/// 1. A `Completed` task is never changed by derivation.
/// 2. No dependencies: the current status stands (nothing to derive from).
/// 3. Any dependency `Blocked` -> `Blocked`.
/// 4. All dependencies `Completed` -> `InProgress`.
/// 5. Otherwise -> `Pending`.
///
/// Pure function: no store access, no side effects, same inputs always give
/// the same output.
pub fn resolve(current: TaskStatus, dependencies: &[TaskStatus]) -> TaskStatus {
    if current == TaskStatus::Completed {
        return TaskStatus::Completed;
    }
    if dependencies.is_empty() {
        return current;
    }
    if dependencies.iter().any(|s| *s == TaskStatus::Blocked) {
        return TaskStatus::Blocked;
    }
    if dependencies.iter().all(|s| *s == TaskStatus::Completed) {
        return TaskStatus::InProgress;
    }
    TaskStatus::Pending
}
