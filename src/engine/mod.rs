// src/engine/mod.rs

//! The dependency graph engine.
//!
//! This module ties together:
//! - the cycle detector that guards every edge insertion
//! - the pure status resolver
//! - the propagation walk that re-derives downstream statuses
//!
//! The functions here are the boundary exposed to external collaborators
//! (the CLI in this crate, an HTTP layer in a larger deployment). They take
//! an explicit [`GraphStore`] so there is no hidden global graph state, and
//! each call is one logical operation against a consistent store snapshot.

pub mod cycle;
pub mod propagate;
pub mod resolve;

use tracing::{debug, warn};

use crate::errors::{GraphError, Result};
use crate::model::{DependencyEdge, Task, TaskId, TaskStatus};
use crate::store::GraphStore;

pub use cycle::would_create_cycle;
pub use propagate::propagate;
pub use resolve::resolve;

/// Create a task with default status `Pending`.
///
/// The title must be non-empty after trimming; the store assigns the id and
/// timestamps.
pub fn create_task<S: GraphStore>(
    store: &mut S,
    title: &str,
    description: Option<String>,
) -> Result<TaskId> {
    let title = title.trim();
    if title.is_empty() {
        return Err(GraphError::Validation(
            "task title must not be empty".to_string(),
        ));
    }
    let id = store.create_task(title.to_string(), description)?;
    debug!(id, title, "created task");
    Ok(id)
}

/// Update a task's title and/or description. `None` leaves a field as-is.
///
/// Status changes do not go through here; use [`set_status`] so that
/// dependents are re-derived.
pub fn update_task<S: GraphStore>(
    store: &mut S,
    id: TaskId,
    title: Option<&str>,
    description: Option<String>,
) -> Result<()> {
    let title = match title {
        Some(t) => {
            let t = t.trim();
            if t.is_empty() {
                return Err(GraphError::Validation(
                    "task title must not be empty".to_string(),
                ));
            }
            Some(t.to_string())
        }
        None => None,
    };
    store.update_details(id, title, description)
}

/// Directly set a task's status (user override) and propagate the change to
/// all dependents.
///
/// This is the `on_status_changed` trigger of the engine: any direct status
/// mutation must come through here so that downstream tasks are re-derived.
/// Overrides are last-write-wins and may set any status, including moving a
/// task out of `Completed`.
///
/// Returns the ids of all tasks whose status changed as a result, starting
/// with `id` itself (empty if the status was already equal).
pub fn set_status<S: GraphStore>(
    store: &mut S,
    id: TaskId,
    status: TaskStatus,
) -> Result<Vec<TaskId>> {
    let current = store.task(id)?.status;
    if current == status {
        debug!(id, %status, "status unchanged; nothing to propagate");
        return Ok(Vec::new());
    }

    store.set_status(id, status)?;
    debug!(id, from = %current, to = %status, "status overridden");

    let mut updated = vec![id];
    updated.extend(propagate(store, id)?);
    Ok(updated)
}

/// Validate and insert the dependency edge "`task` depends on `depends_on`".
///
/// Checks run in order: self-loop (rejected without consulting the store),
/// both endpoints exist, no duplicate, and finally the cycle detector over
/// the current edge set plus the candidate. Only then is the edge committed,
/// after which the inserting task's status is re-derived and propagated.
///
/// A rejected edge leaves the store untouched.
pub fn check_and_insert_edge<S: GraphStore>(
    store: &mut S,
    task: TaskId,
    depends_on: TaskId,
) -> Result<DependencyEdge> {
    if task == depends_on {
        return Err(GraphError::SelfDependency(task));
    }

    store.task(task)?;
    store.task(depends_on)?;

    if store.has_edge(task, depends_on) {
        return Err(GraphError::DuplicateDependency { task, depends_on });
    }

    if let Some(path) = would_create_cycle(&store.all_edges(), (task, depends_on)) {
        warn!(task, depends_on, ?path, "edge rejected: would create a cycle");
        return Err(GraphError::CyclicDependency { path });
    }

    store.add_edge(task, depends_on)?;
    debug!(task, depends_on, "dependency edge committed");

    rederive_and_propagate(store, task)?;
    Ok(DependencyEdge { task, depends_on })
}

/// Remove a dependency edge, re-deriving the dependent task's status from
/// its remaining dependencies.
///
/// Returns `true` if the edge existed. Removing an edge never leaves a stale
/// `Blocked`/`Pending` status behind: the dependent is re-resolved and the
/// change propagated, same as for an insertion.
pub fn remove_edge<S: GraphStore>(
    store: &mut S,
    task: TaskId,
    depends_on: TaskId,
) -> Result<bool> {
    let removed = store.remove_edge(task, depends_on)?;
    if removed {
        debug!(task, depends_on, "dependency edge removed");
        rederive_and_propagate(store, task)?;
    }
    Ok(removed)
}

/// Delete a task together with all incident edges.
///
/// Every former dependent is re-derived afterwards, so deleting a blocked
/// dependency unblocks its dependents in the same operation.
pub fn remove_task<S: GraphStore>(store: &mut S, id: TaskId) -> Result<Task> {
    let dependents = store.dependents_of(id);
    let task = store.remove_task(id)?;
    debug!(id, dependents = dependents.len(), "task removed");

    for dependent in dependents {
        rederive_and_propagate(store, dependent)?;
    }
    Ok(task)
}

/// Re-derive one task's status after its edge set changed and, when it
/// differs, persist it and propagate downstream.
///
/// `Completed` tasks are left alone: that state is terminal with respect to
/// derivation and only an explicit [`set_status`] can move it. A task whose
/// last dependency was just removed falls back to `Pending`; keeping the
/// previously derived `Blocked`/`InProgress` would be inconsistent with the
/// remaining (empty) edge set.
fn rederive_and_propagate<S: GraphStore>(store: &mut S, id: TaskId) -> Result<Vec<TaskId>> {
    let current = store.task(id)?.status;
    if current == TaskStatus::Completed {
        return Ok(Vec::new());
    }

    let dep_statuses = propagate::dependency_statuses(store, id)?;
    let next = if dep_statuses.is_empty() {
        TaskStatus::Pending
    } else {
        resolve(current, &dep_statuses)
    };
    if next == current {
        return Ok(Vec::new());
    }

    store.set_status(id, next)?;
    debug!(id, from = %current, to = %next, "status re-derived");

    let mut updated = vec![id];
    updated.extend(propagate(store, id)?);
    Ok(updated)
}
