// src/store/mod.rs

//! Graph storage: the store abstraction plus the bundled backends.
//!
//! - [`GraphStore`] is the read/write contract the engine operates against.
//! - [`memory`] holds the in-memory implementation.
//! - [`file`] loads and saves a whole graph as a JSON document, with
//!   validation of the structural invariants on load.

pub mod file;
pub mod memory;

pub use file::{load_and_validate, load_from_path, load_or_default, save_to_path, GraphFile};
pub use memory::InMemoryStore;

use crate::errors::Result;
use crate::model::{Task, TaskId, TaskStatus};

/// Read/write abstraction over the task graph.
///
/// The engine takes a `&mut` store per logical operation, so every call in
/// one operation sees the same consistent snapshot: there is no visibility
/// of a partially committed edge and no race between the cycle check and
/// the commit. A backend that serves concurrent callers must serialize
/// operations touching the same nodes (e.g. with transaction locking) to
/// keep that property.
pub trait GraphStore {
    /// Look up a task by id.
    fn task(&self, id: TaskId) -> Result<&Task>;

    /// All tasks, ascending by id.
    fn tasks(&self) -> Vec<&Task>;

    /// Create a task with status `Pending`, assigning its id and timestamps.
    fn create_task(&mut self, title: String, description: Option<String>) -> Result<TaskId>;

    /// Update title and/or description; `None` leaves the field unchanged.
    /// Bumps `updated_at`.
    fn update_details(
        &mut self,
        id: TaskId,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<()>;

    /// Persist a new status for a task, bumping `updated_at`.
    fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<()>;

    /// Remove a task and all edges incident to it. Returns the removed task.
    fn remove_task(&mut self, id: TaskId) -> Result<Task>;

    /// All edges as `(task, depends_on)` pairs, in insertion order.
    fn all_edges(&self) -> Vec<(TaskId, TaskId)>;

    /// Whether the edge `(task, depends_on)` exists.
    fn has_edge(&self, task: TaskId, depends_on: TaskId) -> bool;

    /// Persist the edge "`task` depends on `depends_on`".
    ///
    /// Endpoints must exist and the edge must not be present yet; the store
    /// re-checks both so the uniqueness invariant holds even if a caller
    /// skipped the validated insertion path.
    fn add_edge(&mut self, task: TaskId, depends_on: TaskId) -> Result<()>;

    /// Remove an edge. Returns `true` if it existed.
    fn remove_edge(&mut self, task: TaskId, depends_on: TaskId) -> Result<bool>;

    /// Tasks that depend on `id` (edges with `depends_on == id`), ascending.
    fn dependents_of(&self, id: TaskId) -> Vec<TaskId>;

    /// Direct dependencies of `id` (edges with `task == id`), ascending.
    fn dependencies_of(&self, id: TaskId) -> Vec<TaskId>;
}
