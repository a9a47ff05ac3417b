// src/store/memory.rs

//! In-memory [`GraphStore`] backend.
//!
//! Tasks live in a `BTreeMap` keyed by id (giving ascending iteration for
//! free) and edges in an insertion-ordered `Vec`. Adjacency lookups scan
//! the edge list; graphs here are people-sized, not machine-sized.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::errors::{GraphError, Result};
use crate::model::{DependencyEdge, Task, TaskId, TaskStatus};
use crate::store::GraphStore;

#[derive(Debug, Clone)]
pub struct InMemoryStore {
    tasks: BTreeMap<TaskId, Task>,
    edges: Vec<DependencyEdge>,
    next_id: TaskId,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            edges: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from previously persisted tasks and edges.
    ///
    /// Assumes the parts were validated (see [`crate::store::file`]); the
    /// next assigned id continues after the highest existing one.
    pub fn from_parts(tasks: Vec<Task>, edges: Vec<DependencyEdge>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().map_or(1, |max| max + 1);
        let tasks = tasks.into_iter().map(|t| (t.id, t)).collect();
        Self { tasks, edges, next_id }
    }

    /// Decompose the store for persistence, tasks ascending by id.
    pub fn to_parts(&self) -> (Vec<Task>, Vec<DependencyEdge>) {
        (self.tasks.values().cloned().collect(), self.edges.clone())
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks.get_mut(&id).ok_or(GraphError::NotFound(id))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for InMemoryStore {
    fn task(&self, id: TaskId) -> Result<&Task> {
        self.tasks.get(&id).ok_or(GraphError::NotFound(id))
    }

    fn tasks(&self) -> Vec<&Task> {
        self.tasks.values().collect()
    }

    fn create_task(&mut self, title: String, description: Option<String>) -> Result<TaskId> {
        let id = self.next_id;
        self.next_id += 1;

        let now = Utc::now();
        self.tasks.insert(
            id,
            Task {
                id,
                title,
                description,
                status: TaskStatus::Pending,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    fn update_details(
        &mut self,
        id: TaskId,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<()> {
        let task = self.task_mut(id)?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = Some(description);
        }
        task.updated_at = Utc::now();
        Ok(())
    }

    fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<()> {
        let task = self.task_mut(id)?;
        task.status = status;
        task.updated_at = Utc::now();
        Ok(())
    }

    fn remove_task(&mut self, id: TaskId) -> Result<Task> {
        let task = self.tasks.remove(&id).ok_or(GraphError::NotFound(id))?;
        self.edges.retain(|e| e.task != id && e.depends_on != id);
        Ok(task)
    }

    fn all_edges(&self) -> Vec<(TaskId, TaskId)> {
        self.edges.iter().map(|e| (e.task, e.depends_on)).collect()
    }

    fn has_edge(&self, task: TaskId, depends_on: TaskId) -> bool {
        self.edges
            .iter()
            .any(|e| e.task == task && e.depends_on == depends_on)
    }

    fn add_edge(&mut self, task: TaskId, depends_on: TaskId) -> Result<()> {
        if !self.tasks.contains_key(&task) {
            return Err(GraphError::NotFound(task));
        }
        if !self.tasks.contains_key(&depends_on) {
            return Err(GraphError::NotFound(depends_on));
        }
        if self.has_edge(task, depends_on) {
            return Err(GraphError::DuplicateDependency { task, depends_on });
        }
        self.edges.push(DependencyEdge { task, depends_on });
        Ok(())
    }

    fn remove_edge(&mut self, task: TaskId, depends_on: TaskId) -> Result<bool> {
        let before = self.edges.len();
        self.edges
            .retain(|e| !(e.task == task && e.depends_on == depends_on));
        Ok(self.edges.len() != before)
    }

    fn dependents_of(&self, id: TaskId) -> Vec<TaskId> {
        let mut out: Vec<TaskId> = self
            .edges
            .iter()
            .filter(|e| e.depends_on == id)
            .map(|e| e.task)
            .collect();
        out.sort_unstable();
        out
    }

    fn dependencies_of(&self, id: TaskId) -> Vec<TaskId> {
        let mut out: Vec<TaskId> = self
            .edges
            .iter()
            .filter(|e| e.task == id)
            .map(|e| e.depends_on)
            .collect();
        out.sort_unstable();
        out
    }
}
