// src/store/file.rs

//! Load and save the task graph as a JSON document.
//!
//! Responsibilities:
//! - Deserialize/serialize the on-disk shape ([`GraphFile`]).
//! - Validate structural invariants on load, since the file may have been
//!   edited by hand: unique task ids, non-empty titles, edge endpoints that
//!   exist, no self-loops, no duplicate edges, and an acyclic graph.
//!
//! Validation failures are reported through `anyhow` with file context;
//! once loaded, all further mutation goes through the engine, which keeps
//! the same invariants incrementally.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{DependencyEdge, Task, TaskId};
use crate::store::InMemoryStore;

/// On-disk representation of the whole graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub edges: Vec<DependencyEdge>,
}

/// Read a graph file and return the raw [`GraphFile`].
///
/// This only performs JSON deserialization; use [`load_and_validate`] (or
/// [`load_or_default`]) to also check the structural invariants.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<GraphFile> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading graph file at {path:?}"))?;

    let file: GraphFile = serde_json::from_str(&contents)
        .with_context(|| format!("parsing JSON graph from {path:?}"))?;

    Ok(file)
}

/// Load a graph file, validate it, and build the in-memory store.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<InMemoryStore> {
    let path = path.as_ref();
    let file = load_from_path(path)?;
    validate_graph_file(&file).with_context(|| format!("validating graph file {path:?}"))?;
    Ok(InMemoryStore::from_parts(file.tasks, file.edges))
}

/// Like [`load_and_validate`], but a missing file yields an empty store.
///
/// This is the entry point used by the CLI so that the first `taskdag add`
/// does not require creating the file by hand.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<InMemoryStore> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(?path, "graph file missing; starting with an empty graph");
        return Ok(InMemoryStore::new());
    }
    load_and_validate(path)
}

/// Persist the store back to disk as pretty-printed JSON.
pub fn save_to_path(store: &InMemoryStore, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let (tasks, edges) = store.to_parts();
    let file = GraphFile { tasks, edges };

    let json = serde_json::to_string_pretty(&file).context("serializing graph to JSON")?;
    fs::write(path, json).with_context(|| format!("writing graph file at {path:?}"))?;
    Ok(())
}

/// Check the structural invariants of a raw graph file.
pub fn validate_graph_file(file: &GraphFile) -> Result<()> {
    let mut ids: HashSet<TaskId> = HashSet::new();
    for task in &file.tasks {
        if task.title.trim().is_empty() {
            return Err(anyhow!("task {} has an empty title", task.id));
        }
        if !ids.insert(task.id) {
            return Err(anyhow!("duplicate task id {}", task.id));
        }
    }

    let mut seen: HashSet<(TaskId, TaskId)> = HashSet::new();
    for edge in &file.edges {
        if edge.task == edge.depends_on {
            return Err(anyhow!("task {} depends on itself", edge.task));
        }
        if !ids.contains(&edge.task) {
            return Err(anyhow!(
                "edge references unknown task {} (depends on {})",
                edge.task,
                edge.depends_on
            ));
        }
        if !ids.contains(&edge.depends_on) {
            return Err(anyhow!(
                "edge for task {} references unknown dependency {}",
                edge.task,
                edge.depends_on
            ));
        }
        if !seen.insert((edge.task, edge.depends_on)) {
            return Err(anyhow!(
                "duplicate dependency {} -> {}",
                edge.task,
                edge.depends_on
            ));
        }
    }

    validate_acyclic(file)
}

fn validate_acyclic(file: &GraphFile) -> Result<()> {
    // Edge direction: task -> depends_on. A topological sort fails iff the
    // graph has a cycle; which direction we pick does not matter for that.
    let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();

    for task in &file.tasks {
        graph.add_node(task.id);
    }
    for edge in &file.edges {
        graph.add_edge(edge.task, edge.depends_on, ());
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(anyhow!(
            "cycle detected in dependency graph involving task {}",
            cycle.node_id()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;
    use crate::model::TaskStatus;
    use crate::store::GraphStore;

    fn sample_store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        let a = engine::create_task(&mut store, "write draft", None).unwrap();
        let b = engine::create_task(&mut store, "review draft", Some("second pass".into()))
            .unwrap();
        engine::check_and_insert_edge(&mut store, b, a).unwrap();
        engine::set_status(&mut store, a, TaskStatus::Completed).unwrap();
        store
    }

    #[test]
    fn save_and_reload_preserves_tasks_edges_and_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let store = sample_store();
        save_to_path(&store, &path).unwrap();

        let reloaded = load_and_validate(&path).unwrap();
        assert_eq!(reloaded.tasks().len(), 2);
        assert_eq!(reloaded.all_edges(), vec![(2, 1)]);
        assert_eq!(reloaded.task(1).unwrap().status, TaskStatus::Completed);
        assert_eq!(reloaded.task(2).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn missing_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_or_default(dir.path().join("absent.json")).unwrap();
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn malformed_json_is_rejected_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_and_validate(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing JSON graph"));
    }

    #[test]
    fn hand_edited_cycle_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let store = sample_store();
        save_to_path(&store, &path).unwrap();

        // Sneak the reverse edge in behind the engine's back.
        let mut file = load_from_path(&path).unwrap();
        file.edges.push(DependencyEdge { task: 1, depends_on: 2 });
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let err = load_and_validate(&path).unwrap_err();
        assert!(format!("{err:#}").contains("cycle detected"));
    }

    #[test]
    fn dangling_edges_and_self_loops_are_rejected() {
        let store = sample_store();
        let (tasks, edges) = store.to_parts();

        let mut dangling = GraphFile { tasks: tasks.clone(), edges: edges.clone() };
        dangling.edges.push(DependencyEdge { task: 2, depends_on: 9 });
        assert!(validate_graph_file(&dangling).is_err());

        let mut self_loop = GraphFile { tasks: tasks.clone(), edges: edges.clone() };
        self_loop.edges.push(DependencyEdge { task: 2, depends_on: 2 });
        assert!(validate_graph_file(&self_loop).is_err());

        let mut duplicate = GraphFile { tasks, edges };
        duplicate.edges.push(DependencyEdge { task: 2, depends_on: 1 });
        assert!(validate_graph_file(&duplicate).is_err());
    }

    #[test]
    fn empty_titles_are_rejected() {
        let mut store = InMemoryStore::new();
        let id = store.create_task("  ".to_string(), None).unwrap();
        let (tasks, edges) = store.to_parts();
        let err = validate_graph_file(&GraphFile { tasks, edges }).unwrap_err();
        assert!(err.to_string().contains(&format!("task {id} has an empty title")));
    }
}
