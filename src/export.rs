// src/export.rs

//! Serialization of the full graph for visualization.
//!
//! The shape is `{nodes: [{id, title, status}], edges: [{from, to}]}`,
//! where `from` is the depending task and `to` the task it depends on.

use serde::{Deserialize, Serialize};

use crate::model::{TaskId, TaskStatus};
use crate::store::GraphStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEdge {
    pub from: TaskId,
    pub to: TaskId,
}

/// Snapshot the store as an exportable graph.
///
/// Nodes come out ascending by id and edges sorted by `(from, to)`, so the
/// export is stable across runs for the same graph.
pub fn export_graph<S: GraphStore>(store: &S) -> GraphExport {
    let nodes = store
        .tasks()
        .into_iter()
        .map(|task| ExportNode {
            id: task.id,
            title: task.title.clone(),
            status: task.status,
        })
        .collect();

    let mut edges: Vec<ExportEdge> = store
        .all_edges()
        .into_iter()
        .map(|(task, depends_on)| ExportEdge { from: task, to: depends_on })
        .collect();
    edges.sort_unstable_by_key(|e| (e.from, e.to));

    GraphExport { nodes, edges }
}
