// src/engine/cycle.rs

//! Cycle detection for candidate dependency edges.
//!
//! The store only ever holds acyclic edge sets, so detection happens once,
//! at insertion time: build adjacency from the existing edges plus the
//! candidate, then depth-first search the whole graph. A node revisited
//! while still on the current DFS path closes a cycle.
//!
//! The DFS is iterative (explicit frame stack) so large graphs cannot blow
//! the call stack, and "on path" tracking is a set keyed by task id.

use std::collections::{BTreeMap, HashSet};

use crate::model::TaskId;

/// Check whether adding `candidate` (`from` depends on `to`) to
/// `existing_edges` would create a cycle.
///
/// Returns the cycle path that would be formed, closed on the repeated node
/// (for a stack `[1, 2, 3]` revisiting `1`, the path is `[1, 2, 3, 1]`), or
/// `None` when the edge is safe to commit.
///
/// Roots are scanned in ascending id order and children in edge insertion
/// order, so the first cycle found is deterministic for a given edge
/// sequence. Runs in O(V + E).
pub fn would_create_cycle(
    existing_edges: &[(TaskId, TaskId)],
    candidate: (TaskId, TaskId),
) -> Option<Vec<TaskId>> {
    let mut adjacency: BTreeMap<TaskId, Vec<TaskId>> = BTreeMap::new();
    for &(from, to) in existing_edges {
        adjacency.entry(from).or_default().push(to);
    }
    let (from, to) = candidate;
    adjacency.entry(from).or_default().push(to);

    let mut visited: HashSet<TaskId> = HashSet::new();

    // BTreeMap keys give the ascending root order.
    let roots: Vec<TaskId> = adjacency.keys().copied().collect();
    for root in roots {
        if visited.contains(&root) {
            continue;
        }
        if let Some(cycle) = dfs_from(root, &adjacency, &mut visited) {
            return Some(cycle);
        }
    }

    None
}

/// One DFS pass from `root`, sharing `visited` across roots.
///
/// Each frame is `(node, next child index)`; `path` mirrors the frame stack
/// and `on_path` is its set view for O(1) membership checks.
fn dfs_from(
    root: TaskId,
    adjacency: &BTreeMap<TaskId, Vec<TaskId>>,
    visited: &mut HashSet<TaskId>,
) -> Option<Vec<TaskId>> {
    let mut frames: Vec<(TaskId, usize)> = vec![(root, 0)];
    let mut path: Vec<TaskId> = vec![root];
    let mut on_path: HashSet<TaskId> = HashSet::from([root]);
    visited.insert(root);

    while let Some(frame) = frames.last_mut() {
        let node = frame.0;
        let child = adjacency
            .get(&node)
            .and_then(|children| children.get(frame.1))
            .copied();

        match child {
            Some(child) => {
                frame.1 += 1;

                if on_path.contains(&child) {
                    // Cycle: slice of the path from the first occurrence of
                    // `child` through the current node, closed on `child`.
                    if let Some(start) = path.iter().position(|&n| n == child) {
                        let mut cycle = path[start..].to_vec();
                        cycle.push(child);
                        return Some(cycle);
                    }
                } else if visited.insert(child) {
                    frames.push((child, 0));
                    path.push(child);
                    on_path.insert(child);
                }
                // Already visited off-path: a finished subgraph, skip.
            }
            None => {
                frames.pop();
                path.pop();
                on_path.remove(&node);
            }
        }
    }

    None
}
