// src/engine/propagate.rs

//! Status propagation: re-derive dependents after a task's status changed.

use tracing::debug;

use crate::engine::resolve::resolve;
use crate::errors::Result;
use crate::model::{TaskId, TaskStatus};
use crate::store::GraphStore;

/// Walk the dependents of `changed` and re-apply the status resolver
/// transitively until nothing changes any more.
///
/// For each dependent: compute its derived status from its direct
/// dependencies; if it differs and the dependent is not `Completed`, persist
/// it and push the dependent so its own dependents are re-evaluated. The
/// walk uses an explicit stack and terminates because the graph is acyclic
/// and each step only proceeds on an actual status change, so the fixpoint
/// is reached in at most |V| updates.
///
/// Returns the ids of all tasks whose status was changed, in update order.
pub fn propagate<S: GraphStore>(store: &mut S, changed: TaskId) -> Result<Vec<TaskId>> {
    let mut stack = vec![changed];
    let mut updated = Vec::new();

    while let Some(node) = stack.pop() {
        for dependent in store.dependents_of(node) {
            let current = store.task(dependent)?.status;
            if current == TaskStatus::Completed {
                continue;
            }

            let dep_statuses = dependency_statuses(store, dependent)?;
            let next = resolve(current, &dep_statuses);
            if next == current {
                continue;
            }

            store.set_status(dependent, next)?;
            debug!(
                task = dependent,
                from = %current,
                to = %next,
                "propagated status change"
            );
            updated.push(dependent);
            stack.push(dependent);
        }
    }

    Ok(updated)
}

/// Statuses of a task's direct dependencies, in ascending dependency id
/// order.
pub(crate) fn dependency_statuses<S: GraphStore>(
    store: &S,
    id: TaskId,
) -> Result<Vec<TaskStatus>> {
    store
        .dependencies_of(id)
        .into_iter()
        .map(|dep| Ok(store.task(dep)?.status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{check_and_insert_edge, create_task, set_status};
    use crate::store::InMemoryStore;

    /// `edges[i] = (task, depends_on)`.
    fn build(n: u64, edges: &[(usize, usize)]) -> (InMemoryStore, Vec<TaskId>) {
        let mut store = InMemoryStore::new();
        let ids: Vec<TaskId> = (0..n)
            .map(|i| create_task(&mut store, &format!("task {i}"), None).unwrap())
            .collect();
        for &(task, dep) in edges {
            check_and_insert_edge(&mut store, ids[task], ids[dep]).unwrap();
        }
        (store, ids)
    }

    #[test]
    fn completing_the_only_dependency_starts_the_dependent() {
        // Task 0 depends on task 1; completing 1 moves 0 to in_progress.
        let (mut store, ids) = build(2, &[(0, 1)]);
        set_status(&mut store, ids[1], TaskStatus::Completed).unwrap();
        assert_eq!(store.task(ids[0]).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn blocked_dependency_blocks_transitively() {
        // 0 depends on 1 depends on 2; blocking 2 blocks the whole chain.
        let (mut store, ids) = build(3, &[(0, 1), (1, 2)]);
        set_status(&mut store, ids[2], TaskStatus::Blocked).unwrap();
        assert_eq!(store.task(ids[1]).unwrap().status, TaskStatus::Blocked);
        assert_eq!(store.task(ids[0]).unwrap().status, TaskStatus::Blocked);
    }

    #[test]
    fn completed_dependents_are_skipped_but_their_dependents_are_not_reached() {
        // 0 depends on 1, 1 depends on 2. Mark 1 completed up front; then
        // blocking 2 must leave both 1 and 0 alone, since propagation stops
        // at the completed task.
        let (mut store, ids) = build(3, &[(0, 1), (1, 2)]);
        set_status(&mut store, ids[1], TaskStatus::Completed).unwrap();
        assert_eq!(store.task(ids[0]).unwrap().status, TaskStatus::InProgress);

        set_status(&mut store, ids[2], TaskStatus::Blocked).unwrap();
        assert_eq!(store.task(ids[1]).unwrap().status, TaskStatus::Completed);
        assert_eq!(store.task(ids[0]).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn manual_unblock_of_completed_dependency_propagates_again() {
        // Scenario from the readiness rules: A depends on B only.
        // B pending -> completed: A becomes in_progress.
        // B completed -> blocked (manual override): A becomes blocked.
        let (mut store, ids) = build(2, &[(0, 1)]);

        set_status(&mut store, ids[1], TaskStatus::Completed).unwrap();
        assert_eq!(store.task(ids[0]).unwrap().status, TaskStatus::InProgress);

        set_status(&mut store, ids[1], TaskStatus::Blocked).unwrap();
        assert_eq!(store.task(ids[0]).unwrap().status, TaskStatus::Blocked);
    }

    #[test]
    fn mixed_dependencies_follow_rule_order() {
        // 0 depends on 1 and 2. 1 completed, 2 blocked: blocked wins.
        let (mut store, ids) = build(3, &[(0, 1), (0, 2)]);
        set_status(&mut store, ids[1], TaskStatus::Completed).unwrap();
        set_status(&mut store, ids[2], TaskStatus::Blocked).unwrap();
        assert_eq!(store.task(ids[0]).unwrap().status, TaskStatus::Blocked);

        // Unblocking 2 leaves one incomplete dependency: pending.
        set_status(&mut store, ids[2], TaskStatus::Pending).unwrap();
        assert_eq!(store.task(ids[0]).unwrap().status, TaskStatus::Pending);

        // Completing 2 as well: everything done, in_progress.
        set_status(&mut store, ids[2], TaskStatus::Completed).unwrap();
        assert_eq!(store.task(ids[0]).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn diamond_propagation_reaches_the_sink_once_per_change() {
        // 3 depends on 1 and 2; both depend on 0.
        let (mut store, ids) = build(4, &[(1, 0), (2, 0), (3, 1), (3, 2)]);

        set_status(&mut store, ids[0], TaskStatus::Completed).unwrap();
        assert_eq!(store.task(ids[1]).unwrap().status, TaskStatus::InProgress);
        assert_eq!(store.task(ids[2]).unwrap().status, TaskStatus::InProgress);
        // 1 and 2 are in_progress, not completed, so 3 stays pending.
        assert_eq!(store.task(ids[3]).unwrap().status, TaskStatus::Pending);

        set_status(&mut store, ids[1], TaskStatus::Completed).unwrap();
        set_status(&mut store, ids[2], TaskStatus::Completed).unwrap();
        assert_eq!(store.task(ids[3]).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn repropagation_without_changes_is_a_noop() {
        let (mut store, ids) = build(3, &[(0, 1), (1, 2)]);
        set_status(&mut store, ids[2], TaskStatus::Completed).unwrap();

        let updated = propagate(&mut store, ids[2]).unwrap();
        assert!(updated.is_empty(), "fixpoint reached; expected no updates");
    }

    #[test]
    fn propagation_reports_updated_tasks() {
        let (mut store, ids) = build(3, &[(0, 1), (1, 2)]);
        let updated = set_status(&mut store, ids[2], TaskStatus::Blocked).unwrap();
        assert_eq!(updated, vec![ids[2], ids[1], ids[0]]);
    }
}
