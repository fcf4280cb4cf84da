//! Task reordering protocol.
//!
//! Translates "move the task at display position A to position B" into the
//! minimal set of persisted `order_index` changes. The plan is computed
//! over the displayed sequence as returned by the store - not re-derived
//! from raw order_index values, since the visible sequence is what the
//! user actually dragged.

use crate::models::Task;
use crate::storage::Store;
use crate::Result;

/// Compute the `(task_id, new_order_index)` pairs for moving the task at
/// `from` to position `to` within the displayed sequence.
///
/// The sequence is spliced in memory, renumbered 1..n, and only entries
/// whose index actually changed are returned - unchanged rows are omitted
/// to minimize writes. An invalid source position or a source equal to the
/// target yields an empty plan; a target past the end means "move to last".
pub fn plan_move(tasks: &[Task], from: usize, to: usize) -> Vec<(i64, i64)> {
    if tasks.is_empty() || from >= tasks.len() {
        return Vec::new();
    }

    let to = to.min(tasks.len() - 1);
    if from == to {
        return Vec::new();
    }

    let mut sequence: Vec<&Task> = tasks.iter().collect();
    let moved = sequence.remove(from);
    sequence.insert(to, moved);

    let mut changes = Vec::new();
    for (position, task) in sequence.iter().enumerate() {
        let new_index = position as i64 + 1;
        if task.order_index != new_index {
            let Some(id) = task.id else { continue };
            changes.push((id, new_index));
        }
    }
    changes
}

/// Apply a positional move for a project and persist it.
///
/// Loads the display ordering, plans the move, and submits any non-empty
/// plan through the store (which also touches the project's
/// `updated_date`). Returns the number of rows whose order changed. The
/// caller must reload its view of the task list afterwards - every
/// visible task's index may have shifted.
pub fn move_task(store: &mut Store, project_id: i64, from: usize, to: usize) -> Result<usize> {
    let tasks = store.get_tasks_by_project(project_id)?;
    let plan = plan_move(&tasks, from, to);

    if !plan.is_empty() {
        store.update_task_orders(project_id, &plan)?;
    }
    Ok(plan.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    /// Build an in-memory display sequence with the given order indices.
    fn sequence(indices: &[i64]) -> Vec<Task> {
        indices
            .iter()
            .enumerate()
            .map(|(i, &order_index)| {
                let mut task = Task::new(1, format!("task {i}"));
                task.id = Some(i as i64 + 100);
                task.order_index = order_index;
                task
            })
            .collect()
    }

    #[test]
    fn test_move_first_to_last_changes_all() {
        // [A,B,C,D,E] with indices 1..5; A to the end gives [B,C,D,E,A]
        // and every position shifts
        let tasks = sequence(&[1, 2, 3, 4, 5]);
        let plan = plan_move(&tasks, 0, 4);
        assert_eq!(
            plan,
            vec![(101, 1), (102, 2), (103, 3), (104, 4), (100, 5)]
        );
    }

    #[test]
    fn test_adjacent_swap_changes_two() {
        let tasks = sequence(&[1, 2, 3]);
        let plan = plan_move(&tasks, 1, 0);
        assert_eq!(plan, vec![(101, 1), (100, 2)]);
    }

    #[test]
    fn test_noop_move_is_empty() {
        let tasks = sequence(&[1, 2, 3]);
        assert!(plan_move(&tasks, 1, 1).is_empty());
    }

    #[test]
    fn test_invalid_source_is_empty() {
        let tasks = sequence(&[1, 2, 3]);
        assert!(plan_move(&tasks, 3, 0).is_empty());
        assert!(plan_move(&[], 0, 0).is_empty());
    }

    #[test]
    fn test_target_past_end_clamps_to_last() {
        let tasks = sequence(&[1, 2, 3]);
        let plan = plan_move(&tasks, 0, 99);
        assert_eq!(plan, vec![(101, 1), (102, 2), (100, 3)]);
    }

    #[test]
    fn test_sparse_indices_renumber_contiguously() {
        // Display order is positional; gaps in stored indices close up
        let tasks = sequence(&[2, 5, 9]);
        let plan = plan_move(&tasks, 2, 0);
        // New order: [third, first, second] -> indices 1,2,3. The first
        // task already sits at stored index 2, so it is not rewritten.
        assert_eq!(plan, vec![(102, 1), (101, 3)]);
    }

    #[test]
    fn test_unchanged_rows_are_omitted() {
        // Moving the middle task to the front leaves the last row at its
        // existing index 3
        let tasks = sequence(&[1, 2, 3]);
        let plan = plan_move(&tasks, 0, 1);
        assert_eq!(plan, vec![(101, 1), (100, 2)]);
    }

    #[test]
    fn test_move_task_persists_and_touches_project() {
        let env = TestEnv::new();
        let mut store = env.open_store();

        let project_id = store
            .create_project(&crate::models::Project::new("p".to_string(), None))
            .unwrap();
        let t1 = store
            .create_task(&Task::new(project_id, "T1".to_string()))
            .unwrap();
        let t2 = store
            .create_task(&Task::new(project_id, "T2".to_string()))
            .unwrap();

        let before = store.get_project(project_id).unwrap().unwrap().updated_date;

        // Move T2 before T1: both rows change
        let changed = move_task(&mut store, project_id, 1, 0).unwrap();
        assert_eq!(changed, 2);

        let tasks = store.get_tasks_by_project(project_id).unwrap();
        let ids: Vec<i64> = tasks.iter().filter_map(|t| t.id).collect();
        assert_eq!(ids, vec![t2, t1]);
        assert_eq!(tasks[0].order_index, 1);
        assert_eq!(tasks[1].order_index, 2);

        let after = store.get_project(project_id).unwrap().unwrap().updated_date;
        assert!(after >= before);
    }

    #[test]
    fn test_move_task_noop_does_not_touch() {
        let env = TestEnv::new();
        let mut store = env.open_store();

        let project_id = store
            .create_project(&crate::models::Project::new("p".to_string(), None))
            .unwrap();
        store
            .create_task(&Task::new(project_id, "T1".to_string()))
            .unwrap();

        let changed = move_task(&mut store, project_id, 0, 0).unwrap();
        assert_eq!(changed, 0);
    }
}
