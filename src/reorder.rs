//! Pure reorder engines for drag-and-drop.
//!
//! Both functions are splice-based: the element is removed first, then
//! inserted into the already-shortened sequence. For a same-column move this
//! means the destination index is interpreted *after* removal has shifted
//! later elements down by one - `reorder(['a','b','c'], 0, 2)` yields
//! `['b','c','a']`. A destination past the end appends.
//!
//! Neither function mutates its input, and neither panics on malformed
//! indices: a source index past the end returns the input unchanged (the
//! store guards indices on the event path, but a bad drag payload must
//! degrade to a no-op, not a crash).

use crate::types::{Column, TaskId};

/// Compute a new same-column order with the task at `source_index` moved to
/// `dest_index`. Returns an equal sequence when the indices match.
pub fn reorder(task_ids: &[TaskId], source_index: usize, dest_index: usize) -> Vec<TaskId> {
    let mut result = task_ids.to_vec();
    if source_index >= result.len() {
        return result;
    }
    let moved = result.remove(source_index);
    let at = dest_index.min(result.len());
    result.insert(at, moved);
    result
}

/// Move the task at `source_index` in `source` to `dest_index` in `dest`,
/// returning updated copies of both columns. The two sequences are separate,
/// so no index-shift interaction occurs between them.
///
/// Only the `task_ids` sequences change; repointing the moved task's
/// `status` is the caller's job.
pub fn move_between_columns(
    source: &Column,
    dest: &Column,
    source_index: usize,
    dest_index: usize,
) -> (Column, Column) {
    let mut source = source.clone();
    let mut dest = dest.clone();
    if source_index >= source.task_ids.len() {
        return (source, dest);
    }
    let moved = source.task_ids.remove(source_index);
    let at = dest_index.min(dest.task_ids.len());
    dest.task_ids.insert(at, moved);
    (source, dest)
}
