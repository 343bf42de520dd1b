//! Inbound boundary types for the drag-interaction collaborator.
//!
//! The gesture layer (pointer/keyboard sensors, collision detection) lives
//! outside this crate. What crosses the boundary is a narrow, explicit
//! message: a [`MoveRequest`] constructed from the resolved drop, wrapped in
//! the [`DragEvent`] lifecycle. Only a terminal [`DragEvent::Ended`] commits
//! anything; `Started` and `Over` are informational and `Cancelled` must
//! leave the board untouched.

use crate::types::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// A terminal move request: which task, between which columns, landing at
/// which index in the destination sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub task: TaskId,
    pub from: ColumnId,
    pub to: ColumnId,
    pub index: usize,
}

impl MoveRequest {
    /// Create a move request
    pub fn new(
        task: impl Into<TaskId>,
        from: impl Into<ColumnId>,
        to: impl Into<ColumnId>,
        index: usize,
    ) -> Self {
        Self {
            task: task.into(),
            from: from.into(),
            to: to.into(),
            index,
        }
    }

    /// Build a request from a drop whose target may carry no index - a card
    /// dropped directly on a column rather than on another card. The fixed
    /// default for an index-less drop is 0 (top of the column).
    pub fn resolve(
        task: impl Into<TaskId>,
        from: impl Into<ColumnId>,
        to: impl Into<ColumnId>,
        index: Option<usize>,
    ) -> Self {
        Self::new(task, from, to, index.unwrap_or(0))
    }
}

/// The drag-gesture lifecycle as seen by the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    /// A drag began; advisory only
    Started { task: TaskId },
    /// The dragged card is hovering over a column; advisory only, never a
    /// commit point
    Over { task: TaskId, column: ColumnId },
    /// Terminal drop with a resolved target - the only committing event
    Ended(MoveRequest),
    /// The drag was aborted before a terminal drop
    Cancelled,
}
