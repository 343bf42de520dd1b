//! Column types: Column, ColumnUpdate

use super::ids::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// A column is a named lane holding an ordered list of task IDs.
///
/// `task_ids` is the single source of truth for both column membership and
/// in-column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,

    /// Display token (e.g. a hex color), required non-empty
    pub color: String,

    #[serde(default)]
    pub task_ids: Vec<TaskId>,

    /// Advisory WIP limit; occupancy may legally exceed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tasks: Option<u32>,
}

impl Column {
    /// Create an empty column
    pub fn new(
        id: impl Into<ColumnId>,
        title: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: color.into(),
            task_ids: Vec::new(),
            max_tasks: None,
        }
    }

    /// Set the WIP limit
    pub fn with_max_tasks(mut self, max_tasks: u32) -> Self {
        self.max_tasks = Some(max_tasks);
        self
    }

    /// Number of tasks currently in the column
    pub fn task_count(&self) -> usize {
        self.task_ids.len()
    }

    /// Position of a task within the column's sequence
    pub fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    /// Merge an update into this column. Never touches `task_ids`.
    pub fn apply(&mut self, update: &ColumnUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
        if let Some(max_tasks) = update.max_tasks {
            self.max_tasks = max_tasks;
        }
    }
}

/// A partial update to a column's display fields. Absent fields are left
/// unchanged; membership and order are out of its reach.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnUpdate {
    pub title: Option<String>,
    pub color: Option<String>,
    /// WIP limit (None = don't change, Some(None) = clear, Some(Some(n)) = set)
    pub max_tasks: Option<Option<u32>>,
}

impl ColumnUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set or clear the WIP limit
    pub fn with_max_tasks(mut self, max_tasks: Option<u32>) -> Self {
        self.max_tasks = Some(max_tasks);
        self
    }
}
