//! Board state: the canonical columns/tasks/order triple

use super::column::Column;
use super::ids::{ColumnId, TaskId};
use super::task::Task;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The complete board state.
///
/// Map iteration order carries no meaning; `column_order` alone defines lane
/// display order, and each column's `task_ids` alone defines card order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub columns: HashMap<ColumnId, Column>,
    pub tasks: HashMap<TaskId, Task>,
    pub column_order: Vec<ColumnId>,
}

impl BoardState {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a column
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    /// Look up a task
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Audit the structural invariants, returning one message per violation.
    /// An empty list means the board is consistent.
    ///
    /// Checked: every task's `status` names an existing column whose
    /// `task_ids` holds the task exactly once; no task ID appears in two
    /// columns; `column_order` is a permutation of the column-map keys; no
    /// `task_ids` sequence contains duplicates or dangling IDs; any WIP
    /// limit is at least 1.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        // task -> column pointers
        for (task_id, task) in &self.tasks {
            match self.columns.get(&task.status) {
                None => violations.push(format!(
                    "task '{}' has status '{}' which names no column",
                    task_id, task.status
                )),
                Some(column) => {
                    let occurrences = column
                        .task_ids
                        .iter()
                        .filter(|id| *id == task_id)
                        .count();
                    if occurrences != 1 {
                        violations.push(format!(
                            "task '{}' appears {} times in its column '{}'",
                            task_id, occurrences, column.id
                        ));
                    }
                }
            }
        }

        // column membership sequences
        let mut owners: HashMap<&TaskId, &ColumnId> = HashMap::new();
        for column in self.columns.values() {
            let mut seen = HashSet::new();
            for task_id in &column.task_ids {
                if !seen.insert(task_id) {
                    violations.push(format!(
                        "column '{}' lists task '{}' more than once",
                        column.id, task_id
                    ));
                }
                if let Some(other) = owners.insert(task_id, &column.id) {
                    if other != &column.id {
                        violations.push(format!(
                            "task '{}' is listed by columns '{}' and '{}'",
                            task_id, other, column.id
                        ));
                    }
                }
                if !self.tasks.contains_key(task_id) {
                    violations.push(format!(
                        "column '{}' lists unknown task '{}'",
                        column.id, task_id
                    ));
                }
            }

            if let Some(0) = column.max_tasks {
                violations.push(format!("column '{}' has a WIP limit of 0", column.id));
            }
        }

        // column_order must be a permutation of the column-map keys
        let mut seen_order = HashSet::new();
        for column_id in &self.column_order {
            if !seen_order.insert(column_id) {
                violations.push(format!(
                    "column '{}' appears more than once in the column order",
                    column_id
                ));
            }
            if !self.columns.contains_key(column_id) {
                violations.push(format!(
                    "column order names unknown column '{}'",
                    column_id
                ));
            }
        }
        for column_id in self.columns.keys() {
            if !self.column_order.contains(column_id) {
                violations.push(format!(
                    "column '{}' is missing from the column order",
                    column_id
                ));
            }
        }

        violations
    }

    /// True when no invariant is violated
    pub fn is_consistent(&self) -> bool {
        self.invariant_violations().is_empty()
    }
}
