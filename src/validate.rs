//! Field-level validation for task and column data.
//!
//! Validation never mutates state and never blocks the store: running it
//! before a mutation is the caller's contract. All rules are checked, not
//! short-circuited, so a form can surface every problem at once.

use crate::types::{Column, TaskDraft};

/// Maximum task title length
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum task description length
pub const MAX_DESCRIPTION_LEN: usize = 2000;
/// Maximum column title length
pub const MAX_COLUMN_TITLE_LEN: usize = 50;

/// Outcome of a validation pass: `valid` with an ordered list of
/// human-readable messages, one per violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Validation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate task creation input
pub fn validate_task(draft: &TaskDraft) -> Validation {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push("Title is required".to_string());
    }
    if draft.title.chars().count() > MAX_TITLE_LEN {
        errors.push(format!(
            "Title must be less than {} characters",
            MAX_TITLE_LEN
        ));
    }
    if draft.description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push(format!(
            "Description must be less than {} characters",
            MAX_DESCRIPTION_LEN
        ));
    }

    Validation::from_errors(errors)
}

/// Validate column data
pub fn validate_column(column: &Column) -> Validation {
    let mut errors = Vec::new();

    if column.id.as_str().trim().is_empty() {
        errors.push("Column ID is required".to_string());
    }
    if column.title.trim().is_empty() {
        errors.push("Column title is required".to_string());
    }
    if column.title.chars().count() > MAX_COLUMN_TITLE_LEN {
        errors.push(format!(
            "Column title must be less than {} characters",
            MAX_COLUMN_TITLE_LEN
        ));
    }
    if column.color.trim().is_empty() {
        errors.push("Column color is required".to_string());
    }
    if column.max_tasks == Some(0) {
        errors.push("Max tasks must be at least 1".to_string());
    }

    Validation::from_errors(errors)
}
