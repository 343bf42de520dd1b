//! WIP-limit policy.
//!
//! Limits are advisory in this engine: nothing here (or in the store) blocks
//! a create or a move into a full column. The presentation layer renders the
//! tri-state [`WipStatus`] as a warning, and a caller that wants hard
//! enforcement can gate on [`would_exceed_wip_limit`] before committing.

use crate::types::Column;
use serde::{Deserialize, Serialize};

/// Tri-state occupancy level for a column's WIP limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WipLevel {
    Safe,
    Warning,
    Limit,
}

/// A column's occupancy relative to its WIP limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WipStatus {
    /// Occupancy as a percentage of the limit; 0 when no limit is set
    pub percentage: f64,
    pub level: WipLevel,
}

/// Evaluate a column's task count against its WIP limit. Total function:
/// a column with no (positive) limit is always `Safe` at 0%.
pub fn wip_status(column: &Column) -> WipStatus {
    let max_tasks = match column.max_tasks {
        Some(max) if max > 0 => max,
        _ => {
            return WipStatus {
                percentage: 0.0,
                level: WipLevel::Safe,
            }
        }
    };

    let percentage = column.task_count() as f64 / f64::from(max_tasks) * 100.0;
    let level = if percentage >= 100.0 {
        WipLevel::Limit
    } else if percentage >= 80.0 {
        WipLevel::Warning
    } else {
        WipLevel::Safe
    };

    WipStatus { percentage, level }
}

/// Whether the column has reached (or exceeded) its WIP limit
pub fn at_wip_limit(column: &Column) -> bool {
    match column.max_tasks {
        Some(max) if max > 0 => column.task_count() >= max as usize,
        _ => false,
    }
}

/// Whether adding `additional` tasks would push the column past its limit
pub fn would_exceed_wip_limit(column: &Column, additional: usize) -> bool {
    match column.max_tasks {
        Some(max) if max > 0 => column.task_count() + additional > max as usize,
        _ => false,
    }
}
