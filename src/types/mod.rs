//! Core types for the board engine

mod board;
mod column;
mod ids;
mod task;

// Re-export all types
pub use board::BoardState;
pub use column::{Column, ColumnUpdate};
pub use ids::{ColumnId, TaskId};
pub use task::{sort_by_priority, Priority, Task, TaskDraft, TaskUpdate};
