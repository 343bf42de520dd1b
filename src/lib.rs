//! Kanban board state engine with pluggable key-value persistence
//!
//! This crate implements the state model behind an interactive task board:
//! ordered, named lanes ("columns") holding ordered work items ("tasks"),
//! mutated by structured CRUD edits and by drag-and-drop moves, with
//! optional per-column WIP limits. It is an embedded library - rendering,
//! gesture recognition, and form UI are the consumer's concern.
//!
//! ## Overview
//!
//! - **One store = one board** - [`BoardStore`] owns the canonical state and
//!   is its sole mutator; readers work from ordered views or snapshots
//! - **Pure engines** - same-column [`reorder()`] and cross-column
//!   [`move_between_columns()`] compute new sequences without touching state
//! - **Defensive event path** - unknown task/column references from the drag
//!   layer degrade to logged no-ops, never a crash or a corrupted board
//! - **Injected persistence** - the whole board serializes to one JSON blob
//!   in a [`Storage`] slot after every mutation, fire-and-forget; tests run
//!   against [`MemoryStorage`], deployments against [`FileStorage`]
//!
//! ## Basic Usage
//!
//! ```
//! use taskboard::{validate_task, BoardStore, ColumnId, MemoryStorage, TaskDraft};
//!
//! // No saved state: opens the default four-lane board
//! let mut store = BoardStore::open(MemoryStorage::new());
//!
//! let draft = TaskDraft::new("Ship the release").with_assignee("Robin");
//! assert!(validate_task(&draft).valid);
//!
//! let todo = ColumnId::from_string("todo");
//! let task_id = store
//!     .create_task(&todo, draft)
//!     .expect("default board has a todo column");
//!
//! // A terminal drop moves the card
//! let done = ColumnId::from_string("done");
//! store.move_task(&task_id, &todo, &done, 0);
//! assert_eq!(store.task(&task_id).unwrap().status, done);
//! ```
//!
//! ## Persistence Format
//!
//! A single slot (`kanban-board-state`) holds the whole board:
//!
//! ```text
//! {
//!   "columns":     { "<id>": { "id", "title", "color", "taskIds", "maxTasks"? } },
//!   "tasks":       { "<id>": { "id", "title", "description", "status",
//!                              "priority", "assignee", "tags",
//!                              "createdAt", "dueDate"? } },
//!   "columnOrder": [ "<id>", ... ]
//! }
//! ```
//!
//! Timestamps travel as ISO-8601 text and come back as `DateTime<Utc>` -
//! date-typed fields are rehydrated on load by construction.

pub mod defaults;
pub mod drag;
mod error;
pub mod reorder;
pub mod storage;
mod store;
pub mod types;
pub mod validate;
pub mod wip;

pub use defaults::default_board;
pub use drag::{DragEvent, MoveRequest};
pub use error::{BoardError, Result};
pub use reorder::{move_between_columns, reorder};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{BoardStore, STORAGE_KEY};

// Re-export commonly used types
pub use types::{
    sort_by_priority, BoardState, Column, ColumnId, ColumnUpdate, Priority, Task, TaskDraft,
    TaskId, TaskUpdate,
};
pub use validate::{validate_column, validate_task, Validation};
pub use wip::{at_wip_limit, wip_status, would_exceed_wip_limit, WipLevel, WipStatus};
