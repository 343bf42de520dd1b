//! Compiled-in default board: the four fixed lanes the reference deployment
//! seeds when no saved state exists.

use crate::types::{BoardState, Column};

/// Build the default board: To Do / In Progress / Review / Done, no tasks.
/// In Progress carries the only seeded WIP limit.
pub fn default_board() -> BoardState {
    let columns = vec![
        Column::new("todo", "To Do", "#0ea5e9"),
        Column::new("in-progress", "In Progress", "#f59e0b").with_max_tasks(3),
        Column::new("review", "Review", "#8b5cf6"),
        Column::new("done", "Done", "#10b981"),
    ];

    let mut board = BoardState::new();
    for column in columns {
        board.column_order.push(column.id.clone());
        board.columns.insert(column.id.clone(), column);
    }
    board
}
