//! Per-ply snapshots for read-side navigation.
//!
//! One entry is appended after every applied ply (plus one for the initial
//! position). Entries are never mutated after the append; UI collaborators
//! use them to step back through the game.

use serde::Serialize;

use crate::game_state::chess_types::{BoardView, CheckState, LastMove};

/// Snapshot of the board, check state, and last move after one ply.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub board: BoardView,
    pub check_state: CheckState,
    pub last_move: Option<LastMove>,
}
