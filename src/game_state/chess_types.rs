//! Core value types shared across the engine.
//!
//! Colors, piece kinds, board coordinates, per-ply move tags, and the
//! snapshot structures exposed to UI collaborators all live here so every
//! subsystem can import stable definitions from one place.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chess_errors::ChessErrors;
use crate::game_state::piece::Piece;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Color {
    /// The light (white) side.
    Light,
    /// The dark (black) side.
    Dark,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Human-facing name used in game-over messages.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Light => "White",
            Color::Dark => "Black",
        }
    }

    /// FEN side-to-move letter.
    #[inline]
    pub const fn fen_letter(self) -> char {
        match self {
            Color::Light => 'w',
            Color::Dark => 'b',
        }
    }
}

/// Piece kind (color is carried separately on `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Zero-based (file, rank) coordinate. `(0, 0)` is a1, `(7, 7)` is h8.
pub type BoardLocation = (i8, i8);

/// True when both components lie inside the 8x8 board.
#[inline]
pub fn are_coords_valid(x: &BoardLocation) -> bool {
    (0..8).contains(&x.0) && (0..8).contains(&x.1)
}

/// Moves a board location by a specified file and rank offset.
///
/// Returns the new board location if within bounds, otherwise an error.
pub fn move_board_location(
    x: &BoardLocation,
    d_file: i8,
    d_rank: i8,
) -> Result<BoardLocation, ChessErrors> {
    let y: BoardLocation = (x.0 + d_file, x.1 + d_rank);
    if (y.0 < 0) | (y.0 > 7) | (y.1 < 0) | (y.1 > 7) {
        Err(ChessErrors::TriedToMoveOutOfBounds((*x, d_file, d_rank)))
    } else {
        Ok(y)
    }
}

/// Chess-semantic events observed on a single ply, as a compact bitmask.
pub const TAG_BASIC_MOVE: u8 = 1 << 0;
pub const TAG_CAPTURE: u8 = 1 << 1;
pub const TAG_CASTLING: u8 = 1 << 2;
pub const TAG_PROMOTION: u8 = 1 << 3;
pub const TAG_CHECK: u8 = 1 << 4;
pub const TAG_CHECK_MATE: u8 = 1 << 5;

/// Set of move tags for one ply. The tags describe what happened on the
/// turn (for notation and en-passant eligibility), never how legality was
/// derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoveTags(pub u8);

impl MoveTags {
    #[inline]
    pub fn insert(&mut self, tag: u8) {
        self.0 |= tag;
    }

    #[inline]
    pub const fn has(self, tag: u8) -> bool {
        (self.0 & tag) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Whether the side to move is in check, and where its king stands if so.
///
/// Recomputed once per ply, reflecting the position after the move and the
/// color flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckState {
    NotInCheck,
    InCheck(BoardLocation),
}

impl CheckState {
    #[inline]
    pub const fn is_in_check(self) -> bool {
        matches!(self, CheckState::InCheck(_))
    }
}

/// Record of the most recently applied ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastMove {
    /// The piece that moved, with its `has_moved` flag already set.
    pub piece: Piece,
    pub start: BoardLocation,
    pub stop: BoardLocation,
    pub tags: MoveTags,
}

/// Read-only board projection: one FEN character per occupied square,
/// indexed `[file][rank]`. Uppercase is Light, lowercase is Dark.
pub type BoardView = [[Option<char>; 8]; 8];

/// Legal-move index: every origin square holding a piece of the side to
/// move maps to its legal destinations. Origins with no legal destination
/// are omitted. Rebuilt in full after every applied ply.
pub type SafeSquares = BTreeMap<BoardLocation, Vec<BoardLocation>>;

#[cfg(test)]
mod tests {
    use super::{are_coords_valid, move_board_location, Color, MoveTags, TAG_CAPTURE, TAG_CHECK};

    #[test]
    fn board_location_offsets_stay_inside_the_board() {
        assert_eq!(move_board_location(&(4, 1), 0, 2).expect("e2 + 2 ranks"), (4, 3));
        assert!(move_board_location(&(7, 7), 1, 0).is_err());
        assert!(move_board_location(&(0, 0), 0, -1).is_err());
        assert!(are_coords_valid(&(0, 7)));
        assert!(!are_coords_valid(&(8, 0)));
        assert!(!are_coords_valid(&(3, -1)));
    }

    #[test]
    fn color_helpers() {
        assert_eq!(Color::Light.opposite(), Color::Dark);
        assert_eq!(Color::Dark.name(), "Black");
        assert_eq!(Color::Light.fen_letter(), 'w');
    }

    #[test]
    fn move_tags_accumulate() {
        let mut tags = MoveTags::default();
        assert!(tags.is_empty());
        tags.insert(TAG_CAPTURE);
        tags.insert(TAG_CHECK);
        assert!(tags.has(TAG_CAPTURE));
        assert!(tags.has(TAG_CHECK));
        assert!(!tags.is_empty());
    }
}
