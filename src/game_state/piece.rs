//! Piece model: movement templates and the one-way `has_moved` flag.
//!
//! Templates are static sets of relative (d_file, d_rank) vectors dispatched
//! by exhaustive matching on the piece kind. A pawn's template collapses from
//! four vectors to three once it has moved, which is what retires the
//! two-square opening step; the pawn vectors are mirrored by color.

use serde::Serialize;

use crate::game_state::chess_types::{Color, PieceKind};

/// Relative (d_file, d_rank) movement vector.
pub type Direction = (i8, i8);

const KING_DIRECTIONS: [Direction; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_DIRECTIONS: [Direction; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const BISHOP_DIRECTIONS: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ROOK_DIRECTIONS: [Direction; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const QUEEN_DIRECTIONS: [Direction; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// Pawn templates: single step, the two diagonal captures, and (until the
// pawn moves) the two-square opening step.
const LIGHT_PAWN_START_DIRECTIONS: [Direction; 4] = [(0, 1), (1, 1), (-1, 1), (0, 2)];
const LIGHT_PAWN_MOVED_DIRECTIONS: [Direction; 3] = [(0, 1), (1, 1), (-1, 1)];
const DARK_PAWN_START_DIRECTIONS: [Direction; 4] = [(0, -1), (1, -1), (-1, -1), (0, -2)];
const DARK_PAWN_MOVED_DIRECTIONS: [Direction; 3] = [(0, -1), (1, -1), (-1, -1)];

/// A chess piece: kind, owning color, and whether it has ever moved.
///
/// The `has_moved` flag is consulted for pawns (double-step eligibility and
/// template narrowing), kings and rooks (castling rights); it transitions
/// one way only, through `mark_moved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    /// The movement template for this piece in its current state.
    pub fn directions(&self) -> &'static [Direction] {
        match (self.kind, self.color, self.has_moved) {
            (PieceKind::Pawn, Color::Light, false) => &LIGHT_PAWN_START_DIRECTIONS,
            (PieceKind::Pawn, Color::Light, true) => &LIGHT_PAWN_MOVED_DIRECTIONS,
            (PieceKind::Pawn, Color::Dark, false) => &DARK_PAWN_START_DIRECTIONS,
            (PieceKind::Pawn, Color::Dark, true) => &DARK_PAWN_MOVED_DIRECTIONS,
            (PieceKind::Knight, ..) => &KNIGHT_DIRECTIONS,
            (PieceKind::Bishop, ..) => &BISHOP_DIRECTIONS,
            (PieceKind::Rook, ..) => &ROOK_DIRECTIONS,
            (PieceKind::Queen, ..) => &QUEEN_DIRECTIONS,
            (PieceKind::King, ..) => &KING_DIRECTIONS,
        }
    }

    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// One-way transition. For pawns this also narrows the template returned
    /// by `directions` to the post-move three-vector set.
    #[inline]
    pub fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    /// True for pieces whose template vectors extend into rays.
    #[inline]
    pub const fn is_sliding(&self) -> bool {
        matches!(
            self.kind,
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// FEN character: uppercase for Light, lowercase for Dark.
    pub fn fen_char(&self) -> char {
        let base = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::Light => base.to_ascii_uppercase(),
            Color::Dark => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Piece;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn pawn_template_narrows_after_first_move() {
        let mut pawn = Piece::new(PieceKind::Pawn, Color::Light);
        assert_eq!(pawn.directions().len(), 4);
        assert!(pawn.directions().contains(&(0, 2)));

        pawn.mark_moved();
        assert_eq!(pawn.directions().len(), 3);
        assert!(!pawn.directions().contains(&(0, 2)));
        assert!(pawn.has_moved());
    }

    #[test]
    fn dark_pawn_template_is_mirrored() {
        let pawn = Piece::new(PieceKind::Pawn, Color::Dark);
        assert!(pawn.directions().contains(&(0, -1)));
        assert!(pawn.directions().contains(&(0, -2)));
        assert!(pawn.directions().contains(&(1, -1)));
        assert!(pawn.directions().contains(&(-1, -1)));
    }

    #[test]
    fn static_templates_have_expected_sizes() {
        assert_eq!(Piece::new(PieceKind::Knight, Color::Light).directions().len(), 8);
        assert_eq!(Piece::new(PieceKind::Bishop, Color::Dark).directions().len(), 4);
        assert_eq!(Piece::new(PieceKind::Rook, Color::Light).directions().len(), 4);
        assert_eq!(Piece::new(PieceKind::Queen, Color::Dark).directions().len(), 8);
        assert_eq!(Piece::new(PieceKind::King, Color::Light).directions().len(), 8);
    }

    #[test]
    fn sliding_classification_and_fen_chars() {
        assert!(Piece::new(PieceKind::Queen, Color::Light).is_sliding());
        assert!(!Piece::new(PieceKind::Knight, Color::Light).is_sliding());
        assert_eq!(Piece::new(PieceKind::Knight, Color::Light).fen_char(), 'N');
        assert_eq!(Piece::new(PieceKind::King, Color::Dark).fen_char(), 'k');
    }
}
