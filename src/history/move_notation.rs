//! Algebraic notation strings for the move list.
//!
//! Castling renders as "O-O"/"O-O-O"; every other move as the piece's FEN
//! character (empty for pawns), origin square, "x" on capture, destination
//! square, "=" plus the uppercase piece letter on promotion, and a trailing
//! "+" or "#" for check or checkmate.

use crate::game_state::chess_types::{
    LastMove, PieceKind, TAG_CAPTURE, TAG_CASTLING, TAG_CHECK, TAG_CHECK_MATE,
};
use crate::utils::algebraic::location_to_algebraic;

pub fn notation_for_last_move(last_move: &LastMove, promotion: Option<PieceKind>) -> String {
    let tags = last_move.tags;

    let mut notation = if tags.has(TAG_CASTLING) {
        if last_move.stop.0 - last_move.start.0 == 2 {
            "O-O".to_owned()
        } else {
            "O-O-O".to_owned()
        }
    } else {
        let mut out = String::new();
        if last_move.piece.kind != PieceKind::Pawn {
            out.push(last_move.piece.fen_char());
        }
        out.push_str(&location_to_algebraic(&last_move.start));
        if tags.has(TAG_CAPTURE) {
            out.push('x');
        }
        out.push_str(&location_to_algebraic(&last_move.stop));
        if let Some(kind) = promotion {
            out.push('=');
            out.push(promotion_letter(kind));
        }
        out
    };

    if tags.has(TAG_CHECK) {
        notation.push('+');
    } else if tags.has(TAG_CHECK_MATE) {
        notation.push('#');
    }

    notation
}

fn promotion_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Pawn => 'P',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Rook => 'R',
        PieceKind::Queen => 'Q',
        PieceKind::King => 'K',
    }
}

#[cfg(test)]
mod tests {
    use super::notation_for_last_move;
    use crate::game_state::chess_types::{
        Color, LastMove, MoveTags, PieceKind, TAG_CAPTURE, TAG_CASTLING, TAG_CHECK, TAG_CHECK_MATE,
    };
    use crate::game_state::piece::Piece;

    fn last_move(piece: Piece, start: (i8, i8), stop: (i8, i8), tag_bits: u8) -> LastMove {
        LastMove {
            piece,
            start,
            stop,
            tags: MoveTags(tag_bits),
        }
    }

    #[test]
    fn pawn_moves_omit_the_piece_letter() {
        let mv = last_move(Piece::new(PieceKind::Pawn, Color::Light), (4, 1), (4, 3), 0);
        assert_eq!(notation_for_last_move(&mv, None), "e2e4");
    }

    #[test]
    fn captures_and_checks_are_annotated() {
        let mv = last_move(
            Piece::new(PieceKind::Knight, Color::Light),
            (5, 2),
            (4, 4),
            TAG_CAPTURE | TAG_CHECK,
        );
        assert_eq!(notation_for_last_move(&mv, None), "Nf3xe5+");
    }

    #[test]
    fn dark_pieces_use_lowercase_letters() {
        let mv = last_move(
            Piece::new(PieceKind::Queen, Color::Dark),
            (3, 7),
            (7, 3),
            TAG_CHECK_MATE,
        );
        assert_eq!(notation_for_last_move(&mv, None), "qd8h4#");
    }

    #[test]
    fn castling_notation_depends_on_the_side() {
        let king_side = last_move(
            Piece::new(PieceKind::King, Color::Light),
            (4, 0),
            (6, 0),
            TAG_CASTLING,
        );
        assert_eq!(notation_for_last_move(&king_side, None), "O-O");

        let queen_side = last_move(
            Piece::new(PieceKind::King, Color::Dark),
            (4, 7),
            (2, 7),
            TAG_CASTLING,
        );
        assert_eq!(notation_for_last_move(&queen_side, None), "O-O-O");
    }

    #[test]
    fn promotion_letter_is_always_uppercase() {
        let mv = last_move(Piece::new(PieceKind::Pawn, Color::Dark), (0, 1), (0, 0), 0);
        assert_eq!(
            notation_for_last_move(&mv, Some(PieceKind::Knight)),
            "a2a1=N"
        );
    }
}
