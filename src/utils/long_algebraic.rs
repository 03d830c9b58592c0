//! Long-algebraic move strings ("e2e4", "e7e8q").
//!
//! This is the coordinate format external move oracles emit and the play
//! binary accepts: origin square, destination square, and an optional
//! promotion letter.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{BoardLocation, PieceKind};
use crate::utils::algebraic::{algebraic_to_location, location_to_algebraic};

/// A parsed long-algebraic move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongAlgebraicMove {
    pub start: BoardLocation,
    pub stop: BoardLocation,
    pub promotion: Option<PieceKind>,
}

/// Parse a 4/5-character move string such as "e2e4" or "e7e8q".
pub fn parse_long_algebraic(input: &str) -> Result<LongAlgebraicMove, ChessErrors> {
    let input = input.trim();
    if !input.is_ascii() || (input.len() != 4 && input.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraicString(input.to_owned()));
    }

    let start = algebraic_to_location(&input[0..2])?;
    let stop = algebraic_to_location(&input[2..4])?;

    let promotion = if input.len() == 5 {
        Some(promotion_kind(input.as_bytes()[4] as char)?)
    } else {
        None
    };

    Ok(LongAlgebraicMove {
        start,
        stop,
        promotion,
    })
}

/// Format a move as a long-algebraic string.
pub fn format_long_algebraic(
    start: &BoardLocation,
    stop: &BoardLocation,
    promotion: Option<PieceKind>,
) -> String {
    let mut out = format!(
        "{}{}",
        location_to_algebraic(start),
        location_to_algebraic(stop)
    );
    if let Some(kind) = promotion {
        out.push(match kind {
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            // Queen stands in for anything unexpected; the engine only ever
            // promotes to the four piece kinds the parser accepts.
            _ => 'q',
        });
    }
    out
}

fn promotion_kind(letter: char) -> Result<PieceKind, ChessErrors> {
    match letter {
        'n' | 'N' => Ok(PieceKind::Knight),
        'b' | 'B' => Ok(PieceKind::Bishop),
        'r' | 'R' => Ok(PieceKind::Rook),
        'q' | 'Q' => Ok(PieceKind::Queen),
        other => Err(ChessErrors::InvalidAlgebraicChar(other)),
    }
}
