//! Conversions between board locations and algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the internal
//! (file, rank) representation reused by the FEN generator, the notation
//! writer, and the play binary.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::BoardLocation;

/// File index (`0..=7`) to its letter (`'a'..='h'`).
#[inline]
pub fn file_char(file: i8) -> char {
    char::from(b'a' + file as u8)
}

/// Rank index (`0..=7`) to its digit (`'1'..='8'`).
#[inline]
pub fn rank_char(rank: i8) -> char {
    char::from(b'1' + rank as u8)
}

/// Convert a location to algebraic notation (for example: "e4").
#[inline]
pub fn location_to_algebraic(location: &BoardLocation) -> String {
    format!("{}{}", file_char(location.0), rank_char(location.1))
}

/// Parse algebraic notation (for example: "e4") into a location.
pub fn algebraic_to_location(square: &str) -> Result<BoardLocation, ChessErrors> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let file = match bytes[0] {
        file @ b'a'..=b'h' => (file - b'a') as i8,
        other => return Err(ChessErrors::InvalidAlgebraicChar(other as char)),
    };
    let rank = match bytes[1] {
        rank @ b'1'..=b'8' => (rank - b'1') as i8,
        other => return Err(ChessErrors::InvalidAlgebraicChar(other as char)),
    };

    Ok((file, rank))
}

/// "file,rank" key form used by the UI-facing legal-move index.
#[inline]
pub fn location_to_coordinate_key(location: &BoardLocation) -> String {
    format!("{},{}", location.0, location.1)
}
