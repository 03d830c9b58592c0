//! Errors used throughout the chess engine.
//!
//! This module defines the canonical error type returned by game logic,
//! move generation, and the parsing utilities. The enum `ChessErrors` is used
//! as the single error type across the crate to simplify propagation and
//! matching. Each variant carries contextual information where appropriate.
//!
//! Note that malformed move requests (coordinates outside the board, an empty
//! or enemy-held origin square) are not errors at all: collaborators are
//! expected to pre-validate them, so `GameState::move_piece` ignores them
//! without signal. The variants below cover the conditions that do get
//! surfaced.

use crate::game_state::chess_types::BoardLocation;

/// Unified error type for the chess engine.
///
/// When matching on `ChessErrors`:
/// - Treat `SquareIsNotSafe` as a caller bug or a stale legal-move index:
///   the UI is expected to offer only destinations present in the index.
/// - Treat `GameIsAlreadyOver` as a hard stop; no further state transition
///   is permitted on that game instance.
/// - Treat the algebraic variants as recoverable input errors suitable for
///   presenting to end users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// Attempted to offset a location by `(d_file, d_rank)`, which would
    /// place it off the board.
    ///
    /// Payload: (origin_location, d_file, d_rank)
    TriedToMoveOutOfBounds((BoardLocation, i8, i8)),

    /// A move was submitted after the game already ended.
    GameIsAlreadyOver,

    /// The destination is absent from the legal-move index entry for the
    /// origin square.
    SquareIsNotSafe {
        start: BoardLocation,
        stop: BoardLocation,
    },

    /// A single character used during algebraic parsing was invalid
    /// (a file outside 'a'..'h', a rank outside '1'..'8', or an unknown
    /// promotion letter).
    InvalidAlgebraicChar(char),

    /// An algebraic string (multi-character) failed to parse as a whole.
    ///
    /// Payload: the original string that could not be interpreted as a move.
    InvalidAlgebraicString(String),
}
