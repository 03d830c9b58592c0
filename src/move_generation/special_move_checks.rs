//! Castling and en-passant eligibility.
//!
//! Both checks are read-mostly but lean on the simulate-restore primitive,
//! so they take the engine mutably and leave the register exactly as found.

use crate::game_state::chess_types::{BoardLocation, Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::game_state::piece::Piece;
use crate::move_generation::attack_detection::is_position_safe_after_move;

/// Castling eligibility for `king` toward the given side.
///
/// Requires an unmoved king and rook, a king not currently in check, empty
/// squares between them (queen-side also the knight square next to the
/// rook), and both squares the king transits through to be safe.
pub fn can_castle(game_state: &mut GameState, king: &Piece, king_side: bool) -> bool {
    if king.has_moved() {
        return false;
    }

    let king_rank: i8 = if king.color == Color::Light { 0 } else { 7 };
    let king_location: BoardLocation = (4, king_rank);
    let rook_location: BoardLocation = (if king_side { 7 } else { 0 }, king_rank);

    let rook_ok = matches!(
        *game_state.piece_register.view(&rook_location),
        Some(rook) if rook.kind == PieceKind::Rook && !rook.has_moved()
    );
    if !rook_ok || game_state.check_state.is_in_check() {
        return false;
    }

    let step: i8 = if king_side { 1 } else { -1 };
    let first_step: BoardLocation = (4 + step, king_rank);
    let second_step: BoardLocation = (4 + 2 * step, king_rank);

    if game_state.piece_register.view(&first_step).is_some()
        || game_state.piece_register.view(&second_step).is_some()
    {
        return false;
    }

    // Queen-side additionally needs the square next to the rook clear.
    if !king_side && game_state.piece_register.view(&(1, king_rank)).is_some() {
        return false;
    }

    is_position_safe_after_move(game_state, &king_location, &first_step)
        && is_position_safe_after_move(game_state, &king_location, &second_step)
}

/// En-passant eligibility for the pawn standing at `location`.
///
/// The last move must have been an enemy pawn advancing exactly two ranks,
/// landing on the same rank and an adjacent file, and capturing it must
/// leave the mover's king safe (probed with the enemy pawn temporarily
/// removed).
pub fn can_capture_en_passant(
    game_state: &mut GameState,
    pawn: &Piece,
    location: &BoardLocation,
) -> bool {
    let Some(last_move) = game_state.last_move else {
        return false;
    };

    if last_move.piece.kind != PieceKind::Pawn
        || pawn.color != game_state.side_to_move
        || (last_move.stop.1 - last_move.start.1).abs() != 2
        || location.1 != last_move.stop.1
        || (location.0 - last_move.stop.0).abs() != 1
    {
        return false;
    }

    let d_rank: i8 = if pawn.color == Color::Light { 1 } else { -1 };
    let capture_stop: BoardLocation = (last_move.stop.0, location.1 + d_rank);

    let enemy_pawn = *game_state.piece_register.view(&last_move.stop);
    *game_state.piece_register.at(&last_move.stop) = None;
    let is_safe = is_position_safe_after_move(game_state, location, &capture_stop);
    *game_state.piece_register.at(&last_move.stop) = enemy_pawn;

    is_safe
}
