//! Attack tracing and the simulate-restore legality primitive.
//!
//! `is_in_check` walks every enemy movement template looking at the king of
//! the given color; `is_position_safe_after_move` temporarily applies a move
//! to the register, probes for check without recording, and restores both
//! squares before returning.

use crate::game_state::chess_types::{
    move_board_location, BoardLocation, CheckState, Color, PieceKind,
};
use crate::game_state::game_state::GameState;

/// Check detection for `color`.
///
/// Sliding pieces extend each template vector into a ray that stops at the
/// first occupied square; step pieces test only the immediate offset, and a
/// pawn threatens only its two diagonal vectors. With `record_state` set the
/// outcome is persisted into the engine's check state; look-ahead probes
/// (legality simulation) pass `false` and leave it untouched.
pub fn is_in_check(game_state: &mut GameState, color: Color, record_state: bool) -> bool {
    for file in 0..8i8 {
        for rank in 0..8i8 {
            let location: BoardLocation = (file, rank);
            let Some(piece) = *game_state.piece_register.view(&location) else {
                continue;
            };
            if piece.color == color {
                continue;
            }

            for &(d_file, d_rank) in piece.directions() {
                let Ok(mut target) = move_board_location(&location, d_file, d_rank) else {
                    continue;
                };

                if piece.is_sliding() {
                    loop {
                        let attacked = *game_state.piece_register.view(&target);
                        if let Some(attacked) = attacked {
                            if attacked.kind == PieceKind::King && attacked.color == color {
                                if record_state {
                                    game_state.check_state = CheckState::InCheck(target);
                                }
                                return true;
                            }
                            // The ray is blocked by whatever stands here.
                            break;
                        }
                        match move_board_location(&target, d_file, d_rank) {
                            Ok(next) => target = next,
                            Err(_) => break,
                        }
                    }
                } else {
                    // Pawns attack only diagonally, never along their
                    // forward vectors.
                    if piece.kind == PieceKind::Pawn && d_file == 0 {
                        continue;
                    }

                    let attacked = *game_state.piece_register.view(&target);
                    if let Some(attacked) = attacked {
                        if attacked.kind == PieceKind::King && attacked.color == color {
                            if record_state {
                                game_state.check_state = CheckState::InCheck(target);
                            }
                            return true;
                        }
                    }
                }
            }
        }
    }

    if record_state {
        game_state.check_state = CheckState::NotInCheck;
    }
    false
}

/// Legality simulation: would the mover's own king be safe after taking the
/// piece at `start` to `stop`?
///
/// The register is mutated for the duration of the probe and restored
/// exactly before returning; nothing else may touch the grid while the
/// simulation is in flight (the engine is single-writer by contract).
pub fn is_position_safe_after_move(
    game_state: &mut GameState,
    start: &BoardLocation,
    stop: &BoardLocation,
) -> bool {
    let Some(piece) = *game_state.piece_register.view(start) else {
        return false;
    };

    let stop_occupant = *game_state.piece_register.view(stop);
    if let Some(other) = stop_occupant {
        if other.color == piece.color {
            return false;
        }
    }

    // Simulate the move.
    *game_state.piece_register.at(start) = None;
    *game_state.piece_register.at(stop) = Some(piece);

    let is_safe = !is_in_check(game_state, piece.color, false);

    // Restore both squares.
    *game_state.piece_register.at(start) = Some(piece);
    *game_state.piece_register.at(stop) = stop_occupant;

    is_safe
}
