//! Full legal-move index recomputation.
//!
//! Walks every piece of the side to move through its movement template,
//! filters out self-check outcomes with the simulate-restore primitive, and
//! appends the castling and en-passant destinations the templates cannot
//! express.

use crate::game_state::chess_types::{
    move_board_location, BoardLocation, Color, PieceKind, SafeSquares,
};
use crate::game_state::game_state::GameState;
use crate::move_generation::attack_detection::is_position_safe_after_move;
use crate::move_generation::special_move_checks::{can_capture_en_passant, can_castle};

/// Rebuilds the legal-move index for the side to move from scratch.
///
/// Only origins with at least one legal destination are stored.
pub fn find_safe_squares(game_state: &mut GameState) -> SafeSquares {
    let mut safe_squares = SafeSquares::new();

    for file in 0..8i8 {
        for rank in 0..8i8 {
            let location: BoardLocation = (file, rank);
            let Some(piece) = *game_state.piece_register.view(&location) else {
                continue;
            };
            if piece.color != game_state.side_to_move {
                continue;
            }

            let mut piece_safe_squares: Vec<BoardLocation> = Vec::new();

            for &(d_file, d_rank) in piece.directions() {
                let Ok(mut target) = move_board_location(&location, d_file, d_rank) else {
                    continue;
                };

                let occupant = *game_state.piece_register.view(&target);
                if let Some(other) = occupant {
                    if other.color == piece.color {
                        continue;
                    }
                }

                if piece.kind == PieceKind::Pawn {
                    // A two-square advance needs the destination and the
                    // square it passes over to both be empty.
                    if d_rank == 2 || d_rank == -2 {
                        if occupant.is_some() {
                            continue;
                        }
                        let passed: BoardLocation =
                            (target.0, target.1 + if d_rank == 2 { -1 } else { 1 });
                        if game_state.piece_register.view(&passed).is_some() {
                            continue;
                        }
                    }

                    // One square straight only onto an empty square.
                    if (d_rank == 1 || d_rank == -1) && d_file == 0 && occupant.is_some() {
                        continue;
                    }

                    // A diagonal step must capture an enemy piece.
                    if (d_file == 1 || d_file == -1)
                        && !matches!(occupant, Some(other) if other.color != piece.color)
                    {
                        continue;
                    }
                }

                if piece.is_sliding() {
                    loop {
                        let occupant = *game_state.piece_register.view(&target);
                        if matches!(occupant, Some(other) if other.color == piece.color) {
                            break;
                        }

                        if is_position_safe_after_move(game_state, &location, &target) {
                            piece_safe_squares.push(target);
                        }

                        // A capture terminates the ray.
                        if occupant.is_some() {
                            break;
                        }

                        match move_board_location(&target, d_file, d_rank) {
                            Ok(next) => target = next,
                            Err(_) => break,
                        }
                    }
                } else if is_position_safe_after_move(game_state, &location, &target) {
                    piece_safe_squares.push(target);
                }
            }

            if piece.kind == PieceKind::King {
                if can_castle(game_state, &piece, true) {
                    piece_safe_squares.push((6, rank));
                }
                if can_castle(game_state, &piece, false) {
                    piece_safe_squares.push((2, rank));
                }
            } else if piece.kind == PieceKind::Pawn
                && can_capture_en_passant(game_state, &piece, &location)
            {
                if let Some(last_move) = game_state.last_move {
                    let d_rank: i8 = if piece.color == Color::Light { 1 } else { -1 };
                    piece_safe_squares.push((last_move.start.0, rank + d_rank));
                }
            }

            if !piece_safe_squares.is_empty() {
                safe_squares.insert(location, piece_safe_squares);
            }
        }
    }

    safe_squares
}
