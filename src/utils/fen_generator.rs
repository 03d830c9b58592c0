//! Position encoding: board state to Forsyth-Edwards Notation.
//!
//! Produces the six-field encoding from the register, side to move, last
//! move, fifty-move counter, and full-move number. Castling rights are
//! derived from the has-moved flags, the en-passant target from a pawn
//! double-step last move. Decoding is out of scope; collaborators only
//! consume the encoded string.

use crate::game_state::chess_types::{BoardLocation, Color, LastMove, PieceKind};
use crate::game_state::game_state::GameState;
use crate::game_state::piece_register::PieceRegister;
use crate::utils::algebraic::file_char;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(&game_state.piece_register);
    let side_to_move = game_state.side_to_move.fen_letter();
    let castling = generate_castling_field(&game_state.piece_register);
    let en_passant =
        generate_en_passant_field(game_state.last_move.as_ref(), game_state.side_to_move);
    // The counter advances by 0.5 per ply; the FEN halfmove field counts
    // whole plies.
    let halfmove_clock = (game_state.fifty_move_rule_counter * 2.0) as u16;

    format!(
        "{} {} {} {} {} {}",
        board, side_to_move, castling, en_passant, halfmove_clock, game_state.full_move_number
    )
}

fn generate_board_field(register: &PieceRegister) -> String {
    let mut out = String::new();

    for rank in (0..8i8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8i8 {
            match register.view(&(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

/// King-side then queen-side letters per color, uppercase for Light; "-"
/// when neither side retains any right. A right survives while the king and
/// the corresponding rook both sit on their home squares unmoved.
fn generate_castling_field(register: &PieceRegister) -> String {
    let mut out = String::new();

    for color in [Color::Light, Color::Dark] {
        let home_rank: i8 = if color == Color::Light { 0 } else { 7 };

        let king_unmoved = matches!(
            register.view(&(4, home_rank)),
            Some(piece) if piece.kind == PieceKind::King && !piece.has_moved()
        );
        if !king_unmoved {
            continue;
        }

        let mut rights = String::new();
        if rook_unmoved(register, &(7, home_rank)) {
            rights.push('k');
        }
        if rook_unmoved(register, &(0, home_rank)) {
            rights.push('q');
        }
        if color == Color::Light {
            rights = rights.to_uppercase();
        }
        out.push_str(&rights);
    }

    if out.is_empty() {
        out.push('-');
    }
    out
}

fn rook_unmoved(register: &PieceRegister, location: &BoardLocation) -> bool {
    matches!(
        register.view(location),
        Some(piece) if piece.kind == PieceKind::Rook && !piece.has_moved()
    )
}

/// Present only when the last move was a pawn advancing two ranks: the file
/// of that pawn plus the rank it passed over (rank 6 when Light is to move,
/// rank 3 otherwise).
fn generate_en_passant_field(last_move: Option<&LastMove>, color: Color) -> String {
    let Some(last_move) = last_move else {
        return "-".to_owned();
    };

    if last_move.piece.kind == PieceKind::Pawn && (last_move.stop.1 - last_move.start.1).abs() == 2
    {
        let rank = if color == Color::Light { '6' } else { '3' };
        return format!("{}{}", file_char(last_move.start.0), rank);
    }

    "-".to_owned()
}
