//! The 8x8 piece register.
//!
//! Owns the grid of optional pieces. Only the engine's move-application
//! routine and the legality simulation mutate it; everything else reads
//! through `view` or the FEN-character projection.

use crate::game_state::chess_types::{BoardLocation, BoardView, Color, PieceKind};
use crate::game_state::piece::Piece;

#[derive(Debug, Clone, Default)]
pub struct PieceRegister {
    buffer: [[Option<Piece>; 8]; 8],
}

impl PieceRegister {
    /// Register populated with the standard starting position.
    pub fn new_game() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut register = Self::default();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            register.buffer[file][0] = Some(Piece::new(*kind, Color::Light));
            register.buffer[file][1] = Some(Piece::new(PieceKind::Pawn, Color::Light));
            register.buffer[file][6] = Some(Piece::new(PieceKind::Pawn, Color::Dark));
            register.buffer[file][7] = Some(Piece::new(*kind, Color::Dark));
        }
        register
    }

    #[inline]
    pub fn at(&mut self, x: &BoardLocation) -> &mut Option<Piece> {
        &mut self.buffer[x.0 as usize][x.1 as usize]
    }

    #[inline]
    pub fn view(&self, x: &BoardLocation) -> &Option<Piece> {
        &self.buffer[x.0 as usize][x.1 as usize]
    }

    /// FEN-character projection of the whole grid, for UI collaborators.
    pub fn board_view(&self) -> BoardView {
        let mut view: BoardView = [[None; 8]; 8];
        for file in 0..8usize {
            for rank in 0..8usize {
                view[file][rank] = self.buffer[file][rank].map(|piece| piece.fen_char());
            }
        }
        view
    }

    /// All pieces of one color with their locations, files-then-ranks order.
    pub fn pieces_of_color(&self, color: Color) -> Vec<(Piece, BoardLocation)> {
        let mut pieces = Vec::new();
        for file in 0..8i8 {
            for rank in 0..8i8 {
                if let Some(piece) = self.buffer[file as usize][rank as usize] {
                    if piece.color == color {
                        pieces.push((piece, (file, rank)));
                    }
                }
            }
        }
        pieces
    }

    /// Square-color parity used by the insufficient-material rules.
    /// a1 is a dark square.
    #[inline]
    pub fn is_square_dark(x: &BoardLocation) -> bool {
        (x.0 + x.1) % 2 == 0
    }
}
