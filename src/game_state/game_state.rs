//! Central board engine.
//!
//! `GameState` owns the piece register, the side to move, the legal-move
//! index, check state, draw bookkeeping, and history, and applies moves
//! through the single mutating entry point `move_piece`. Collaborators read
//! the exposed views; they never touch the grid directly. One game is one
//! `GameState` value; concurrent games are simply separate instances.

use std::collections::{BTreeMap, HashMap};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{
    FIFTY_MOVE_RULE_LIMIT, FIFTY_MOVE_RULE_MESSAGE, INSUFFICIENT_MATERIAL_MESSAGE,
    STALEMATE_MESSAGE, STARTING_POSITION_FEN, THREE_FOLD_REPETITION_MESSAGE,
};
use crate::game_state::chess_types::{
    are_coords_valid, BoardLocation, BoardView, CheckState, Color, LastMove, MoveTags, PieceKind,
    SafeSquares, TAG_BASIC_MOVE, TAG_CAPTURE, TAG_CASTLING, TAG_CHECK, TAG_CHECK_MATE,
    TAG_PROMOTION,
};
use crate::game_state::piece::Piece;
use crate::game_state::piece_register::PieceRegister;
use crate::history::game_history::HistoryEntry;
use crate::history::move_notation::notation_for_last_move;
use crate::move_generation::attack_detection::is_in_check;
use crate::move_generation::safe_square_generator::find_safe_squares;
use crate::utils::algebraic::location_to_coordinate_key;
use crate::utils::fen_generator::generate_fen;

/// The engine instance for one game.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) piece_register: PieceRegister,
    pub(crate) side_to_move: Color,
    pub(crate) safe_squares: SafeSquares,
    pub(crate) last_move: Option<LastMove>,
    pub(crate) check_state: CheckState,

    // Draw bookkeeping. The fifty-move counter advances by 0.5 per quiet
    // ply so it reaches the limit after 100 plies by both sides; the
    // repetition dictionary counts reduced position keys.
    pub(crate) fifty_move_rule_counter: f32,
    pub(crate) three_fold_repetition_dictionary: HashMap<String, u8>,
    pub(crate) three_fold_repetition_flag: bool,

    pub(crate) is_game_over: bool,
    pub(crate) game_over_message: Option<String>,
    pub(crate) full_move_number: u16,

    pub(crate) board_as_fen: String,

    pub(crate) move_list: Vec<Vec<String>>,
    pub(crate) game_history: Vec<HistoryEntry>,
}

impl GameState {
    /// A fresh game in the standard starting position.
    pub fn new_game() -> Self {
        let mut game_state = Self {
            piece_register: PieceRegister::new_game(),
            side_to_move: Color::Light,
            safe_squares: SafeSquares::new(),
            last_move: None,
            check_state: CheckState::NotInCheck,
            fifty_move_rule_counter: 0.0,
            three_fold_repetition_dictionary: HashMap::new(),
            three_fold_repetition_flag: false,
            is_game_over: false,
            game_over_message: None,
            full_move_number: 1,
            board_as_fen: STARTING_POSITION_FEN.to_owned(),
            move_list: Vec::new(),
            game_history: Vec::new(),
        };

        game_state.safe_squares = find_safe_squares(&mut game_state);
        game_state.game_history.push(HistoryEntry {
            board: game_state.piece_register.board_view(),
            check_state: game_state.check_state,
            last_move: None,
        });
        game_state
    }

    // --- Read-side views -------------------------------------------------

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// FEN-character projection of the current board.
    pub fn board_view(&self) -> BoardView {
        self.piece_register.board_view()
    }

    /// The legal-move index for the side to move.
    #[inline]
    pub fn safe_squares(&self) -> &SafeSquares {
        &self.safe_squares
    }

    /// The legal-move index keyed by "file,rank" coordinate strings, the
    /// form UI collaborators consume.
    pub fn safe_squares_by_coordinate(&self) -> BTreeMap<String, Vec<String>> {
        self.safe_squares
            .iter()
            .map(|(origin, destinations)| {
                (
                    location_to_coordinate_key(origin),
                    destinations.iter().map(location_to_coordinate_key).collect(),
                )
            })
            .collect()
    }

    #[inline]
    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    #[inline]
    pub fn check_state(&self) -> CheckState {
        self.check_state
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    #[inline]
    pub fn game_over_message(&self) -> Option<&str> {
        self.game_over_message.as_deref()
    }

    /// The position encoding of the current board.
    #[inline]
    pub fn board_as_fen(&self) -> &str {
        &self.board_as_fen
    }

    /// Notation strings paired per full move: `[light, dark?]`.
    #[inline]
    pub fn move_list(&self) -> &[Vec<String>] {
        &self.move_list
    }

    /// Per-ply snapshots, including the initial position.
    #[inline]
    pub fn game_history(&self) -> &[HistoryEntry] {
        &self.game_history
    }

    // --- Move application -------------------------------------------------

    /// Applies a move for the side to move.
    ///
    /// Fails without mutation when the game is already over or the
    /// destination is not in the legal-move index for the origin. Malformed
    /// coordinates and origins that hold no piece of the side to move are
    /// ignored without signal: collaborators are expected to offer only
    /// entries of the published index.
    pub fn move_piece(
        &mut self,
        start: BoardLocation,
        stop: BoardLocation,
        promotion: Option<PieceKind>,
    ) -> Result<(), ChessErrors> {
        if self.is_game_over {
            return Err(ChessErrors::GameIsAlreadyOver);
        }

        if !are_coords_valid(&start) || !are_coords_valid(&stop) {
            return Ok(());
        }

        let Some(mut piece) = *self.piece_register.view(&start) else {
            return Ok(());
        };
        if piece.color != self.side_to_move {
            return Ok(());
        }

        let destination_is_safe = self
            .safe_squares
            .get(&start)
            .is_some_and(|squares| squares.contains(&stop));
        if !destination_is_safe {
            return Err(ChessErrors::SquareIsNotSafe { start, stop });
        }

        if matches!(
            piece.kind,
            PieceKind::Pawn | PieceKind::King | PieceKind::Rook
        ) && !piece.has_moved()
        {
            piece.mark_moved();
        }

        let mut tags = MoveTags::default();

        let is_piece_taken = self.piece_register.view(&stop).is_some();
        if is_piece_taken {
            tags.insert(TAG_CAPTURE);
        }

        if piece.kind == PieceKind::Pawn || is_piece_taken {
            self.fifty_move_rule_counter = 0.0;
        } else {
            // Both players advance the counter, half a move each.
            self.fifty_move_rule_counter += 0.5;
        }

        self.handle_special_moves(&piece, &start, &stop, &mut tags);

        if let Some(promotion_kind) = promotion {
            *self.piece_register.at(&stop) = Some(Piece::new(promotion_kind, self.side_to_move));
            tags.insert(TAG_PROMOTION);
        } else {
            *self.piece_register.at(&stop) = Some(piece);
        }
        *self.piece_register.at(&start) = None;

        self.last_move = Some(LastMove {
            piece,
            start,
            stop,
            tags,
        });
        self.side_to_move = self.side_to_move.opposite();

        let side_to_move = self.side_to_move;
        is_in_check(self, side_to_move, true);
        self.safe_squares = find_safe_squares(self);

        if self.check_state.is_in_check() {
            // An empty index while in check is mate; otherwise the check can
            // still be answered.
            tags.insert(if self.safe_squares.is_empty() {
                TAG_CHECK_MATE
            } else {
                TAG_CHECK
            });
        } else if tags.is_empty() {
            tags.insert(TAG_BASIC_MOVE);
        }
        if let Some(last_move) = self.last_move.as_mut() {
            last_move.tags = tags;
        }

        self.store_move(promotion);
        self.update_game_history();

        // The color has already flipped, so every Light-to-move state marks
        // the end of a full move.
        if self.side_to_move == Color::Light {
            self.full_move_number += 1;
        }

        self.board_as_fen = generate_fen(self);
        self.update_three_fold_repetition_dictionary();

        self.is_game_over = self.is_game_finished();

        Ok(())
    }

    /// Castling relocates the rook; en passant removes the passed pawn.
    /// Runs before the moved piece itself is placed.
    fn handle_special_moves(
        &mut self,
        piece: &Piece,
        start: &BoardLocation,
        stop: &BoardLocation,
        tags: &mut MoveTags,
    ) {
        if piece.kind == PieceKind::King && (stop.0 - start.0).abs() == 2 {
            // A destination file above the origin file is a king-side castle.
            let king_side = stop.0 > start.0;
            let rook_start: BoardLocation = (if king_side { 7 } else { 0 }, start.1);
            let rook_stop: BoardLocation = (if king_side { 5 } else { 3 }, start.1);

            if let Some(mut rook) = self.piece_register.at(&rook_start).take() {
                rook.mark_moved();
                *self.piece_register.at(&rook_stop) = Some(rook);
            }
            tags.insert(TAG_CASTLING);
        } else if piece.kind == PieceKind::Pawn {
            let Some(last_move) = self.last_move else {
                return;
            };
            if last_move.piece.kind == PieceKind::Pawn
                && (last_move.stop.1 - last_move.start.1).abs() == 2
                && start.1 == last_move.stop.1
                && stop.0 == last_move.stop.0
            {
                *self.piece_register.at(&last_move.stop) = None;
                tags.insert(TAG_CAPTURE);
            }
        }
    }

    fn store_move(&mut self, promotion: Option<PieceKind>) {
        let Some(last_move) = self.last_move else {
            return;
        };
        let notation = notation_for_last_move(&last_move, promotion);

        match self.move_list.get_mut(self.full_move_number as usize - 1) {
            Some(turn) => turn.push(notation),
            None => self.move_list.push(vec![notation]),
        }
    }

    fn update_game_history(&mut self) {
        self.game_history.push(HistoryEntry {
            board: self.piece_register.board_view(),
            check_state: self.check_state,
            last_move: self.last_move,
        });
    }

    /// Counts reduced position keys: placement, side, castling, and en
    /// passant; the move counters are excluded. The flag latches once any
    /// key is seen for a third time.
    fn update_three_fold_repetition_dictionary(&mut self) {
        let key: String = self
            .board_as_fen
            .split(' ')
            .take(4)
            .collect::<Vec<&str>>()
            .join("");

        match self.three_fold_repetition_dictionary.get(&key).copied() {
            None => {
                self.three_fold_repetition_dictionary.insert(key, 1);
            }
            Some(seen) => {
                if seen == 2 {
                    self.three_fold_repetition_flag = true;
                }
                self.three_fold_repetition_dictionary.insert(key, 2);
            }
        }
    }

    // --- Termination ------------------------------------------------------

    /// Evaluated after every applied ply; once true the state is terminal.
    fn is_game_finished(&mut self) -> bool {
        if self.insufficient_material() {
            self.game_over_message = Some(INSUFFICIENT_MATERIAL_MESSAGE.to_owned());
            return true;
        }

        if self.safe_squares.is_empty() {
            if self.check_state.is_in_check() {
                let winner = self.side_to_move.opposite();
                self.game_over_message = Some(format!("{} won by checkmate", winner.name()));
            } else {
                self.game_over_message = Some(STALEMATE_MESSAGE.to_owned());
            }
            return true;
        }

        if self.three_fold_repetition_flag {
            self.game_over_message = Some(THREE_FOLD_REPETITION_MESSAGE.to_owned());
            return true;
        }

        if self.fifty_move_rule_counter >= FIFTY_MOVE_RULE_LIMIT {
            self.game_over_message = Some(FIFTY_MOVE_RULE_MESSAGE.to_owned());
            return true;
        }

        false
    }

    fn player_has_only_two_knights_and_king(pieces: &[(Piece, BoardLocation)]) -> bool {
        pieces
            .iter()
            .filter(|(piece, _)| piece.kind == PieceKind::Knight)
            .count()
            == 2
    }

    fn player_has_only_same_square_bishops_and_king(pieces: &[(Piece, BoardLocation)]) -> bool {
        let bishops: Vec<&(Piece, BoardLocation)> = pieces
            .iter()
            .filter(|(piece, _)| piece.kind == PieceKind::Bishop)
            .collect();

        let Some((_, first_location)) = bishops.first() else {
            return false;
        };
        let first_parity = PieceRegister::is_square_dark(first_location);

        bishops.len() == pieces.len() - 1
            && bishops
                .iter()
                .all(|(_, location)| PieceRegister::is_square_dark(location) == first_parity)
    }

    /// Partial insufficient-material rule set: king vs king, king and one
    /// minor piece vs king, single same-square bishops on both sides, two
    /// knights vs a lone king, and any number of same-square bishops vs a
    /// lone king. Other material is assumed sufficient.
    fn insufficient_material(&self) -> bool {
        let light_pieces = self.piece_register.pieces_of_color(Color::Light);
        let dark_pieces = self.piece_register.pieces_of_color(Color::Dark);

        let is_minor =
            |(piece, _): &(Piece, BoardLocation)| matches!(piece.kind, PieceKind::Knight | PieceKind::Bishop);

        // King vs King
        if light_pieces.len() == 1 && dark_pieces.len() == 1 {
            return true;
        }

        // King and one minor piece vs King
        if light_pieces.len() == 1 && dark_pieces.len() == 2 {
            return dark_pieces.iter().any(is_minor);
        } else if light_pieces.len() == 2 && dark_pieces.len() == 1 {
            return light_pieces.iter().any(is_minor);
        } else if light_pieces.len() == 2 && dark_pieces.len() == 2 {
            // Both sides keep a single bishop on the same square color.
            let light_bishop = light_pieces
                .iter()
                .find(|(piece, _)| piece.kind == PieceKind::Bishop);
            let dark_bishop = dark_pieces
                .iter()
                .find(|(piece, _)| piece.kind == PieceKind::Bishop);

            if let (Some((_, light_location)), Some((_, dark_location))) =
                (light_bishop, dark_bishop)
            {
                return PieceRegister::is_square_dark(light_location)
                    == PieceRegister::is_square_dark(dark_location);
            }
        }

        // Two knights and king vs a lone king.
        if light_pieces.len() == 3
            && dark_pieces.len() == 1
            && Self::player_has_only_two_knights_and_king(&light_pieces)
            || light_pieces.len() == 1
                && dark_pieces.len() == 3
                && Self::player_has_only_two_knights_and_king(&dark_pieces)
        {
            return true;
        }

        // Same-square bishops and king vs a lone king.
        if light_pieces.len() >= 3
            && dark_pieces.len() == 1
            && Self::player_has_only_same_square_bishops_and_king(&light_pieces)
            || light_pieces.len() == 1
                && dark_pieces.len() >= 3
                && Self::player_has_only_same_square_bishops_and_king(&dark_pieces)
        {
            return true;
        }

        false
    }

    /// Test scaffolding: builds a game from explicit placements and runs the
    /// same derivation pipeline a move would (check state, legal-move index,
    /// FEN, history, termination).
    #[cfg(test)]
    pub(crate) fn from_piece_placements(
        placements: &[(Piece, BoardLocation)],
        side_to_move: Color,
    ) -> Self {
        let mut piece_register = PieceRegister::default();
        for (piece, location) in placements {
            *piece_register.at(location) = Some(*piece);
        }

        let mut game_state = Self {
            piece_register,
            side_to_move,
            safe_squares: SafeSquares::new(),
            last_move: None,
            check_state: CheckState::NotInCheck,
            fifty_move_rule_counter: 0.0,
            three_fold_repetition_dictionary: HashMap::new(),
            three_fold_repetition_flag: false,
            is_game_over: false,
            game_over_message: None,
            full_move_number: 1,
            board_as_fen: String::new(),
            move_list: Vec::new(),
            game_history: Vec::new(),
        };

        is_in_check(&mut game_state, side_to_move, true);
        game_state.safe_squares = find_safe_squares(&mut game_state);
        game_state.board_as_fen = generate_fen(&game_state);
        game_state.game_history.push(HistoryEntry {
            board: game_state.piece_register.board_view(),
            check_state: game_state.check_state,
            last_move: None,
        });
        game_state.is_game_over = game_state.is_game_finished();
        game_state
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::{
        BoardLocation, Color, PieceKind, TAG_CHECK, TAG_PROMOTION,
    };
    use crate::game_state::piece::Piece;

    fn kings() -> [(Piece, BoardLocation); 2] {
        [
            (Piece::new(PieceKind::King, Color::Light), (4, 0)),
            (Piece::new(PieceKind::King, Color::Dark), (4, 7)),
        ]
    }

    #[test]
    fn king_and_bishop_versus_king_is_a_draw() {
        let [light_king, dark_king] = kings();
        let game_state = GameState::from_piece_placements(
            &[
                light_king,
                dark_king,
                (Piece::new(PieceKind::Bishop, Color::Light), (2, 0)),
            ],
            Color::Light,
        );

        assert!(game_state.is_game_over());
        assert_eq!(
            game_state.game_over_message(),
            Some("Draw due to insufficient material position")
        );
    }

    #[test]
    fn king_and_knight_versus_king_is_a_draw() {
        let [light_king, dark_king] = kings();
        let game_state = GameState::from_piece_placements(
            &[
                light_king,
                dark_king,
                (Piece::new(PieceKind::Knight, Color::Dark), (1, 7)),
            ],
            Color::Light,
        );

        assert!(game_state.is_game_over());
        assert_eq!(
            game_state.game_over_message(),
            Some("Draw due to insufficient material position")
        );
    }

    #[test]
    fn king_and_rook_versus_king_is_not_a_draw() {
        let [light_king, dark_king] = kings();
        let game_state = GameState::from_piece_placements(
            &[
                light_king,
                dark_king,
                (Piece::new(PieceKind::Rook, Color::Light), (0, 0)),
            ],
            Color::Light,
        );

        assert!(!game_state.is_game_over());
    }

    #[test]
    fn single_bishops_draw_only_on_matching_square_colors() {
        let [light_king, dark_king] = kings();

        // c1 and f8 are both dark squares.
        let same = GameState::from_piece_placements(
            &[
                light_king,
                dark_king,
                (Piece::new(PieceKind::Bishop, Color::Light), (2, 0)),
                (Piece::new(PieceKind::Bishop, Color::Dark), (5, 7)),
            ],
            Color::Light,
        );
        assert!(same.is_game_over());
        assert_eq!(
            same.game_over_message(),
            Some("Draw due to insufficient material position")
        );

        // c1 is dark, c8 is light.
        let opposite = GameState::from_piece_placements(
            &[
                light_king,
                dark_king,
                (Piece::new(PieceKind::Bishop, Color::Light), (2, 0)),
                (Piece::new(PieceKind::Bishop, Color::Dark), (2, 7)),
            ],
            Color::Light,
        );
        assert!(!opposite.is_game_over());
    }

    #[test]
    fn two_knights_versus_lone_king_is_a_draw() {
        let [light_king, dark_king] = kings();
        let game_state = GameState::from_piece_placements(
            &[
                light_king,
                dark_king,
                (Piece::new(PieceKind::Knight, Color::Light), (1, 0)),
                (Piece::new(PieceKind::Knight, Color::Light), (6, 0)),
            ],
            Color::Light,
        );

        assert!(game_state.is_game_over());
        assert_eq!(
            game_state.game_over_message(),
            Some("Draw due to insufficient material position")
        );
    }

    #[test]
    fn stalemate_is_reported_when_no_moves_and_no_check() {
        // Dark king cornered on a8 by the light queen and king.
        let game_state = GameState::from_piece_placements(
            &[
                (Piece::new(PieceKind::King, Color::Dark), (0, 7)),
                (Piece::new(PieceKind::King, Color::Light), (2, 6)),
                (Piece::new(PieceKind::Queen, Color::Light), (1, 5)),
            ],
            Color::Dark,
        );

        assert!(game_state.is_game_over());
        assert_eq!(game_state.game_over_message(), Some("Stalemate"));
    }

    #[test]
    fn promotion_replaces_the_pawn_and_is_notated() {
        let mut game_state = GameState::from_piece_placements(
            &[
                (Piece::new(PieceKind::King, Color::Light), (4, 0)),
                (Piece::new(PieceKind::Pawn, Color::Light), (0, 6)),
                (Piece::new(PieceKind::King, Color::Dark), (7, 7)),
            ],
            Color::Light,
        );

        game_state
            .move_piece((0, 6), (0, 7), Some(PieceKind::Queen))
            .expect("promotion move should be legal");

        assert_eq!(game_state.board_view()[0][7], Some('Q'));
        assert_eq!(game_state.board_view()[0][6], None);

        let last_move = game_state.last_move().expect("a move was applied");
        assert!(last_move.tags.has(TAG_PROMOTION));
        assert!(last_move.tags.has(TAG_CHECK), "queen on a8 checks the h8 king");
        assert_eq!(game_state.move_list()[0][0], "a7a8=Q+");
    }

    #[test]
    fn fifty_move_rule_draw_after_one_hundred_quiet_plies() {
        // Kings tour closed loops of coprime-ish lengths while the rooks
        // stand still, so no position ever recurs and no pawn move or
        // capture resets the counter.
        let mut game_state = GameState::from_piece_placements(
            &[
                (Piece::new(PieceKind::King, Color::Light), (1, 1)),
                (Piece::new(PieceKind::Rook, Color::Light), (7, 0)),
                (Piece::new(PieceKind::King, Color::Dark), (1, 5)),
                (Piece::new(PieceKind::Rook, Color::Dark), (0, 7)),
            ],
            Color::Light,
        );

        let light_tour: [BoardLocation; 12] = [
            (1, 1),
            (2, 1),
            (3, 1),
            (4, 1),
            (5, 1),
            (6, 1),
            (6, 2),
            (5, 2),
            (4, 2),
            (3, 2),
            (2, 2),
            (1, 2),
        ];
        let dark_tour: [BoardLocation; 10] = [
            (1, 5),
            (2, 5),
            (3, 5),
            (4, 5),
            (5, 5),
            (5, 6),
            (4, 6),
            (3, 6),
            (2, 6),
            (1, 6),
        ];

        for ply in 0..100usize {
            assert!(
                !game_state.is_game_over(),
                "game ended early at ply {ply}: {:?}",
                game_state.game_over_message()
            );
            let index = ply / 2;
            let (start, stop) = if ply % 2 == 0 {
                (light_tour[index % 12], light_tour[(index + 1) % 12])
            } else {
                (dark_tour[index % 10], dark_tour[(index + 1) % 10])
            };
            game_state
                .move_piece(start, stop, None)
                .expect("scripted king move should be legal");
        }

        assert!(game_state.is_game_over());
        assert_eq!(
            game_state.game_over_message(),
            Some("Draw due to fifty move rule")
        );
    }

    #[test]
    fn history_grows_by_one_entry_per_ply() {
        let mut game_state = GameState::new_game();
        assert_eq!(game_state.game_history().len(), 1);

        game_state.move_piece((4, 1), (4, 3), None).expect("e2e4");
        game_state.move_piece((4, 6), (4, 4), None).expect("e7e5");

        assert_eq!(game_state.game_history().len(), 3);
        assert!(game_state.game_history()[0].last_move.is_none());
        assert_eq!(
            game_state.game_history()[1]
                .last_move
                .expect("first ply recorded")
                .stop,
            (4, 3)
        );
    }
}
