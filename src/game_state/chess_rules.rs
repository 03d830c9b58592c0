//! Canonical chess-rule constants.
//!
//! This module stores static rule-related literals such as the standard
//! starting position FEN and the fixed game-over messages reported to
//! UI collaborators.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Fifty-move-rule threshold. The counter advances by 0.5 per quiet ply
/// (both players contribute), so the limit is reached after 100 plies.
pub const FIFTY_MOVE_RULE_LIMIT: f32 = 50.0;

pub const STALEMATE_MESSAGE: &str = "Stalemate";
pub const INSUFFICIENT_MATERIAL_MESSAGE: &str = "Draw due to insufficient material position";
pub const THREE_FOLD_REPETITION_MESSAGE: &str = "Draw due to three fold repetition rule";
pub const FIFTY_MOVE_RULE_MESSAGE: &str = "Draw due to fifty move rule";
