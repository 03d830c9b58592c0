//! Crate root module declarations for the Sable Chess engine.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! history, and utility helpers) so binaries, tests, and external tooling can
//! import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod piece;
    pub mod piece_register;
}

pub mod move_generation {
    pub mod attack_detection;
    pub mod safe_square_generator;
    pub mod special_move_checks;
}

pub mod history {
    pub mod game_history;
    pub mod move_notation;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
}
