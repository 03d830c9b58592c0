//! Interactive play loop.
//!
//! A thin stdin-driven collaborator around the engine: submit moves in
//! long-algebraic form ("e2e4", "e7e8q"), inspect the legal-move index,
//! the position encoding, or the PGN of the game so far.

use std::io::{self, BufRead, Write};

use sable_chess::game_state::game_state::GameState;
use sable_chess::utils::long_algebraic::parse_long_algebraic;
use sable_chess::utils::pgn::write_pgn;
use sable_chess::utils::render_game_state::render_game_state;

fn main() {
    let stdin = io::stdin();
    let mut game_state = GameState::new_game();

    println!("{}", render_game_state(&game_state));
    println!("commands: <move like e2e4>, moves, fen, pgn, new, quit");
    prompt(&game_state);

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let input = line.trim();

        match input {
            "" => {}
            "quit" => break,
            "new" => {
                game_state = GameState::new_game();
                println!("{}", render_game_state(&game_state));
            }
            "fen" => println!("{}", game_state.board_as_fen()),
            "pgn" => print!("{}", write_pgn(&game_state)),
            "moves" => {
                for (origin, destinations) in game_state.safe_squares_by_coordinate() {
                    println!("{origin} -> {}", destinations.join(" "));
                }
            }
            _ => match parse_long_algebraic(input) {
                Ok(request) => {
                    match game_state.move_piece(request.start, request.stop, request.promotion) {
                        Ok(()) => {
                            println!("{}", render_game_state(&game_state));
                            if let Some(message) = game_state.game_over_message() {
                                println!("{message}");
                            }
                        }
                        Err(error) => println!("move rejected: {error:?}"),
                    }
                }
                Err(error) => println!("could not read '{input}': {error:?}"),
            },
        }

        prompt(&game_state);
    }
}

fn prompt(game_state: &GameState) {
    if !game_state.is_game_over() {
        print!("{} to move> ", game_state.side_to_move().name());
        io::stdout().flush().ok();
    }
}
