//! PGN export for game-history interchange.
//!
//! Serializes the recorded move list with Seven Tag Roster headers.
//! Reading PGN back is out of scope, like decoding the position encoding.

use std::collections::BTreeMap;

use chrono::Local;

use crate::game_state::game_state::GameState;

/// Write the game's move list as PGN text with default headers.
pub fn write_pgn(game_state: &GameState) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Sable Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert(
        "Date".to_owned(),
        Local::now().format("%Y.%m.%d").to_string(),
    );
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), result_token(game_state).to_owned());

    write_pgn_with_headers(game_state, &headers)
}

/// Write the game's move list as PGN text with caller-supplied headers.
pub fn write_pgn_with_headers(
    game_state: &GameState,
    headers: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, value));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::new();
    for (turn_index, turn) in game_state.move_list().iter().enumerate() {
        for (ply_index, notation) in turn.iter().enumerate() {
            if ply_index == 0 {
                movetext_parts.push(format!("{}. {}", turn_index + 1, notation));
            } else {
                movetext_parts.push(notation.clone());
            }
        }
    }

    let result = headers
        .get("Result")
        .map(|value| value.as_str())
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());

    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// PGN result token for the game's current status.
fn result_token(game_state: &GameState) -> &'static str {
    let Some(message) = game_state.game_over_message() else {
        return "*";
    };

    if message.starts_with("White won") {
        "1-0"
    } else if message.starts_with("Black won") {
        "0-1"
    } else {
        "1/2-1/2"
    }
}

#[cfg(test)]
mod tests {
    use super::write_pgn;
    use crate::game_state::game_state::GameState;

    #[test]
    fn finished_game_exports_with_result_and_numbered_turns() {
        let mut game_state = GameState::new_game();
        game_state.move_piece((5, 1), (5, 2), None).expect("f2f3");
        game_state.move_piece((4, 6), (4, 4), None).expect("e7e5");
        game_state.move_piece((6, 1), (6, 3), None).expect("g2g4");
        game_state.move_piece((3, 7), (7, 3), None).expect("d8h4 mate");

        let pgn = write_pgn(&game_state);
        assert!(pgn.contains("[Event \"Sable Chess Game\"]"));
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.contains("1. f2f3 e7e5 2. g2g4 qd8h4#"));
        assert!(pgn.trim_end().ends_with("0-1"));
    }

    #[test]
    fn unfinished_game_exports_an_open_result() {
        let mut game_state = GameState::new_game();
        game_state.move_piece((4, 1), (4, 3), None).expect("e2e4");

        let pgn = write_pgn(&game_state);
        assert!(pgn.contains("[Result \"*\"]"));
        assert!(pgn.contains("1. e2e4 *"));
    }
}
