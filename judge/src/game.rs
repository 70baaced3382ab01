use quarto::{Game, IllegalMove, Okay, Outcome, Phase, Piece, Placement, PlayerId, Request};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::player::Player;

#[derive(Debug, PartialEq, Eq)]
pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

/// A finished game. Both fields are indexed like the players passed to [`play_game`].
#[derive(Debug, PartialEq, Eq)]
pub struct GameSummary {
    /// Which seat each player had. [`PlayerId::One`] hands out the first piece.
    pub player_ids: [PlayerId; 2],
    pub result: GameResult,
}

/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    rng: &mut StdRng,
    player_1: &mut Player,
    player_2: &mut Player,
) -> anyhow::Result<GameSummary> {
    // Randomly pick who selects the first piece
    let first_player_idx = if rng.gen::<bool>() { 1 } else { 0 };
    play_game_with_first_player(first_player_idx, player_1, player_2)
}

/// Like [`play_game`], with `players[first_player_idx]` as [`PlayerId::One`].
pub fn play_game_with_first_player(
    first_player_idx: usize,
    player_1: &mut Player,
    player_2: &mut Player,
) -> anyhow::Result<GameSummary> {
    let mut players = [player_1, player_2];
    let player_ids = if first_player_idx == 0 {
        [PlayerId::One, PlayerId::Two]
    } else {
        [PlayerId::Two, PlayerId::One]
    };
    let player_idx_of = |id: PlayerId| if player_ids[0] == id { 0 } else { 1 };
    let summary = |result| GameSummary { player_ids, result };

    // Inform the players about the new game, so that they can reset their state
    for (player, id) in players.iter_mut().zip(player_ids) {
        let _: Okay = player.perform_request(&Request::NewGame { player: id })?;
    }

    let mut game = Game::new();
    loop {
        let player_idx = player_idx_of(game.current_player());
        let player = &mut players[player_idx];
        let board = *game.board();
        let available: Vec<Piece> = game.pool().into_iter().collect();
        let step_result = match game.phase() {
            Phase::SelectPiece => {
                let piece: Piece =
                    player.perform_request(&Request::SelectPiece { board, available })?;
                debug!(player = %player.name, %piece, "Selected piece");
                game.select_piece(piece).map(|()| Outcome::Continue)
            }
            Phase::PlacePiece { piece } => {
                let Placement { row, col } =
                    player.perform_request::<Placement>(&Request::PlacePiece {
                        board,
                        piece,
                        available,
                    })?;
                debug!(player = %player.name, %piece, row, col, "Placed piece");
                game.place_piece(row, col)
            }
        };

        match step_result {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Win(id)) => {
                debug!("Final board:\n{}", game.board());
                if let Some(line) = game.board().winning_line() {
                    debug!(cells = ?line.cells, shared = ?line.shared_attributes, "Winning line");
                }
                return Ok(summary(GameResult::WonByPlayer {
                    player_idx: player_idx_of(id),
                }));
            }
            Ok(Outcome::Draw) => {
                debug!("Final board:\n{}", game.board());
                return Ok(summary(GameResult::Tie));
            }
            Err(err) => {
                return Ok(summary(GameResult::IllegalMoveByPlayer { player_idx, err }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use quarto::{piece, ALL_PIECES};

    use super::*;

    /// A player answering with the given JSON lines, after acknowledging the new game.
    fn scripted_player(name: &str, responses: &[String]) -> Player {
        let script = std::iter::once(String::from("[]"))
            .chain(responses.iter().cloned())
            .map(|line| line + "\n")
            .collect::<String>();
        Player::from_streams(name, Cursor::new(script), std::io::sink())
    }

    fn piece_json(piece: Piece) -> String {
        serde_json::to_string(&piece).unwrap()
    }

    fn placement_json(row: usize, col: usize) -> String {
        serde_json::to_string(&Placement { row, col }).unwrap()
    }

    /// Scripts for player one and player two that put `pieces[k]` on `cells[k]`.
    ///
    /// Player one selects the even pieces and places the odd ones.
    fn scripts(pieces: &[Piece], cells: &[(usize, usize)]) -> [Vec<String>; 2] {
        let mut scripts = [Vec::new(), Vec::new()];
        for (k, (&piece, &(row, col))) in pieces.iter().zip(cells).enumerate() {
            let selector = k % 2;
            scripts[selector].push(piece_json(piece));
            scripts[1 - selector].push(placement_json(row, col));
        }
        scripts
    }

    #[test]
    fn the_first_player_wins_regardless_of_seat() {
        let pieces = ["CSTP", "CMTW", "CSIW", "CMIP"].map(|code| code.parse::<Piece>().unwrap());
        let cells = [(0, 0), (0, 1), (0, 2), (0, 3)];
        let [one, two] = scripts(&pieces, &cells);

        for first_player_idx in [0, 1] {
            let mut seats = [scripted_player("a", &one), scripted_player("b", &two)];
            if first_player_idx == 1 {
                seats.swap(0, 1);
            }
            let [mut player_1, mut player_2] = seats;
            let summary =
                play_game_with_first_player(first_player_idx, &mut player_1, &mut player_2)
                    .unwrap();
            assert_eq!(summary.player_ids[first_player_idx], PlayerId::One);
            assert_eq!(summary.player_ids[1 - first_player_idx], PlayerId::Two);
            // The fourth piece is placed by player one
            assert_eq!(
                summary.result,
                GameResult::WonByPlayer {
                    player_idx: first_player_idx
                }
            );
        }
    }

    #[test]
    fn full_board_is_a_tie() {
        let layout = [12, 8, 2, 7, 5, 0, 10, 4, 11, 14, 9, 3, 1, 13, 6, 15];
        let pieces: Vec<Piece> = layout.iter().map(|&idx| ALL_PIECES[idx]).collect();
        let cells: Vec<(usize, usize)> = (0..16).map(|k| (k / 4, k % 4)).collect();
        let [one, two] = scripts(&pieces, &cells);
        let mut player_1 = scripted_player("a", &one);
        let mut player_2 = scripted_player("b", &two);
        let summary = play_game_with_first_player(0, &mut player_1, &mut player_2).unwrap();
        assert_eq!(summary.result, GameResult::Tie);
    }

    #[test]
    fn handing_out_a_used_piece_loses() {
        let one = vec![piece_json(piece!("CSTP"))];
        let two = vec![placement_json(0, 0), piece_json(piece!("CSTP"))];
        let mut player_1 = scripted_player("a", &two);
        let mut player_2 = scripted_player("b", &one);
        let summary = play_game_with_first_player(1, &mut player_1, &mut player_2).unwrap();
        assert_eq!(
            summary.result,
            GameResult::IllegalMoveByPlayer {
                player_idx: 0,
                err: IllegalMove::PieceNotAvailable {
                    piece: piece!("CSTP")
                }
            }
        );
    }

    #[test]
    fn broken_communication_is_an_error() {
        let mut player_1 = scripted_player("a", &[String::from("\"not a piece\"")]);
        let mut player_2 = scripted_player("b", &[]);
        assert!(play_game_with_first_player(0, &mut player_1, &mut player_2).is_err());
    }
}
