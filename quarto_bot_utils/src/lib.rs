use std::io::{BufRead, Write};

use quarto::{Board, Okay, Piece, PiecesSet, Placement, PlayerId, Request};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, player: PlayerId);
    /// Choose the piece that the opponent has to place next, out of `available`.
    fn select_piece(&mut self, board: &Board, available: PiecesSet) -> anyhow::Result<Piece>;
    /// Choose an empty cell for `piece`. `available` does not contain `piece`.
    fn place_piece(
        &mut self,
        board: &Board,
        piece: Piece,
        available: PiecesSet,
    ) -> anyhow::Result<Placement>;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let stdin = std::io::stdin().lock();
        let stdout = std::io::stdout().lock();
        self.serve(stdin, stdout)
    }

    /// Answer requests from `input`, one JSON object per line, until [`Request::Bye`] or EOF.
    fn serve(&mut self, mut input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        let mut buf = String::new();

        loop {
            buf.clear(); // because read_line() appends to the buffer
            let num_bytes_read = input.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { player } => {
                    self.new_game(player);
                    serde_json::to_writer(&mut output, &Okay())?;
                }
                Request::SelectPiece { board, available } => {
                    let piece = self.select_piece(&board, PiecesSet::from_iter(available))?;
                    serde_json::to_writer(&mut output, &piece)?;
                }
                Request::PlacePiece {
                    board,
                    piece,
                    available,
                } => {
                    let placement =
                        self.place_piece(&board, piece, PiecesSet::from_iter(available))?;
                    serde_json::to_writer(&mut output, &placement)?;
                }
                Request::Bye => break Ok(()),
            }
            writeln!(output)?;
            output.flush()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use quarto::{piece, ALL_PIECES_SET};

    use super::*;

    /// Hands out the first available piece and fills the board in row-major order.
    struct FirstFitBot {
        games: Vec<PlayerId>,
    }

    impl Bot for FirstFitBot {
        fn new_game(&mut self, player: PlayerId) {
            self.games.push(player);
        }

        fn select_piece(&mut self, _board: &Board, available: PiecesSet) -> anyhow::Result<Piece> {
            available
                .into_iter()
                .next()
                .ok_or_else(|| anyhow::anyhow!("Nothing available"))
        }

        fn place_piece(
            &mut self,
            board: &Board,
            _piece: Piece,
            _available: PiecesSet,
        ) -> anyhow::Result<Placement> {
            let (row, col) = board
                .empty_cells()
                .next()
                .ok_or_else(|| anyhow::anyhow!("Board is full"))?;
            Ok(Placement { row, col })
        }
    }

    fn to_line(req: &Request) -> String {
        serde_json::to_string(req).unwrap() + "\n"
    }

    #[test]
    fn answers_each_request_on_its_own_line() {
        let mut board = Board::new();
        board.place(piece!("CSTP"), 0, 0).unwrap();
        let available: Vec<Piece> = ALL_PIECES_SET.remove(piece!("CSTP")).into_iter().collect();
        let input = [
            to_line(&Request::NewGame {
                player: PlayerId::Two,
            }),
            to_line(&Request::SelectPiece {
                board,
                available: available.clone(),
            }),
            to_line(&Request::PlacePiece {
                board,
                piece: available[0],
                available: available[1..].to_vec(),
            }),
            to_line(&Request::Bye),
            to_line(&Request::NewGame {
                player: PlayerId::One,
            }),
        ]
        .concat();

        let mut bot = FirstFitBot { games: Vec::new() };
        let mut output = Vec::new();
        bot.serve(input.as_bytes(), &mut output).unwrap();

        // Nothing after the Bye is answered
        assert_eq!(bot.games, vec![PlayerId::Two]);
        let lines: Vec<&str> = std::str::from_utf8(&output).unwrap().lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[]");
        assert_eq!(serde_json::from_str::<Piece>(lines[1]).unwrap(), piece!("CSTW"));
        assert_eq!(
            serde_json::from_str::<Placement>(lines[2]).unwrap(),
            Placement { row: 0, col: 1 }
        );
    }

    #[test]
    fn stops_at_eof_and_rejects_garbage() {
        let mut bot = FirstFitBot { games: Vec::new() };
        assert!(bot.serve("".as_bytes(), Vec::new()).is_ok());
        assert!(bot.serve("{\"type\":\"Dance\"}\n".as_bytes(), Vec::new()).is_err());
    }
}
