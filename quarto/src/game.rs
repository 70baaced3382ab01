use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    handle_piece_selection, handle_placement, initialize_game, request_ai_piece_choice,
    request_ai_placement, Board, IllegalMove, Piece, PiecesSet, QuartoAi,
};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// 0 for player one, 1 for player two.
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// What the current player has to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Hand a piece from the pool to the opponent.
    SelectPiece,
    /// Put the piece that was handed over on the board.
    PlacePiece { piece: Piece },
}

/// How the game stands after a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Continue,
    /// The player who placed the last piece completed a line.
    Win(PlayerId),
    /// The board is full and no line was completed.
    Draw,
}

/// A game of Quarto, as a sequence of select and place steps.
///
/// Player one starts by selecting a piece. Every selection passes the turn to
/// the opponent, who then places that piece. After placing, the same player
/// selects the next piece. Once the game is won or drawn, every step fails with
/// [`IllegalMove::GameAlreadyOver`], and [`Self::phase()`] keeps the phase the
/// game ended in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    pool: PiecesSet,
    current_player: PlayerId,
    phase: Phase,
    outcome: Outcome,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        let (board, pool, current_player) = initialize_game();
        Self {
            board,
            pool,
            current_player,
            phase: Phase::SelectPiece,
            outcome: Outcome::Continue,
        }
    }

    /// Start over with a fresh game.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The pieces that have not been handed out yet.
    pub fn pool(&self) -> PiecesSet {
        self.pool
    }

    /// The player whose turn it is: the one selecting in [`Phase::SelectPiece`],
    /// the one placing in [`Phase::PlacePiece`].
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::Continue
    }

    /// Hand `piece` to the opponent.
    pub fn select_piece(&mut self, piece: Piece) -> Result<(), IllegalMove> {
        self.expect_selection()?;
        if !self.pool.contains(piece) {
            return Err(IllegalMove::PieceNotAvailable { piece });
        }
        self.hand_out(piece, self.pool.remove(piece));
        Ok(())
    }

    /// Hand the piece at position `index` of [`Self::pool()`] to the opponent.
    pub fn select_piece_at(&mut self, index: usize) -> Result<Piece, IllegalMove> {
        self.expect_selection()?;
        let (piece, pool) =
            handle_piece_selection(self.pool, index).ok_or(IllegalMove::PoolIndexOutOfRange {
                index,
                pool_size: self.pool.len(),
            })?;
        self.hand_out(piece, pool);
        Ok(piece)
    }

    /// Place the piece that was handed to the current player.
    ///
    /// If this does not end the game, the current player selects next.
    pub fn place_piece(&mut self, row: usize, col: usize) -> Result<Outcome, IllegalMove> {
        let piece = self.expect_placement()?;
        let outcome = handle_placement(&mut self.board, piece, row, col, self.current_player)?;
        self.outcome = outcome;
        if outcome == Outcome::Continue {
            self.phase = Phase::SelectPiece;
        }
        Ok(outcome)
    }

    /// Let the computer select a piece for the opponent.
    pub fn ai_select_piece<R: Rng>(&mut self, ai: &mut QuartoAi<R>) -> Result<Piece, IllegalMove> {
        self.expect_selection()?;
        let piece = request_ai_piece_choice(ai, self.pool).ok_or(IllegalMove::NoPieceToHandOut)?;
        self.hand_out(piece, self.pool.remove(piece));
        Ok(piece)
    }

    /// Let the computer place the piece it was handed.
    ///
    /// Returns the chosen cell along with the outcome.
    pub fn ai_place_piece<R: Rng>(
        &mut self,
        ai: &mut QuartoAi<R>,
    ) -> Result<((usize, usize), Outcome), IllegalMove> {
        let piece = self.expect_placement()?;
        let (row, col) =
            request_ai_placement(ai, &self.board, piece).ok_or(IllegalMove::NoLegalPlacement)?;
        let outcome = self.place_piece(row, col)?;
        Ok(((row, col), outcome))
    }

    fn expect_selection(&self) -> Result<(), IllegalMove> {
        if self.is_over() {
            return Err(IllegalMove::GameAlreadyOver);
        }
        match self.phase {
            Phase::SelectPiece => Ok(()),
            phase @ Phase::PlacePiece { .. } => Err(IllegalMove::WrongPhase { phase }),
        }
    }

    fn expect_placement(&self) -> Result<Piece, IllegalMove> {
        if self.is_over() {
            return Err(IllegalMove::GameAlreadyOver);
        }
        match self.phase {
            Phase::PlacePiece { piece } => Ok(piece),
            phase @ Phase::SelectPiece => Err(IllegalMove::WrongPhase { phase }),
        }
    }

    fn hand_out(&mut self, piece: Piece, remaining_pool: PiecesSet) {
        self.pool = remaining_pool;
        self.current_player = self.current_player.other();
        self.phase = Phase::PlacePiece { piece };
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::board::tests::drawn_board;
    use crate::{piece, IllegalPlacement, ALL_PIECES_SET, BOARD_SIZE};

    /// Every piece is in exactly one place: the pool, the board, or the hand
    /// of the player who has to place it.
    fn assert_catalog_is_split(game: &Game) {
        let pool = game.pool();
        let on_board = game.board().pieces();
        let in_hand = match game.phase() {
            Phase::PlacePiece { piece } if !game.is_over() => PiecesSet::new().insert(piece),
            _ => PiecesSet::new(),
        };
        assert!((pool & on_board).is_empty());
        assert!((pool & in_hand).is_empty());
        assert!((on_board & in_hand).is_empty());
        assert_eq!(pool | on_board | in_hand, ALL_PIECES_SET);
    }

    #[test]
    fn handed_piece_is_neither_in_pool_nor_on_board() {
        let mut game = Game::new();
        assert_catalog_is_split(&game);
        game.select_piece(piece!("CSTP")).unwrap();
        assert!(!game.pool().contains(piece!("CSTP")));
        assert!(!game.board().pieces().contains(piece!("CSTP")));
        assert_catalog_is_split(&game);
        game.place_piece(3, 2).unwrap();
        assert!(game.board().pieces().contains(piece!("CSTP")));
        assert_catalog_is_split(&game);
    }

    #[test]
    fn initial_state() {
        let game = Game::new();
        assert_eq!(game.phase(), Phase::SelectPiece);
        assert_eq!(game.current_player(), PlayerId::One);
        assert_eq!(game.pool(), ALL_PIECES_SET);
        assert_eq!(game.board(), &Board::new());
        assert!(!game.is_over());
    }

    #[test]
    fn selection_flips_the_player_and_placement_does_not() {
        let mut game = Game::new();
        game.select_piece(piece!("ESIP")).unwrap();
        assert_eq!(game.current_player(), PlayerId::Two);
        assert_eq!(game.phase(), Phase::PlacePiece { piece: piece!("ESIP") });
        assert!(!game.pool().contains(piece!("ESIP")));
        assert_eq!(game.pool().len(), 15);

        assert_eq!(game.place_piece(2, 1), Ok(Outcome::Continue));
        assert_eq!(game.current_player(), PlayerId::Two);
        assert_eq!(game.phase(), Phase::SelectPiece);
        assert_eq!(game.board().get(2, 1), Some(piece!("ESIP")));
    }

    #[test]
    fn steps_out_of_order_are_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.place_piece(0, 0),
            Err(IllegalMove::WrongPhase {
                phase: Phase::SelectPiece
            })
        );
        game.select_piece(piece!("CSTP")).unwrap();
        let before = game.clone();
        assert_eq!(
            game.select_piece(piece!("CSTW")),
            Err(IllegalMove::WrongPhase {
                phase: Phase::PlacePiece { piece: piece!("CSTP") }
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn pieces_are_handed_out_once() {
        let mut game = Game::new();
        game.select_piece(piece!("CSTP")).unwrap();
        game.place_piece(0, 0).unwrap();
        let before = game.clone();
        assert_eq!(
            game.select_piece(piece!("CSTP")),
            Err(IllegalMove::PieceNotAvailable { piece: piece!("CSTP") })
        );
        assert_eq!(
            game.select_piece_at(15),
            Err(IllegalMove::PoolIndexOutOfRange {
                index: 15,
                pool_size: 15
            })
        );
        assert_eq!(game, before);
        // Index 0 is now the second piece of the catalog
        assert_eq!(game.select_piece_at(0), Ok(piece!("CSTW")));
    }

    #[test]
    fn illegal_placement_can_be_retried() {
        let mut game = Game::new();
        game.select_piece(piece!("CSTP")).unwrap();
        game.place_piece(1, 1).unwrap();
        game.select_piece(piece!("EMIW")).unwrap();
        let before = game.clone();
        assert_eq!(
            game.place_piece(1, 1),
            Err(IllegalMove::IllegalPlacement {
                err: IllegalPlacement::CellOccupied {
                    row: 1,
                    col: 1,
                    existing: piece!("CSTP")
                }
            })
        );
        assert_eq!(
            game.place_piece(1, 4),
            Err(IllegalMove::IllegalPlacement {
                err: IllegalPlacement::OutOfBounds { row: 1, col: 4 }
            })
        );
        assert_eq!(game, before);
        assert_eq!(game.place_piece(1, 2), Ok(Outcome::Continue));
    }

    #[test]
    fn the_player_completing_a_line_wins() {
        let mut game = Game::new();
        let mut placers = Vec::new();
        for (col, code) in ["CSTP", "CMTW", "CSIW", "CMIP"].into_iter().enumerate() {
            game.select_piece(code.parse().unwrap()).unwrap();
            placers.push(game.current_player());
            game.place_piece(0, col).unwrap();
        }
        assert_eq!(
            placers,
            vec![PlayerId::Two, PlayerId::One, PlayerId::Two, PlayerId::One]
        );
        assert_eq!(game.outcome(), Outcome::Win(PlayerId::One));
        assert!(game.is_over());

        let before = game.clone();
        assert_eq!(game.select_piece(piece!("EMIW")), Err(IllegalMove::GameAlreadyOver));
        assert_eq!(game.place_piece(3, 3), Err(IllegalMove::GameAlreadyOver));
        assert_eq!(game, before);

        game.reset();
        assert_eq!(game, Game::new());
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let target = drawn_board();
        let mut game = Game::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                assert_eq!(game.outcome(), Outcome::Continue);
                game.select_piece(target.get(row, col).unwrap()).unwrap();
                game.place_piece(row, col).unwrap();
            }
        }
        assert_eq!(game.outcome(), Outcome::Draw);
        assert!(game.pool().is_empty());
        assert_eq!(game.board(), &target);
    }

    #[test]
    fn computer_against_computer() {
        for seed in 0..4 {
            let mut ais = [
                QuartoAi::new(1, StdRng::seed_from_u64(seed)),
                QuartoAi::new(2, StdRng::seed_from_u64(seed + 100)),
            ];
            let mut game = Game::new();
            let mut num_steps = 0;
            while !game.is_over() {
                let ai = &mut ais[game.current_player().index()];
                match game.phase() {
                    Phase::SelectPiece => {
                        game.ai_select_piece(ai).unwrap();
                    }
                    Phase::PlacePiece { .. } => {
                        game.ai_place_piece(ai).unwrap();
                    }
                }
                num_steps += 1;
                assert_catalog_is_split(&game);
            }
            assert!(num_steps <= 32);
            assert_eq!(num_steps % 2, 0);
            match game.outcome() {
                Outcome::Win(_) => assert!(game.board().check_win()),
                Outcome::Draw => assert!(game.board().is_full()),
                Outcome::Continue => unreachable!(),
            }
        }
    }
}
