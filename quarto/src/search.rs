//! Fixed-depth adversarial search for the placement phase.
//!
//! Beyond the first ply, the search does not know which pieces will be handed
//! out, so every deeper ply places a piece with random attributes instead.
//! There is no pruning, the only cost control is the depth.
use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::{score_board, Board, Piece, PiecesSet};

/// The score of a position with a winning line.
pub const WIN_SCORE: i32 = 100;

/// A depth that keeps the first placement of a game well below a second.
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Pick a piece uniformly at random. Returns `None` if the pool is empty.
pub fn choose_random_piece<R: Rng + ?Sized>(pool: PiecesSet, rng: &mut R) -> Option<Piece> {
    pool.into_iter().choose(rng)
}

/// The cell where placing `piece` leads to the highest [`search`] score.
///
/// Every resulting position is searched `max_depth` plies deep, starting with
/// a minimizing ply. Cells are tried in row-major order and the first cell
/// with the highest score wins. Returns `None` if there is no empty cell.
pub fn best_placement<R: Rng + ?Sized>(
    board: &Board,
    piece: Piece,
    max_depth: u32,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), i32)> = None;
    for (row, col) in board.empty_cells() {
        let child = board.with_piece(piece, row, col);
        let score = search(&child, max_depth, false, &mut *rng);
        trace!(row, col, score, "Scored placement");
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some(((row, col), score));
        }
    }
    if let Some(((row, col), score)) = best {
        debug!(%piece, row, col, score, "Best placement");
    }
    best.map(|(cell, _)| cell)
}

/// Minimax value of `board`, looking `depth` plies ahead.
///
/// A winning line is worth [`WIN_SCORE`] to whoever is to move at this node:
/// positive on a maximizing ply, negative on a minimizing one. Full boards and
/// nodes at depth 0 are scored with [`score_board`].
pub fn search<R: Rng + ?Sized>(board: &Board, depth: u32, maximizing: bool, rng: &mut R) -> i32 {
    if board.check_win() {
        return if maximizing { WIN_SCORE } else { -WIN_SCORE };
    }
    if board.is_full() || depth == 0 {
        return score_board(board);
    }

    let scores = board.empty_cells().map(|(row, col)| {
        let child = board.with_piece(Piece::random(&mut *rng), row, col);
        search(&child, depth - 1, !maximizing, &mut *rng)
    });
    let best = if maximizing { scores.max() } else { scores.min() };
    // The board is not full, so there was at least one child
    best.unwrap_or_else(|| score_board(board))
}

/// The computer player: random piece selection, searched placements.
#[derive(Clone, Debug)]
pub struct QuartoAi<R: Rng> {
    max_depth: u32,
    rng: R,
}

impl<R: Rng> QuartoAi<R> {
    pub fn new(max_depth: u32, rng: R) -> Self {
        Self { max_depth, rng }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The piece to hand to the opponent, see [`choose_random_piece`].
    pub fn choose_piece(&mut self, pool: PiecesSet) -> Option<Piece> {
        choose_random_piece(pool, &mut self.rng)
    }

    /// Where to put `piece`, see [`best_placement`].
    pub fn best_placement(&mut self, board: &Board, piece: Piece) -> Option<(usize, usize)> {
        best_placement(board, piece, self.max_depth, &mut self.rng)
    }
}
