//! The entry points for a front end that drives a game step by step.
//!
//! [`Game`](crate::Game) is built from these, so a front end can either use
//! them directly on its own state, or use a `Game`.
use rand::Rng;

use crate::{Board, IllegalPlacement, Outcome, Piece, PiecesSet, PlayerId, QuartoAi, ALL_PIECES_SET};

/// A fresh game: an empty board, all pieces available, and player one to move.
pub fn initialize_game() -> (Board, PiecesSet, PlayerId) {
    (Board::new(), ALL_PIECES_SET, PlayerId::One)
}

/// Take the piece at position `index` of the pool, in the order the pool iterates in.
///
/// Returns the piece and the remaining pool, or `None` if the index is out of range.
pub fn handle_piece_selection(pool: PiecesSet, index: usize) -> Option<(Piece, PiecesSet)> {
    let piece = pool.nth(index)?;
    Some((piece, pool.remove(piece)))
}

/// Place `piece` for `player` and report how the game continues.
///
/// On error the board is unchanged and the caller should ask for another cell.
pub fn handle_placement(
    board: &mut Board,
    piece: Piece,
    row: usize,
    col: usize,
    player: PlayerId,
) -> Result<Outcome, IllegalPlacement> {
    board.place(piece, row, col)?;
    let outcome = if board.check_win() {
        Outcome::Win(player)
    } else if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Continue
    };
    Ok(outcome)
}

pub fn request_ai_piece_choice<R: Rng>(ai: &mut QuartoAi<R>, pool: PiecesSet) -> Option<Piece> {
    ai.choose_piece(pool)
}

pub fn request_ai_placement<R: Rng>(
    ai: &mut QuartoAi<R>,
    board: &Board,
    piece: Piece,
) -> Option<(usize, usize)> {
    ai.best_placement(board, piece)
}
