//! The heuristic that the search falls back on when it stops looking ahead.
use crate::board::full_line;
use crate::{common_attributes, Board, Piece, BOARD_SIZE};

/// How many attributes all four pieces of a line agree on.
///
/// A line with an empty cell scores 0, no matter how close it is to completion.
pub fn score_line(line: [Option<Piece>; BOARD_SIZE]) -> i32 {
    match full_line(line) {
        Some(pieces) => common_attributes(&pieces).count() as i32,
        None => 0,
    }
}

/// The sum of [`score_line`] over all 10 lines.
pub fn score_board(board: &Board) -> i32 {
    board.lines().map(score_line).sum()
}
