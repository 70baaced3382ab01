use crate::{Board, BOARD_SIZE};

/// Draws the board in a box, with row and column numbers.
///
/// Each occupied cell shows the code of its piece, empty cells show dots.
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::from("   ");
    for col in 0..BOARD_SIZE {
        result += &format!("{:>5}", col);
    }
    result += "\n   ╭";
    for _ in 0..BOARD_SIZE {
        result += "─────";
    }
    result += "─╮";

    for (row, cells) in board.cells().iter().enumerate() {
        result += &format!("\n{:>2} │", row);
        for cell in cells {
            match cell {
                Some(piece) => result += &format!(" {}", piece),
                None => result += " ····",
            }
        }
        result += " │";
    }

    result += "\n   ╰";
    for _ in 0..BOARD_SIZE {
        result += "─────";
    }
    result += "─╯";
    result
}
