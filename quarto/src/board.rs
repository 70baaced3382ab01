use serde::{Deserialize, Serialize};

use crate::{common_attributes, visualize_board, Attribute, IllegalPlacement, Piece, PiecesSet};

pub const BOARD_SIZE: usize = 4;

/// The cells of each line that can win the game, as `(row, col)`.
///
/// The 4 rows come first, then the 4 columns, then the main diagonal and the anti-diagonal.
pub const LINES: [[(usize, usize); BOARD_SIZE]; 10] = [
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(3, 0), (3, 1), (3, 2), (3, 3)],
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(0, 3), (1, 3), (2, 3), (3, 3)],
    [(0, 0), (1, 1), (2, 2), (3, 3)],
    [(0, 3), (1, 2), (2, 1), (3, 0)],
];

/// A 4x4 grid of cells, each of which is empty or holds one piece.
///
/// Cells only ever go from empty to occupied. The board itself does not check
/// that a piece is placed at most once; that is up to whoever hands out the
/// pieces (see [`Game`](crate::Game)).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

/// A full line whose pieces agree on at least one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinningLine {
    /// The `(row, col)` coordinates of the four cells.
    pub cells: [(usize, usize); BOARD_SIZE],
    /// Every attribute shared by the four pieces, never empty.
    pub shared_attributes: Vec<Attribute>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board with the given contents, indexed as `cells[row][col]`.
    pub fn from_cells(cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// The piece at the given cell, `None` if it is empty or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Put a piece on an empty cell.
    ///
    /// This is the only way a board changes. On error, the board is untouched.
    pub fn place(&mut self, piece: Piece, row: usize, col: usize) -> Result<(), IllegalPlacement> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .ok_or(IllegalPlacement::OutOfBounds { row, col })?;
        if let Some(existing) = *cell {
            return Err(IllegalPlacement::CellOccupied { row, col, existing });
        }
        *cell = Some(piece);
        Ok(())
    }

    /// A copy of this board with `piece` put on the cell `(row, col)`, which must be empty.
    pub(crate) fn with_piece(&self, piece: Piece, row: usize, col: usize) -> Self {
        debug_assert!(self.cells[row][col].is_none());
        let mut board = *self;
        board.cells[row][col] = Some(piece);
        board
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn num_pieces(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// All pieces on the board.
    pub fn pieces(&self) -> PiecesSet {
        self.cells.iter().flatten().filter_map(|&cell| cell).collect()
    }

    /// The coordinates of all empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[row][col].is_none())
    }

    /// The contents of the line `LINES[line_idx]`.
    pub fn line(&self, line_idx: usize) -> [Option<Piece>; BOARD_SIZE] {
        LINES[line_idx].map(|(row, col)| self.cells[row][col])
    }

    /// The contents of all lines, in the order of [`LINES`].
    pub fn lines(&self) -> impl Iterator<Item = [Option<Piece>; BOARD_SIZE]> + '_ {
        (0..LINES.len()).map(|line_idx| self.line(line_idx))
    }

    /// Is there a full line whose pieces share an attribute?
    ///
    /// Stops at the first winning line.
    pub fn check_win(&self) -> bool {
        self.lines().any(|line| {
            full_line(line).map_or(false, |pieces| common_attributes(&pieces).next().is_some())
        })
    }

    /// Like [`Self::check_win()`], but tells which line won, and why.
    pub fn winning_line(&self) -> Option<WinningLine> {
        LINES.iter().zip(self.lines()).find_map(|(&cells, line)| {
            let pieces = full_line(line)?;
            let shared_attributes: Vec<Attribute> = common_attributes(&pieces).collect();
            (!shared_attributes.is_empty()).then_some(WinningLine {
                cells,
                shared_attributes,
            })
        })
    }
}

/// The pieces of a line, if none of its cells is empty.
pub(crate) fn full_line(line: [Option<Piece>; BOARD_SIZE]) -> Option<[Piece; BOARD_SIZE]> {
    let [a, b, c, d] = line;
    Some([a?, b?, c?, d?])
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_board(self))
    }
}
