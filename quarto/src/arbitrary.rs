use quickcheck::{Arbitrary, Gen};

use crate::{Board, Piece, PiecesSet, ALL_PIECES, ALL_PIECES_SET, BOARD_SIZE};

/// A board reachable in a real game: distinct pieces on random cells,
/// together with the pieces that are not on the board.
#[derive(Clone, Debug)]
pub struct PartialBoard {
    pub board: Board,
    pub pool: PiecesSet,
}

fn shuffle<T>(g: &mut Gen, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = usize::arbitrary(g) % (i + 1);
        items.swap(i, j);
    }
}

impl Arbitrary for PartialBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut pieces: Vec<Piece> = ALL_PIECES.to_vec();
        shuffle(g, &mut pieces);
        let mut cells: Vec<(usize, usize)> = (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .collect();
        shuffle(g, &mut cells);

        let num_pieces = usize::arbitrary(g) % (pieces.len() + 1);
        let mut board = Board::new();
        let mut pool = ALL_PIECES_SET;
        for (&piece, &(row, col)) in pieces.iter().zip(&cells).take(num_pieces) {
            board
                .place(piece, row, col)
                .expect("Cells are distinct, so each one is empty");
            pool = pool.remove(piece);
        }
        PartialBoard { board, pool }
    }
}

impl Arbitrary for Piece {
    fn arbitrary(g: &mut Gen) -> Self {
        Piece::from_index(u8::arbitrary(g) % 16)
    }
}

impl Arbitrary for PiecesSet {
    fn arbitrary(g: &mut Gen) -> Self {
        PiecesSet {
            bits: u16::arbitrary(g),
        }
    }
}
