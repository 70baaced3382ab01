use crate::{Phase, Piece};

/// The error type for [`Board::place()`](crate::Board::place), i.e. for placing a single piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    OutOfBounds { row: usize, col: usize },
    CellOccupied { row: usize, col: usize, existing: Piece },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside of the board", row, col)
            }
            IllegalPlacement::CellOccupied { row, col, existing } => {
                write!(f, "Cell ({}, {}) is already occupied by {}", row, col, existing)
            }
        }
    }
}

/// The error type for one step of a [`Game`](crate::Game).
///
/// The game is left unchanged when one of these is returned.
#[derive(Debug, PartialEq, Eq)]
pub enum IllegalMove {
    GameAlreadyOver,
    WrongPhase { phase: Phase },
    PieceNotAvailable { piece: Piece },
    PoolIndexOutOfRange { index: usize, pool_size: usize },
    NoPieceToHandOut,
    NoLegalPlacement,
    IllegalPlacement { err: IllegalPlacement },
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::IllegalPlacement { err } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::GameAlreadyOver => write!(f, "The game is already over"),
            IllegalMove::WrongPhase {
                phase: Phase::SelectPiece,
            } => write!(f, "Tried to place a piece, but a piece has to be selected first"),
            IllegalMove::WrongPhase {
                phase: Phase::PlacePiece { piece },
            } => write!(
                f,
                "Tried to select a piece, but the selected piece {} has to be placed first",
                piece
            ),
            IllegalMove::PieceNotAvailable { piece } => {
                write!(f, "Piece {} is not among the available pieces", piece)
            }
            IllegalMove::PoolIndexOutOfRange { index, pool_size } => write!(
                f,
                "Tried to select piece number {}, but only {} pieces are available",
                index, pool_size
            ),
            IllegalMove::NoPieceToHandOut => write!(f, "There is no piece left to hand out"),
            IllegalMove::NoLegalPlacement => write!(f, "There is no empty cell left to place on"),
            IllegalMove::IllegalPlacement { .. } => {
                write!(f, "Tried to place the piece on an unavailable cell")
            }
        }
    }
}

impl From<IllegalPlacement> for IllegalMove {
    fn from(err: IllegalPlacement) -> Self {
        IllegalMove::IllegalPlacement { err }
    }
}
