use serde::{Deserialize, Serialize};

use crate::{Board, Piece, PlayerId};

/// Request for a bot to do something.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame { player: PlayerId },
    /// Request to hand a piece to the opponent.
    ///
    /// The response should be a single [`Piece`] out of `available`.
    SelectPiece {
        board: Board,
        /// The pieces that are not on the board yet, by ascending index.
        available: Vec<Piece>,
    },
    /// Request to place the piece that the opponent selected.
    ///
    /// The response should be a [`Placement`] on an empty cell.
    PlacePiece {
        board: Board,
        piece: Piece,
        /// The pieces that are left after this one, by ascending index.
        available: Vec<Piece>,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// The cell to put a piece on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
}
