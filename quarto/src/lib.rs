pub use board::*;
pub use errors::*;
pub use evaluation::*;
pub use game::*;
pub use interface::*;
pub use pieces::*;
pub use pieces_set::*;
pub use protocol_types::*;
pub use search::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod board;
mod errors;
mod evaluation;
mod game;
mod interface;
mod pieces;
mod pieces_set;
mod protocol_types;
mod search;
mod visualization;
