mod game;
mod player;
mod standings;
pub use game::*;
pub use player::*;
pub use standings::*;
