//! Boards: the symbol catalog, tiles and their state machine, and generation.

mod generator;
mod symbol;
mod tile;

pub use generator::{generate, Board};
pub use symbol::Symbol;
pub use tile::{Tile, TileState};
