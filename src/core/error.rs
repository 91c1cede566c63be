//! Fatal error types.
//!
//! Only two classes of failure exist in the engine:
//!
//! - **Configuration errors**: an invalid board shape or config file. These
//!   are raised synchronously and never recovered.
//! - **Unreachable-state errors**: a screen name that does not exist. These
//!   indicate a programming defect in the caller.
//!
//! Rejected player input (flipping a matched tile, flipping during
//! resolution) is not an error; see [`crate::turn::FlipOutcome`].

use thiserror::Error;

/// Errors raised by board generation, configuration and session parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The requested tile count cannot be split into pairs.
    #[error("the number of tiles must be even (got {0})")]
    OddTileCount(usize),

    /// A board needs at least one pair.
    #[error("a board needs at least one pair of tiles")]
    EmptyBoard,

    /// More pairs were requested than the symbol catalog holds.
    #[error("{requested} pairs requested but only {available} symbols exist")]
    TooManyPairs { requested: usize, available: usize },

    /// A hand-built board where some symbol does not appear exactly twice.
    #[error("every symbol on a board must appear exactly twice")]
    UnpairedTiles,

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A screen name outside `start`, `select`, `play`, `stats`.
    #[error("invalid game state {0}")]
    UnknownScreen(String),
}
