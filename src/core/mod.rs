//! Core engine types: seats, RNG, configuration, errors.
//!
//! Everything above this module (boards, turns, sessions) builds on these.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{BestStreakPolicy, Difficulty, GameConfig, GameMode, Timings};
pub use error::GameError;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
