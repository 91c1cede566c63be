//! Turn logic: one controller per board, the shared hot-seat handoff, and
//! streak scoring.

mod controller;
mod handoff;
mod streak;

pub use controller::{
    BoardOutcome, FlipOutcome, FlipRecord, FlipRejection, Signal, TileView, TurnController, TurnPhase,
};
pub use handoff::TurnHandoff;
pub use streak::BestStreak;
