//! Per-tile visibility state machine.
//!
//! ```text
//! Start ──flip──▶ Flipped ──resolve(match)──▶ Matched
//!   ▲                │
//!   └─resolve(miss)──┘
//! ```
//!
//! `Matched` is terminal. There is no direct `Start → Matched` edge, and a
//! flipped tile cannot be flipped back by the player.

use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// Visibility state of a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileState {
    /// Face down.
    #[default]
    Start,
    /// Face up, waiting for its pair to be evaluated.
    Flipped,
    /// Face up and locked.
    Matched,
}

impl TileState {
    /// State after a flip request, or `None` if the flip is not allowed.
    #[must_use]
    pub const fn after_flip(self) -> Option<TileState> {
        match self {
            TileState::Start => Some(TileState::Flipped),
            TileState::Flipped | TileState::Matched => None,
        }
    }

    /// State after the pair this tile belongs to is evaluated.
    #[must_use]
    pub const fn after_resolve(self, matched: bool) -> Option<TileState> {
        match (self, matched) {
            (TileState::Flipped, true) => Some(TileState::Matched),
            (TileState::Flipped, false) => Some(TileState::Start),
            _ => None,
        }
    }

    /// Whether the face is visible without any preview overlay.
    #[must_use]
    pub const fn is_face_up(self) -> bool {
        !matches!(self, TileState::Start)
    }
}

impl std::fmt::Display for TileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileState::Start => f.write_str("start"),
            TileState::Flipped => f.write_str("flipped"),
            TileState::Matched => f.write_str("matched"),
        }
    }
}

/// A tile on the board. Identity is its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// The face shared with exactly one other tile.
    pub content: Symbol,

    /// Current visibility.
    pub state: TileState,
}

impl Tile {
    /// Create a face-down tile.
    #[must_use]
    pub const fn new(content: Symbol) -> Self {
        Self {
            content,
            state: TileState::Start,
        }
    }

    /// Turn the tile face up. Returns false (and leaves the tile alone) if it
    /// is not face down.
    pub fn flip(&mut self) -> bool {
        match self.state.after_flip() {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Lock or revert a flipped tile. Returns false if the tile was not flipped.
    pub fn resolve(&mut self, matched: bool) -> bool {
        match self.state.after_resolve(matched) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.state == TileState::Flipped
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == TileState::Matched
    }
}
