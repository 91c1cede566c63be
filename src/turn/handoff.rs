//! Turn state shared by the two boards of a hot-seat round.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Timings};

/// Whose board is active, and whether the red board has had its turn intro.
///
/// Only the active seat's board accepts flips; the presentation layer
/// derives the highlighted board from [`TurnHandoff::active_player`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnHandoff {
    red_start: bool,
    active_player: PlayerId,
}

impl TurnHandoff {
    /// Blue (seat 0) starts; red has not started yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set once the first pair of the round has resolved.
    #[must_use]
    pub fn red_start(&self) -> bool {
        self.red_start
    }

    /// Seat whose board is active.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    #[must_use]
    pub fn is_active(&self, seat: PlayerId) -> bool {
        self.active_player == seat
    }

    /// Pass the turn after `seat` resolved a pair.
    ///
    /// Returns true if this raised `red_start` for the first time.
    pub fn pass_from(&mut self, seat: PlayerId) -> bool {
        let first = !self.red_start;
        self.red_start = true;
        self.active_player = seat.other();
        first
    }

    /// Delay before a board's intro preview given the current flag.
    #[must_use]
    pub fn intro_delay(&self, timings: &Timings) -> u64 {
        if self.red_start {
            timings.handoff_intro_delay_ms
        } else {
            timings.intro_delay_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blue_starts() {
        let handoff = TurnHandoff::new();
        assert!(!handoff.red_start());
        assert!(handoff.is_active(PlayerId::FIRST));
    }

    #[test]
    fn test_pass_alternates() {
        let mut handoff = TurnHandoff::new();

        assert!(handoff.pass_from(PlayerId::FIRST));
        assert_eq!(handoff.active_player(), PlayerId::SECOND);

        assert!(!handoff.pass_from(PlayerId::SECOND));
        assert_eq!(handoff.active_player(), PlayerId::FIRST);
        assert!(handoff.red_start());
    }

    #[test]
    fn test_intro_delay() {
        let timings = Timings::default();
        let mut handoff = TurnHandoff::new();
        assert_eq!(handoff.intro_delay(&timings), 300);
        handoff.pass_from(PlayerId::FIRST);
        assert_eq!(handoff.intro_delay(&timings), 1400);
    }
}
