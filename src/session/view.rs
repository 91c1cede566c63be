//! Read-only views for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::core::{Difficulty, GameMode, PlayerId};

/// How a round ended, with the `winner` overload resolved.
///
/// The session stores a single `winner` seat: in single player `0` means the
/// board was cleared and `1` means the tries ran out; in hot seat it is the
/// seat that cleared its board first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Single player cleared the board.
    Won,
    /// Single player ran out of tries.
    Lost,
    /// Hot seat winner.
    Winner(PlayerId),
}

impl GameOutcome {
    /// Interpret the stored winner for `mode`.
    #[must_use]
    pub fn from_winner(mode: GameMode, winner: PlayerId) -> Self {
        match mode {
            GameMode::SinglePlayer if winner == PlayerId::FIRST => GameOutcome::Won,
            GameMode::SinglePlayer => GameOutcome::Lost,
            GameMode::MultiPlayer => GameOutcome::Winner(winner),
        }
    }

    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: PlayerId) -> bool {
        match self {
            GameOutcome::Won => seat == PlayerId::FIRST,
            GameOutcome::Lost => false,
            GameOutcome::Winner(p) => *p == seat,
        }
    }
}

/// Stats screen banner for one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Banner {
    Win,
    Lose,
}

impl Banner {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Banner::Win => "You Win",
            Banner::Lose => "You Lose",
        }
    }
}

impl std::fmt::Display for Banner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Everything the stats screen shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsView {
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub outcome: GameOutcome,
    /// One banner per board, in seat order.
    pub banners: Vec<(PlayerId, Banner)>,
    /// Best streak after the round.
    pub best_streak: u32,
}

impl StatsView {
    /// Build the view for a finished round.
    #[must_use]
    pub fn new(mode: GameMode, difficulty: Option<Difficulty>, winner: PlayerId, best_streak: u32) -> Self {
        let outcome = GameOutcome::from_winner(mode, winner);
        let banners = PlayerId::all(mode.player_count())
            .map(|seat| {
                let banner = if outcome.is_winner(seat) { Banner::Win } else { Banner::Lose };
                (seat, banner)
            })
            .collect();
        Self {
            mode,
            difficulty,
            outcome,
            banners,
            best_streak,
        }
    }

    /// Banner for a seat, if that seat had a board.
    #[must_use]
    pub fn banner(&self, seat: PlayerId) -> Option<Banner> {
        self.banners.iter().find(|(s, _)| *s == seat).map(|(_, b)| *b)
    }
}
