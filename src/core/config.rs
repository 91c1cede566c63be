//! Game configuration types.
//!
//! - `GameMode`: single seat against a move limit, or two hot-seat boards
//! - `Difficulty`: board size and move limit presets
//! - `Timings`: every deferred transition, in virtual milliseconds
//! - `GameConfig`: combines timings with best-streak persistence settings
//!
//! `GameConfig` can be built in code with the `with_*` methods or loaded from
//! TOML; any field left out of the document keeps its default.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Number of players at the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// One board, limited tries.
    #[default]
    SinglePlayer,
    /// Two boards side by side, players alternate after every pair.
    MultiPlayer,
}

impl GameMode {
    /// Number of boards mounted for this mode.
    #[must_use]
    pub const fn player_count(self) -> usize {
        match self {
            GameMode::SinglePlayer => 1,
            GameMode::MultiPlayer => 2,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::SinglePlayer => f.write_str("singlePlayer"),
            GameMode::MultiPlayer => f.write_str("multiPlayer"),
        }
    }
}

/// Difficulty preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 16 tiles, 15 tries.
    Easy,
    /// 20 tiles, 14 tries.
    Hard,
}

impl Difficulty {
    /// Tiles on the board.
    #[must_use]
    pub const fn tile_count(self) -> usize {
        match self {
            Difficulty::Easy => 16,
            Difficulty::Hard => 20,
        }
    }

    /// Tries a single player gets before losing.
    #[must_use]
    pub const fn try_limit(self) -> u32 {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Hard => 14,
        }
    }

    /// Tooltip text shown next to the preset on the select screen.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "This mode is relatively easy with only 16 tiles and you get 15 tries.",
            Difficulty::Hard => {
                "This is a real challenge. 4 extra tiles means you only get 14 tries to match 20 tiles!"
            }
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

/// Which streak value the best-streak check reads on the second flip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BestStreakPolicy {
    /// Compare the streak as it was before this pair was scored. A new record
    /// is stored one pair late.
    #[default]
    Deferred,
    /// Compare the streak after this pair was scored.
    Immediate,
}

/// Delays for every scheduled transition, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Time both flipped tiles stay visible before matching or reverting.
    pub resolution_delay_ms: u64,
    /// Pause between clearing the board and showing the stats screen.
    pub stats_delay_ms: u64,
    /// Delay before a board's intro preview when the round opens.
    pub intro_delay_ms: u64,
    /// Delay before the red board's preview once the turn first passes to it.
    pub handoff_intro_delay_ms: u64,
    /// How long the intro preview keeps every tile face up.
    pub intro_duration_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            resolution_delay_ms: 690,
            stats_delay_ms: 500,
            intro_delay_ms: 300,
            handoff_intro_delay_ms: 1400,
            intro_duration_ms: 600,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scheduled transition delays.
    pub timings: Timings,

    /// Storage key of the persisted best streak.
    pub best_streak_key: String,

    /// Best-streak comparison timing.
    pub best_streak_policy: BestStreakPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            best_streak_key: "bestStreak".to_string(),
            best_streak_policy: BestStreakPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing fields keep their defaults.
    ///
    /// ```
    /// use memory_match::core::{BestStreakPolicy, GameConfig};
    ///
    /// let config = GameConfig::from_toml_str(r#"
    ///     best_streak_policy = "immediate"
    ///
    ///     [timings]
    ///     resolution_delay_ms = 1000
    /// "#).unwrap();
    ///
    /// assert_eq!(config.best_streak_policy, BestStreakPolicy::Immediate);
    /// assert_eq!(config.timings.resolution_delay_ms, 1000);
    /// assert_eq!(config.timings.stats_delay_ms, 500);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, GameError> {
        toml::from_str(source).map_err(|e| GameError::InvalidConfig(e.to_string()))
    }

    /// Replace all timings.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the pair resolution delay.
    #[must_use]
    pub fn with_resolution_delay(mut self, ms: u64) -> Self {
        self.timings.resolution_delay_ms = ms;
        self
    }

    /// Set the storage key for the best streak.
    #[must_use]
    pub fn with_best_streak_key(mut self, key: impl Into<String>) -> Self {
        self.best_streak_key = key.into();
        self
    }

    /// Set the best-streak comparison timing.
    #[must_use]
    pub fn with_best_streak_policy(mut self, policy: BestStreakPolicy) -> Self {
        self.best_streak_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::Easy.tile_count(), 16);
        assert_eq!(Difficulty::Hard.tile_count(), 20);
        assert_eq!(Difficulty::Easy.try_limit(), 15);
        assert_eq!(Difficulty::Hard.try_limit(), 14);
        assert!(Difficulty::Hard.description().contains("14 tries"));
    }

    #[test]
    fn test_mode_player_count() {
        assert_eq!(GameMode::SinglePlayer.player_count(), 1);
        assert_eq!(GameMode::MultiPlayer.player_count(), 2);
        assert_eq!(GameMode::default(), GameMode::SinglePlayer);
    }

    #[test]
    fn test_default_timings() {
        let timings = Timings::default();
        assert_eq!(timings.resolution_delay_ms, 690);
        assert_eq!(timings.stats_delay_ms, 500);
        assert_eq!(timings.intro_delay_ms, 300);
        assert_eq!(timings.handoff_intro_delay_ms, 1400);
        assert_eq!(timings.intro_duration_ms, 600);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_resolution_delay(10)
            .with_best_streak_key("memory.best")
            .with_best_streak_policy(BestStreakPolicy::Immediate);

        assert_eq!(config.timings.resolution_delay_ms, 10);
        assert_eq!(config.best_streak_key, "memory.best");
        assert_eq!(config.best_streak_policy, BestStreakPolicy::Immediate);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_bad_toml() {
        let err = GameConfig::from_toml_str("best_streak_policy = \"sometimes\"").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&GameMode::MultiPlayer).unwrap(), "\"multiPlayer\"");
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
    }
}
