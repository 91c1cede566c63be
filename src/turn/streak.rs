//! Current and best streak bookkeeping.
//!
//! The best streak is the only persisted value in the game. It is global to
//! the client (not per seat), read when a play screen mounts, and written as
//! a decimal string whenever a candidate streak meets or exceeds it.

use tracing::{debug, warn};

use crate::core::BestStreakPolicy;
use crate::storage::ScoreStore;

/// Write-through cache of the persisted best streak.
pub struct BestStreak {
    store: Box<dyn ScoreStore>,
    key: String,
    value: u32,
}

impl std::fmt::Debug for BestStreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestStreak")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl BestStreak {
    /// Wrap a store and read the current value (0 if absent).
    pub fn load(store: Box<dyn ScoreStore>, key: impl Into<String>) -> Self {
        let mut best = Self {
            store,
            key: key.into(),
            value: 0,
        };
        best.reload();
        best
    }

    /// Re-read the stored value. Missing, unreadable or malformed values
    /// read as 0.
    pub fn reload(&mut self) {
        self.value = match self.store.get(&self.key) {
            Ok(Some(raw)) => parse_streak(&raw).unwrap_or_else(|| {
                warn!(key = %self.key, raw = %raw, "ignoring malformed best streak");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "could not read best streak");
                0
            }
        };
    }

    /// Current best streak.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Record `streak` if it meets or exceeds the best. Returns true when the
    /// value was written.
    pub fn offer(&mut self, streak: u32) -> bool {
        if streak < self.value {
            return false;
        }
        self.value = streak;
        if let Err(e) = self.store.set(&self.key, &streak.to_string()) {
            warn!(error = %e, streak, "could not persist best streak");
        }
        debug!(streak, "best streak updated");
        true
    }

    /// Give back the underlying store.
    #[must_use]
    pub fn into_store(self) -> Box<dyn ScoreStore> {
        self.store
    }
}

/// Parse a stored decimal streak. Values too large for `u32` clamp to
/// `u32::MAX` so a record is never lowered on the next write.
fn parse_streak(raw: &str) -> Option<u32> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// Score the second flip of a pair: update the running streak and offer the
/// policy's candidate to the best streak.
pub(crate) fn score_pair(current: &mut u32, matched: bool, policy: BestStreakPolicy, best: &mut BestStreak) {
    let before = *current;
    *current = if matched { before + 1 } else { 0 };

    let candidate = match policy {
        BestStreakPolicy::Deferred => before,
        BestStreakPolicy::Immediate => *current,
    };
    best.offer(candidate);
}
