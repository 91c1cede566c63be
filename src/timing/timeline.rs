//! Virtual-clock scheduler for deferred transitions.
//!
//! Every delayed effect in a round (pair resolution, intro preview, the
//! stats transition) is an entry on a `Timeline` owned by the controller it
//! mutates. Time only moves when the owner advances it, which keeps rounds
//! deterministic and testable. Dropping the timeline drops every pending
//! entry, so nothing fires after its owner is torn down.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled entry, used for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u32);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct Entry<E> {
    id: TimerId,
    due: u64,
    event: E,
}

/// Ordered queue of future events on a millisecond clock.
///
/// Entries due at the same instant fire in scheduling order.
///
/// ```
/// use memory_match::timing::Timeline;
///
/// let mut timeline = Timeline::new();
/// timeline.schedule(690, "resolve");
/// let intro = timeline.schedule(300, "reveal");
/// timeline.cancel(intro);
///
/// assert_eq!(timeline.pop_due(500), None);
/// assert_eq!(timeline.pop_due(700), Some((690, "resolve")));
/// assert_eq!(timeline.now(), 690);
/// ```
#[derive(Clone, Debug)]
pub struct Timeline<E> {
    now: u64,
    entries: Vec<Entry<E>>,
    next_id: u32,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    /// Create an empty timeline at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: 0,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of entries waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is scheduled.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedule `event` to fire `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: u64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now.saturating_add(delay_ms),
            event,
        });
        id
    }

    /// Remove a pending entry. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove every pending entry, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// When the earliest pending entry is due.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Remove and return the earliest entry due at or before `until`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<(u64, E)> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i)?;

        let entry = self.entries.remove(position);
        self.now = self.now.max(entry.due);
        Some((entry.due, entry.event))
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn advance_clock(&mut self, to: u64) {
        self.now = self.now.max(to);
    }
}
