//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat index. A single-player round has one seat (`0`);
//! a hot-seat round has two (`0` plays blue on the left board, `1` plays red
//! on the right board).
//!
//! ## PlayerMap
//!
//! Per-seat data backed by `Vec` for O(1) access by `PlayerId`.

use serde::{Deserialize, Serialize};

/// Seat identifier. Indices are 0-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first seat (blue board).
    pub const FIRST: PlayerId = PlayerId(0);

    /// The second seat (red board).
    pub const SECOND: PlayerId = PlayerId(1);

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The opposing seat in a two-seat round.
    #[must_use]
    pub const fn other(self) -> Self {
        Self(1 - (self.0 & 1))
    }

    /// Iterate over all seats for a round with `player_count` seats.
    ///
    /// ```
    /// use memory_match::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(2).collect();
    /// assert_eq!(seats, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use memory_match::core::{PlayerId, PlayerMap};
///
/// let pairs: PlayerMap<u32> = PlayerMap::try_new(2, |seat| Ok::<_, ()>(seat.0 as u32)).unwrap();
/// assert_eq!(pairs.get(PlayerId::SECOND), Some(&1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a PlayerMap from a fallible factory, one entry per seat.
    /// Stops at the first error.
    pub fn try_new<E>(player_count: usize, factory: impl FnMut(PlayerId) -> Result<T, E>) -> Result<Self, E> {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 2, "At most 2 players supported");

        let data = PlayerId::all(player_count).map(factory).collect::<Result<_, _>>()?;

        Ok(Self { data })
    }

    /// Get a seat's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a seat's data mutably, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}
