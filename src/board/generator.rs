//! Board generation.
//!
//! A board is the first `tile_count / 2` catalog symbols, each placed twice,
//! in uniformly shuffled order. Boards are generated once per play-screen
//! lifetime; the owning controller hands out the same board on every read.

use smallvec::SmallVec;
use tracing::{debug, instrument};

use super::symbol::Symbol;
use super::tile::{Tile, TileState};
use crate::core::{GameError, GameRng};

/// An ordered sequence of paired tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Build a board from explicit tiles.
    ///
    /// Intended for fixtures and replays; [`generate`] is the normal entry
    /// point. The same shape checks apply, and every symbol must appear
    /// exactly twice.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, GameError> {
        check_tile_count(tiles.len())?;
        let paired = tiles
            .iter()
            .all(|a| tiles.iter().filter(|b| b.content == a.content).count() == 2);
        if !paired {
            return Err(GameError::UnpairedTiles);
        }
        Ok(Self { tiles })
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a generated board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    /// All tiles in position order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at `index`.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub(crate) fn tile_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    /// Positions of the tiles currently face up awaiting evaluation.
    #[must_use]
    pub fn flipped_indices(&self) -> SmallVec<[usize; 2]> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_flipped())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of tiles in `Flipped`.
    #[must_use]
    pub fn flipped_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_flipped()).count()
    }

    /// Number of pairs already matched.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_matched()).count() / 2
    }

    /// True once every tile is `Matched`.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.tiles.iter().all(|t| t.state == TileState::Matched)
    }
}

fn check_tile_count(tile_count: usize) -> Result<usize, GameError> {
    if tile_count % 2 != 0 {
        return Err(GameError::OddTileCount(tile_count));
    }
    if tile_count == 0 {
        return Err(GameError::EmptyBoard);
    }
    let pairs = tile_count / 2;
    if pairs > Symbol::CATALOG.len() {
        return Err(GameError::TooManyPairs {
            requested: pairs,
            available: Symbol::CATALOG.len(),
        });
    }
    Ok(pairs)
}

/// Generate a freshly shuffled board of `tile_count` tiles.
///
/// ```
/// use memory_match::board::generate;
/// use memory_match::core::GameRng;
///
/// let board = generate(16, &mut GameRng::new(1)).unwrap();
/// assert_eq!(board.len(), 16);
/// assert!(generate(15, &mut GameRng::new(1)).is_err());
/// ```
#[instrument(skip(rng))]
pub fn generate(tile_count: usize, rng: &mut GameRng) -> Result<Board, GameError> {
    let pairs = check_tile_count(tile_count)?;

    let used = &Symbol::CATALOG[..pairs];
    let mut tiles: Vec<Tile> = used.iter().chain(used).copied().map(Tile::new).collect();
    rng.shuffle(&mut tiles);

    debug!(tile_count, pairs, "generated board");
    Ok(Board { tiles })
}
