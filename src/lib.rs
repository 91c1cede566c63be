//! # memory-match
//!
//! Engine for a tile-matching (concentration) game: a single player against
//! a try limit, or two players alternating on side-by-side boards.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The engine produces state, [`turn::TileView`]s and
//!    [`turn::Signal`]s. Rendering, animation and sound belong to the caller.
//!
//! 2. **Virtual Time**: Every deferred transition (pair resolution, stats
//!    transition, intro preview) is a scheduled entry on a virtual clock that
//!    the caller advances with [`Session::advance`]. Nothing runs on a wall
//!    clock, so games replay exactly.
//!
//! 3. **Explicit State**: Session state is a value. The best streak is read
//!    and written through a [`storage::ScoreStore`] passed in by the caller.
//!
//! ## Modules
//!
//! - `core`: Seats, RNG, configuration, errors
//! - `board`: Symbol catalog, tiles and board generation
//! - `timing`: Cancellable scheduled transitions
//! - `storage`: Best-streak persistence backends
//! - `turn`: Per-board turn controller, hot-seat handoff, streaks
//! - `session`: Screen orchestration and stats views
//!
//! ## Example
//!
//! ```
//! use memory_match::{Difficulty, GameMode, PlayerId, Screen, Session};
//!
//! let mut session = Session::in_memory(42);
//! session.start();
//! session.choose_mode(GameMode::SinglePlayer).unwrap();
//! session.set_difficulty(Difficulty::Easy).unwrap();
//!
//! // Wait out the intro preview, then play.
//! session.advance(900);
//! assert!(session.flip(PlayerId::FIRST, 0).is_accepted());
//! assert_eq!(session.screen(), Screen::Play);
//! ```

pub mod core;
pub mod board;
pub mod timing;
pub mod storage;
pub mod turn;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    BestStreakPolicy, Difficulty, GameConfig, GameMode, Timings,
    GameError,
    PlayerId, PlayerMap,
    GameRng,
};

pub use crate::board::{generate, Board, Symbol, Tile, TileState};

pub use crate::timing::{TimerId, Timeline};

pub use crate::storage::{FileStore, MemoryStore, ScoreStore, StoreError};

pub use crate::turn::{
    BestStreak, BoardOutcome, FlipOutcome, FlipRecord, FlipRejection,
    Signal, TileView, TurnController, TurnHandoff, TurnPhase,
};

pub use crate::session::{Banner, GameOutcome, Screen, Session, StatsView};
