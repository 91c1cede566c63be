//! Per-board turn controller.
//!
//! Owns one board and drives its tiles through the flip → resolve cycle:
//!
//! ```text
//! AwaitingFirstFlip ──flip──▶ AwaitingSecondFlip ──flip──▶ Resolving
//!        ▲                                                    │
//!        └──────────────── resolution delay ──────────────────┤
//!                                                             ▼
//!                                                         Finished
//! ```
//!
//! Deferred work (pair resolution, the stats transition, the intro preview)
//! is scheduled on the controller's own [`Timeline`]. Tearing the controller
//! down cancels all of it.
//!
//! ## Terminal conditions
//!
//! Checked after each resolution, in this order:
//!
//! 1. Every tile matched: the board is won. In a hot-seat round the seat is
//!    reported as winner. Stats follow after `stats_delay_ms`.
//! 2. Single player only: the pair just resolved was the last try allowed by
//!    the difficulty. Seat 1 is reported (the loss marker) and stats follow
//!    immediately. This check runs even if step 1 fired.
//! 3. Hot seat only: the turn passes to the other board.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::handoff::TurnHandoff;
use super::streak::{score_pair, BestStreak};
use crate::board::{generate, Board, Symbol, TileState};
use crate::core::{BestStreakPolicy, Difficulty, GameConfig, GameError, GameMode, GameRng, PlayerId, Timings};
use crate::timing::Timeline;

/// How a board's round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardOutcome {
    /// Single player cleared the board within the try limit.
    Won,
    /// Single player ran out of tries.
    Lost,
    /// Hot seat: this seat cleared its board first.
    WonBy(PlayerId),
}

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No tile face up.
    AwaitingFirstFlip,
    /// One tile face up.
    AwaitingSecondFlip { first: usize },
    /// Two tiles face up, evaluation scheduled.
    Resolving { pair: [usize; 2], matched: bool },
    /// No further flips accepted.
    Finished(BoardOutcome),
}

/// Why a flip request changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipRejection {
    /// The board has finished.
    Finished,
    /// Every tile is showing during the intro preview.
    Previewing,
    /// No tile at that index.
    OutOfRange,
    /// The tile is locked face up.
    AlreadyMatched,
    /// The tile is already face up.
    AlreadyFlipped,
    /// Two tiles are waiting to be resolved.
    PairPending,
    /// Hot seat: it is the other board's turn.
    NotYourTurn,
    /// The round has been decided and is heading to the stats screen.
    RoundOver,
    /// No round is being played.
    NotPlaying,
}

/// Result of a flip request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipOutcome {
    /// First tile of a pair turned face up.
    Revealed,
    /// Second tile turned face up; the pair resolves after the delay.
    /// `matched` is the presentation layer's cue for the celebration effect.
    PairFlipped { matched: bool },
    /// Nothing changed.
    Rejected(FlipRejection),
}

impl FlipOutcome {
    /// True if a tile turned face up.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, FlipOutcome::Rejected(_))
    }
}

/// Something the session or presentation layer must react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// A matching pair was just flipped; cue for the celebration effect.
    Celebrate { seat: PlayerId },
    /// A pair finished its delay and was locked or turned back down.
    PairResolved { seat: PlayerId, matched: bool },
    /// Hot seat: `next` is now active. `first` is set the first time the
    /// turn leaves the blue board.
    TurnPassed { next: PlayerId, first: bool },
    /// The board reached a terminal state.
    Finished { seat: PlayerId, outcome: BoardOutcome },
    /// Set the session winner.
    ReportWinner(PlayerId),
    /// Move to the stats screen.
    ShowStats,
    /// Intro preview began; every tile shows its face.
    PreviewStarted { seat: PlayerId },
    /// Intro preview ended.
    PreviewEnded { seat: PlayerId },
}

/// One accepted flip, kept for replays and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipRecord {
    /// Tile index.
    pub tile: usize,
    /// The try this flip belongs to (1-based).
    pub try_number: u32,
    /// Virtual time of the flip.
    pub at_ms: u64,
}

/// What the presentation layer needs to draw a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub symbol: Symbol,
    pub state: TileState,
    /// Face visible, either from its state or from the intro preview.
    pub face_up: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnEvent {
    Resolve { pair: [usize; 2], matched: bool, tries_before: u32 },
    ShowStats,
    BeginPreview,
    EndPreview,
}

/// Turn controller for one board.
#[derive(Clone, Debug)]
pub struct TurnController {
    mode: GameMode,
    seat: PlayerId,
    difficulty: Difficulty,
    timings: Timings,
    policy: BestStreakPolicy,
    board: Board,
    phase: TurnPhase,
    tries: u32,
    streak: u32,
    previewing: bool,
    timeline: Timeline<TurnEvent>,
    history: Vector<FlipRecord>,
}

impl TurnController {
    /// Mount a controller with a freshly generated board.
    pub fn new(
        mode: GameMode,
        seat: PlayerId,
        difficulty: Difficulty,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Result<Self, GameError> {
        let board = generate(difficulty.tile_count(), rng)?;
        Ok(Self::with_board(mode, seat, difficulty, config, board))
    }

    /// Mount a controller on an existing board.
    #[must_use]
    pub fn with_board(mode: GameMode, seat: PlayerId, difficulty: Difficulty, config: &GameConfig, board: Board) -> Self {
        Self {
            mode,
            seat,
            difficulty,
            timings: config.timings.clone(),
            policy: config.best_streak_policy,
            board,
            phase: TurnPhase::AwaitingFirstFlip,
            tries: 0,
            streak: 0,
            previewing: false,
            timeline: Timeline::new(),
            history: Vector::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The board. Always the same board for the controller's lifetime.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Pairs attempted so far.
    #[must_use]
    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// Single player: tries remaining before the limit. `None` in hot seat.
    #[must_use]
    pub fn tries_left(&self) -> Option<u32> {
        match self.mode {
            GameMode::SinglePlayer => Some(self.difficulty.try_limit().saturating_sub(self.tries)),
            GameMode::MultiPlayer => None,
        }
    }

    /// Consecutive matches.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    #[must_use]
    pub fn outcome(&self) -> Option<BoardOutcome> {
        match self.phase {
            TurnPhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Accepted flips in order.
    #[must_use]
    pub fn history(&self) -> &Vector<FlipRecord> {
        &self.history
    }

    /// Virtual time on this board's clock.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.timeline.now()
    }

    /// When the next scheduled transition is due, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.timeline.next_due()
    }

    /// Per-tile drawing data, including the preview overlay.
    #[must_use]
    pub fn tile_views(&self) -> Vec<TileView> {
        self.board
            .tiles()
            .iter()
            .map(|tile| TileView {
                symbol: tile.content,
                state: tile.state,
                face_up: self.previewing || tile.state.is_face_up(),
            })
            .collect()
    }

    // === Input ===

    /// Flip the tile at `index`.
    #[instrument(skip(self, best), fields(seat = %self.seat))]
    pub fn flip(&mut self, index: usize, best: &mut BestStreak) -> FlipOutcome {
        if self.is_finished() {
            return FlipOutcome::Rejected(FlipRejection::Finished);
        }
        if self.previewing {
            return FlipOutcome::Rejected(FlipRejection::Previewing);
        }
        let Some(tile) = self.board.tile(index) else {
            return FlipOutcome::Rejected(FlipRejection::OutOfRange);
        };
        match tile.state {
            TileState::Flipped => return FlipOutcome::Rejected(FlipRejection::AlreadyFlipped),
            TileState::Matched => return FlipOutcome::Rejected(FlipRejection::AlreadyMatched),
            TileState::Start => {}
        }

        let flipped = self.board.flipped_indices();
        if flipped.len() >= 2 {
            return FlipOutcome::Rejected(FlipRejection::PairPending);
        }

        let Some(tile) = self.board.tile_mut(index) else {
            return FlipOutcome::Rejected(FlipRejection::OutOfRange);
        };
        tile.flip();
        let content = tile.content;

        self.history.push_back(FlipRecord {
            tile: index,
            try_number: self.tries + 1,
            at_ms: self.timeline.now(),
        });

        let Some(&first) = flipped.first() else {
            self.phase = TurnPhase::AwaitingSecondFlip { first: index };
            debug!(index, "first tile revealed");
            return FlipOutcome::Revealed;
        };

        let tries_before = self.tries;
        self.tries += 1;

        let matched = self.board.tile(first).is_some_and(|t| t.content == content);
        score_pair(&mut self.streak, matched, self.policy, best);

        let pair = [first, index];
        self.timeline.schedule(
            self.timings.resolution_delay_ms,
            TurnEvent::Resolve {
                pair,
                matched,
                tries_before,
            },
        );
        self.phase = TurnPhase::Resolving { pair, matched };

        debug!(?pair, matched, tries = self.tries, streak = self.streak, "pair flipped");
        FlipOutcome::PairFlipped { matched }
    }

    /// Schedule the intro preview `delay_ms` from now.
    pub fn begin_intro(&mut self, delay_ms: u64) {
        self.timeline.schedule(delay_ms, TurnEvent::BeginPreview);
    }

    // === Time ===

    /// Run every transition due at or before `to`, in order, and return what
    /// happened. `handoff` is the shared hot-seat state; pass `None` in a
    /// single-player round.
    pub fn advance_to(&mut self, to: u64, mut handoff: Option<&mut TurnHandoff>) -> Vec<Signal> {
        let mut signals = Vec::new();
        while let Some((_, event)) = self.timeline.pop_due(to) {
            self.handle(event, handoff.as_deref_mut(), &mut signals);
        }
        self.timeline.advance_clock(to);
        signals
    }

    /// Cancel everything still scheduled. Called when the play screen
    /// unmounts; returns how many transitions were dropped.
    pub fn teardown(&mut self) -> usize {
        self.previewing = false;
        let dropped = self.timeline.cancel_all();
        if dropped > 0 {
            debug!(seat = %self.seat, dropped, "cancelled pending transitions");
        }
        dropped
    }

    fn handle(&mut self, event: TurnEvent, handoff: Option<&mut TurnHandoff>, signals: &mut Vec<Signal>) {
        match event {
            TurnEvent::Resolve {
                pair,
                matched,
                tries_before,
            } => self.resolve(pair, matched, tries_before, handoff, signals),
            TurnEvent::ShowStats => signals.push(Signal::ShowStats),
            TurnEvent::BeginPreview => {
                self.previewing = true;
                self.timeline
                    .schedule(self.timings.intro_duration_ms, TurnEvent::EndPreview);
                signals.push(Signal::PreviewStarted { seat: self.seat });
            }
            TurnEvent::EndPreview => {
                self.previewing = false;
                signals.push(Signal::PreviewEnded { seat: self.seat });
            }
        }
    }

    fn resolve(
        &mut self,
        pair: [usize; 2],
        matched: bool,
        tries_before: u32,
        handoff: Option<&mut TurnHandoff>,
        signals: &mut Vec<Signal>,
    ) {
        for index in pair {
            if let Some(tile) = self.board.tile_mut(index) {
                tile.resolve(matched);
            }
        }
        self.phase = TurnPhase::AwaitingFirstFlip;
        signals.push(Signal::PairResolved {
            seat: self.seat,
            matched,
        });

        if self.board.all_matched() {
            let outcome = match self.mode {
                GameMode::SinglePlayer => BoardOutcome::Won,
                GameMode::MultiPlayer => {
                    signals.push(Signal::ReportWinner(self.seat));
                    BoardOutcome::WonBy(self.seat)
                }
            };
            self.finish(outcome, signals);
            self.timeline.schedule(self.timings.stats_delay_ms, TurnEvent::ShowStats);
        }

        if self.mode == GameMode::SinglePlayer && tries_before + 1 >= self.difficulty.try_limit() {
            // The stats screen is shown right away; drop any delayed transition.
            self.timeline.cancel_all();
            self.finish(BoardOutcome::Lost, signals);
            signals.push(Signal::ReportWinner(PlayerId::SECOND));
            signals.push(Signal::ShowStats);
        }

        if self.mode == GameMode::MultiPlayer {
            if let Some(handoff) = handoff {
                let first = handoff.pass_from(self.seat);
                signals.push(Signal::TurnPassed {
                    next: handoff.active_player(),
                    first,
                });
            }
        }
    }

    fn finish(&mut self, outcome: BoardOutcome, signals: &mut Vec<Signal>) {
        self.phase = TurnPhase::Finished(outcome);
        info!(seat = %self.seat, ?outcome, tries = self.tries, "board finished");
        signals.push(Signal::Finished {
            seat: self.seat,
            outcome,
        });
    }
}
