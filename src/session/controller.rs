//! Session controller: screen orchestration and the round lifecycle.
//!
//! A [`Session`] owns everything that outlives a single round: the config,
//! the RNG, the persisted best streak, and the player's choices. Entering
//! the play screen mounts a round (one board per seat); leaving it tears the
//! round down and drops every pending transition with it.

use tracing::{debug, info, instrument};

use super::screen::Screen;
use super::view::{GameOutcome, StatsView};
use crate::core::{Difficulty, GameConfig, GameError, GameMode, GameRng, PlayerId, PlayerMap};
use crate::storage::{MemoryStore, ScoreStore};
use crate::turn::{BestStreak, FlipOutcome, FlipRejection, Signal, TurnController, TurnHandoff};

/// Boards mounted for the current play screen.
#[derive(Debug)]
struct Round {
    boards: PlayerMap<TurnController>,
    /// Hot seat only.
    handoff: Option<TurnHandoff>,
    /// Virtual time since mount.
    now: u64,
    /// A terminal condition fired; no more flips.
    decided: bool,
}

impl Round {
    fn mount(mode: GameMode, difficulty: Difficulty, config: &GameConfig, rng: &mut GameRng) -> Result<Self, GameError> {
        let mut boards = PlayerMap::try_new(mode.player_count(), |seat| {
            TurnController::new(mode, seat, difficulty, config, &mut rng.fork())
        })?;
        let handoff = match mode {
            GameMode::SinglePlayer => None,
            GameMode::MultiPlayer => Some(TurnHandoff::new()),
        };

        let delay = handoff.map_or(config.timings.intro_delay_ms, |h| h.intro_delay(&config.timings));
        for (_, board) in boards.iter_mut() {
            board.begin_intro(delay);
        }

        Ok(Self {
            boards,
            handoff,
            now: 0,
            decided: false,
        })
    }

    fn next_due(&self) -> Option<u64> {
        self.boards.iter().filter_map(|(_, b)| b.next_due()).min()
    }

    /// Advance every board to `to`, seat order within the same instant.
    fn advance_boards(&mut self, to: u64) -> Vec<Signal> {
        let mut signals = Vec::new();
        for (_, board) in self.boards.iter_mut() {
            signals.extend(board.advance_to(to, self.handoff.as_mut()));
        }
        self.now = to;
        signals
    }

    fn teardown(&mut self) {
        for (_, board) in self.boards.iter_mut() {
            board.teardown();
        }
    }
}

/// One client's game session.
///
/// ## Example
///
/// ```
/// use memory_match::core::{Difficulty, GameMode};
/// use memory_match::session::{Screen, Session};
///
/// let mut session = Session::in_memory(7);
/// session.start();
/// session.choose_mode(GameMode::SinglePlayer).unwrap();
/// session.set_difficulty(Difficulty::Easy).unwrap();
///
/// assert_eq!(session.screen(), Screen::Play);
/// assert_eq!(session.tries_left(), Some(15));
/// ```
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    rng: GameRng,
    best: BestStreak,
    screen: Screen,
    mode: GameMode,
    difficulty: Option<Difficulty>,
    /// Player count picked on the current visit to the select screen.
    mode_chosen: bool,
    winner: PlayerId,
    round: Option<Round>,
    /// Signals raised by input, returned from the next `advance`.
    pending: Vec<Signal>,
}

impl Session {
    /// Create a session on the start screen.
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>, rng: GameRng) -> Self {
        let best = BestStreak::load(store, config.best_streak_key.clone());
        debug!(seed = rng.seed(), best = best.value(), "session created");
        Self {
            config,
            rng,
            best,
            screen: Screen::Start,
            mode: GameMode::default(),
            difficulty: None,
            mode_chosen: false,
            winner: PlayerId::FIRST,
            round: None,
            pending: Vec::new(),
        }
    }

    /// Session for a real client: boards are shuffled from an OS-seeded RNG.
    pub fn with_store(config: GameConfig, store: Box<dyn ScoreStore>) -> Self {
        Self::new(config, store, GameRng::from_entropy())
    }

    /// Default config, in-memory best streak, seeded RNG.
    #[must_use]
    pub fn in_memory(seed: u64) -> Self {
        Self::new(GameConfig::default(), Box::new(MemoryStore::new()), GameRng::new(seed))
    }

    // === Accessors ===

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Raw winner seat. See [`GameOutcome`] for its meaning per mode.
    #[must_use]
    pub fn winner(&self) -> PlayerId {
        self.winner
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Outcome of the last round, once the stats screen is showing.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        (self.screen == Screen::Stats).then(|| GameOutcome::from_winner(self.mode, self.winner))
    }

    /// Stats screen contents, once the stats screen is showing.
    #[must_use]
    pub fn stats(&self) -> Option<StatsView> {
        (self.screen == Screen::Stats)
            .then(|| StatsView::new(self.mode, self.difficulty, self.winner, self.best.value()))
    }

    /// Board for a seat while a round is mounted.
    #[must_use]
    pub fn board(&self, seat: PlayerId) -> Option<&TurnController> {
        self.round.as_ref().and_then(|r| r.boards.get(seat))
    }

    /// Hot-seat turn state while a two-player round is mounted.
    #[must_use]
    pub fn handoff(&self) -> Option<TurnHandoff> {
        self.round.as_ref().and_then(|r| r.handoff)
    }

    /// Seat whose board accepts flips.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        let round = self.round.as_ref()?;
        Some(round.handoff.map_or(PlayerId::FIRST, |h| h.active_player()))
    }

    /// Single player move counter.
    #[must_use]
    pub fn tries_left(&self) -> Option<u32> {
        self.board(PlayerId::FIRST)?.tries_left()
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best.value()
    }

    /// Virtual time since the current round was mounted.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.round.as_ref().map_or(0, |r| r.now)
    }

    /// Give back the best-streak store.
    #[must_use]
    pub fn into_store(self) -> Box<dyn ScoreStore> {
        self.best.into_store()
    }

    // === Screen actions ===

    /// Leave the start screen for selection.
    #[instrument(skip(self), fields(screen = %self.screen))]
    pub fn start(&mut self) {
        if self.screen != Screen::Start {
            debug!("ignoring start outside the start screen");
            return;
        }
        self.mode_chosen = false;
        self.difficulty = None;
        self.enter(Screen::Select);
    }

    /// Pick the player count. Enters play once a difficulty is also chosen.
    #[instrument(skip(self), fields(screen = %self.screen))]
    pub fn choose_mode(&mut self, mode: GameMode) -> Result<(), GameError> {
        if self.screen != Screen::Select {
            debug!("ignoring mode choice outside the select screen");
            return Ok(());
        }
        self.mode = mode;
        self.mode_chosen = true;
        self.enter_play_if_ready()
    }

    /// Pick the difficulty. Enters play once a player count is also chosen.
    #[instrument(skip(self), fields(screen = %self.screen))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        if self.screen != Screen::Select {
            debug!("ignoring difficulty outside the select screen");
            return Ok(());
        }
        self.difficulty = Some(difficulty);
        self.enter_play_if_ready()
    }

    /// Return to the start screen from Play or Stats. Unmounts any round and
    /// clears the difficulty; the player count is kept.
    #[instrument(skip(self), fields(screen = %self.screen))]
    pub fn end(&mut self) {
        if !matches!(self.screen, Screen::Play | Screen::Stats) {
            debug!("ignoring end outside the play and stats screens");
            return;
        }
        self.unmount();
        self.difficulty = None;
        self.mode_chosen = false;
        self.pending.clear();
        self.enter(Screen::Start);
    }

    // === Play ===

    /// Flip a tile on `seat`'s board.
    #[instrument(skip(self), fields(screen = %self.screen))]
    pub fn flip(&mut self, seat: PlayerId, index: usize) -> FlipOutcome {
        if self.screen != Screen::Play {
            return FlipOutcome::Rejected(FlipRejection::NotPlaying);
        }
        let Some(round) = self.round.as_mut() else {
            return FlipOutcome::Rejected(FlipRejection::NotPlaying);
        };
        if round.decided {
            return FlipOutcome::Rejected(FlipRejection::RoundOver);
        }
        if round.handoff.is_some_and(|h| !h.is_active(seat)) {
            return FlipOutcome::Rejected(FlipRejection::NotYourTurn);
        }
        let Some(board) = round.boards.get_mut(seat) else {
            return FlipOutcome::Rejected(FlipRejection::NotYourTurn);
        };

        let outcome = board.flip(index, &mut self.best);
        if outcome == (FlipOutcome::PairFlipped { matched: true }) {
            self.pending.push(Signal::Celebrate { seat });
        }
        outcome
    }

    /// Let `elapsed_ms` of virtual time pass and apply every transition that
    /// falls due, in time order across all boards.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Signal> {
        let mut signals = std::mem::take(&mut self.pending);
        let Some(target) = self.round.as_ref().map(|r| r.now.saturating_add(elapsed_ms)) else {
            return signals;
        };

        while let Some(round) = self.round.as_mut() {
            let Some(next) = round.next_due().filter(|&t| t <= target) else {
                break;
            };
            let batch = round.advance_boards(next);
            for signal in &batch {
                self.apply(*signal);
            }
            signals.extend(batch);
        }

        if let Some(round) = self.round.as_mut() {
            signals.extend(round.advance_boards(target));
        }
        signals
    }

    fn apply(&mut self, signal: Signal) {
        match signal {
            Signal::ReportWinner(seat) => {
                self.winner = seat;
                if let Some(round) = self.round.as_mut() {
                    round.decided = true;
                }
            }
            Signal::Finished { seat, outcome } => {
                info!(%seat, ?outcome, "round decided");
                if let Some(round) = self.round.as_mut() {
                    round.decided = true;
                }
            }
            Signal::TurnPassed { first: true, .. } => {
                let delay_timings = &self.config.timings;
                if let Some(round) = self.round.as_mut() {
                    let delay = round.handoff.map_or(delay_timings.handoff_intro_delay_ms, |h| {
                        h.intro_delay(delay_timings)
                    });
                    if let Some(red) = round.boards.get_mut(PlayerId::SECOND) {
                        red.begin_intro(delay);
                    }
                }
            }
            Signal::ShowStats => {
                if self.screen == Screen::Play {
                    self.unmount();
                    self.enter(Screen::Stats);
                }
            }
            _ => {}
        }
    }

    fn enter_play_if_ready(&mut self) -> Result<(), GameError> {
        let Some(difficulty) = self.difficulty.filter(|_| self.mode_chosen) else {
            return Ok(());
        };
        self.best.reload();
        self.round = Some(Round::mount(self.mode, difficulty, &self.config, &mut self.rng)?);
        self.winner = PlayerId::FIRST;
        self.pending.clear();
        self.enter(Screen::Play);
        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(mut round) = self.round.take() {
            round.teardown();
        }
    }

    fn enter(&mut self, screen: Screen) {
        info!(from = %self.screen, to = %screen, mode = %self.mode, "screen transition");
        self.screen = screen;
    }
}
