//! End-to-end session tests.
//!
//! These drive a `Session` the way a presentation layer would: screen
//! actions, flips on the real shuffled boards, and virtual time.

use memory_match::board::{Board, TileState};
use memory_match::core::{Difficulty, GameMode, PlayerId};
use memory_match::session::{Banner, GameOutcome, Screen, Session};
use memory_match::turn::{FlipOutcome, FlipRejection, Signal};
use rustc_hash::FxHashMap;

fn playing(seed: u64, mode: GameMode, difficulty: Difficulty) -> Session {
    let mut session = Session::in_memory(seed);
    session.start();
    session.choose_mode(mode).unwrap();
    session.set_difficulty(difficulty).unwrap();
    assert_eq!(session.screen(), Screen::Play);
    session
}

/// Index pairs sharing a symbol, in first-seen order.
fn pairs(board: &Board) -> Vec<(usize, usize)> {
    let mut seen = FxHashMap::default();
    let mut out = Vec::new();
    for (i, tile) in board.tiles().iter().enumerate() {
        if let Some(first) = seen.insert(tile.content, i) {
            out.push((first, i));
        }
    }
    out
}

/// Two face-down tiles with different symbols.
fn mismatch(board: &Board) -> (usize, usize) {
    let tiles = board.tiles();
    let first = tiles.iter().position(|t| t.state == TileState::Start).unwrap();
    let second = tiles
        .iter()
        .position(|t| t.state == TileState::Start && t.content != tiles[first].content)
        .unwrap();
    (first, second)
}

fn wait_for_turn(session: &mut Session, seat: PlayerId) {
    for _ in 0..100 {
        let board = session.board(seat).unwrap();
        if session.active_player() == Some(seat) && !board.is_previewing() {
            return;
        }
        session.advance(50);
    }
    panic!("{seat} never got the turn");
}

/// Flip a pair, then let it resolve.
fn play_pair(session: &mut Session, seat: PlayerId, (a, b): (usize, usize)) -> Vec<Signal> {
    wait_for_turn(session, seat);
    assert_eq!(session.flip(seat, a), FlipOutcome::Revealed);
    assert!(matches!(session.flip(seat, b), FlipOutcome::PairFlipped { .. }));
    session.advance(690)
}

#[test]
fn test_single_player_easy_loses_after_fifteen_misses() {
    let mut session = playing(3, GameMode::SinglePlayer, Difficulty::Easy);

    for attempt in 0..15 {
        assert_eq!(session.screen(), Screen::Play, "left play before attempt {attempt}");
        assert_eq!(session.tries_left(), Some(15 - attempt));
        let pair = mismatch(session.board(PlayerId::FIRST).unwrap().board());
        play_pair(&mut session, PlayerId::FIRST, pair);
    }

    assert_eq!(session.screen(), Screen::Stats);
    assert_eq!(session.winner(), PlayerId::SECOND);
    assert_eq!(session.outcome(), Some(GameOutcome::Lost));

    let stats = session.stats().unwrap();
    assert_eq!(stats.banner(PlayerId::FIRST), Some(Banner::Lose));
    assert_eq!(stats.banners.len(), 1);

    assert_eq!(
        session.flip(PlayerId::FIRST, 0),
        FlipOutcome::Rejected(FlipRejection::NotPlaying)
    );
}

#[test]
fn test_single_player_hard_loses_after_fourteen_misses() {
    let mut session = playing(4, GameMode::SinglePlayer, Difficulty::Hard);

    for _ in 0..13 {
        let pair = mismatch(session.board(PlayerId::FIRST).unwrap().board());
        play_pair(&mut session, PlayerId::FIRST, pair);
    }
    assert_eq!(session.screen(), Screen::Play);

    let pair = mismatch(session.board(PlayerId::FIRST).unwrap().board());
    let signals = play_pair(&mut session, PlayerId::FIRST, pair);

    assert!(signals.contains(&Signal::ReportWinner(PlayerId::SECOND)));
    assert!(signals.contains(&Signal::ShowStats));
    assert_eq!(session.screen(), Screen::Stats);
}

#[test]
fn test_single_player_clears_board() {
    let mut session = playing(5, GameMode::SinglePlayer, Difficulty::Easy);
    let all_pairs = pairs(session.board(PlayerId::FIRST).unwrap().board());
    assert_eq!(all_pairs.len(), 8);

    for pair in all_pairs {
        let signals = play_pair(&mut session, PlayerId::FIRST, pair);
        assert!(signals.contains(&Signal::Celebrate { seat: PlayerId::FIRST }));
    }

    // Stats follow the final match after 500 ms.
    assert_eq!(session.screen(), Screen::Play);
    assert_eq!(
        session.flip(PlayerId::FIRST, 0),
        FlipOutcome::Rejected(FlipRejection::RoundOver)
    );
    session.advance(499);
    assert_eq!(session.screen(), Screen::Play);
    let signals = session.advance(1);
    assert_eq!(signals, vec![Signal::ShowStats]);

    assert_eq!(session.screen(), Screen::Stats);
    assert_eq!(session.winner(), PlayerId::FIRST);
    assert_eq!(session.outcome(), Some(GameOutcome::Won));
    assert_eq!(session.stats().unwrap().banner(PlayerId::FIRST), Some(Banner::Win));

    // Deferred policy: the eighth match offered the streak before it.
    assert_eq!(session.best_streak(), 7);
}

#[test]
fn test_two_player_second_seat_wins() {
    let mut session = playing(9, GameMode::MultiPlayer, Difficulty::Easy);
    let red_pairs = pairs(session.board(PlayerId::SECOND).unwrap().board());

    assert_eq!(session.active_player(), Some(PlayerId::FIRST));
    assert_eq!(
        session.flip(PlayerId::SECOND, 0),
        FlipOutcome::Rejected(FlipRejection::NotYourTurn)
    );

    for (turn, pair) in red_pairs.into_iter().enumerate() {
        let blue_miss = mismatch(session.board(PlayerId::FIRST).unwrap().board());
        let signals = play_pair(&mut session, PlayerId::FIRST, blue_miss);
        assert!(signals.contains(&Signal::TurnPassed {
            next: PlayerId::SECOND,
            first: turn == 0,
        }));

        play_pair(&mut session, PlayerId::SECOND, pair);
    }

    assert_eq!(session.winner(), PlayerId::SECOND);
    session.advance(500);

    assert_eq!(session.screen(), Screen::Stats);
    assert_eq!(session.outcome(), Some(GameOutcome::Winner(PlayerId::SECOND)));
    let stats = session.stats().unwrap();
    assert_eq!(stats.banner(PlayerId::FIRST).unwrap().to_string(), "You Lose");
    assert_eq!(stats.banner(PlayerId::SECOND).unwrap().to_string(), "You Win");
}

#[test]
fn test_red_intro_follows_first_handoff() {
    let mut session = playing(12, GameMode::MultiPlayer, Difficulty::Easy);
    session.advance(900);
    assert!(!session.handoff().unwrap().red_start());

    let miss = mismatch(session.board(PlayerId::FIRST).unwrap().board());
    session.flip(PlayerId::FIRST, miss.0);
    session.flip(PlayerId::FIRST, miss.1);
    session.advance(690);

    assert!(session.handoff().unwrap().red_start());
    assert_eq!(session.now(), 1590);
    assert_eq!(session.board(PlayerId::SECOND).unwrap().next_due(), Some(1590 + 1400));

    session.advance(1400);
    assert!(session.board(PlayerId::SECOND).unwrap().is_previewing());
    assert!(!session.board(PlayerId::FIRST).unwrap().is_previewing());
}

#[test]
fn test_restart_reshuffles() {
    let mut session = playing(21, GameMode::SinglePlayer, Difficulty::Hard);
    let first = session.board(PlayerId::FIRST).unwrap().board().clone();

    // Repeated reads during a round return the same board.
    session.advance(2_000);
    assert_eq!(session.board(PlayerId::FIRST).unwrap().board(), &first);

    session.end();
    assert_eq!(session.screen(), Screen::Start);
    assert_eq!(session.difficulty(), None);
    assert_eq!(session.mode(), GameMode::SinglePlayer);

    session.start();
    session.choose_mode(GameMode::SinglePlayer).unwrap();
    session.set_difficulty(Difficulty::Hard).unwrap();

    let second = session.board(PlayerId::FIRST).unwrap().board();
    assert_eq!(second.len(), 20);
    assert_ne!(second, &first);
}

#[test]
fn test_end_cancels_pending_transitions() {
    let mut session = playing(2, GameMode::SinglePlayer, Difficulty::Easy);
    session.advance(900);
    let miss = mismatch(session.board(PlayerId::FIRST).unwrap().board());
    session.flip(PlayerId::FIRST, miss.0);
    session.flip(PlayerId::FIRST, miss.1);

    session.end();
    assert!(session.advance(10_000).is_empty());
    assert_eq!(session.screen(), Screen::Start);
}

#[test]
fn test_winner_resets_on_new_round() {
    let mut session = playing(8, GameMode::SinglePlayer, Difficulty::Hard);
    for _ in 0..14 {
        let pair = mismatch(session.board(PlayerId::FIRST).unwrap().board());
        play_pair(&mut session, PlayerId::FIRST, pair);
    }
    assert_eq!(session.winner(), PlayerId::SECOND);
    assert_eq!(session.screen(), Screen::Stats);

    session.end();
    assert_eq!(session.screen(), Screen::Start);
    assert_eq!(session.difficulty(), None);
    assert_eq!(session.mode(), GameMode::SinglePlayer);
    assert!(session.stats().is_none());

    session.start();
    session.choose_mode(GameMode::SinglePlayer).unwrap();
    session.set_difficulty(Difficulty::Easy).unwrap();
    assert_eq!(session.winner(), PlayerId::FIRST);
}

#[test]
fn test_red_preview_can_land_on_blue_turn() {
    // The red intro is timed from the first handoff, not from red's next turn.
    let mut session = playing(13, GameMode::MultiPlayer, Difficulty::Easy);
    session.advance(900);

    let blue = mismatch(session.board(PlayerId::FIRST).unwrap().board());
    session.flip(PlayerId::FIRST, blue.0);
    session.flip(PlayerId::FIRST, blue.1);
    session.advance(690);

    let red = mismatch(session.board(PlayerId::SECOND).unwrap().board());
    assert_eq!(session.flip(PlayerId::SECOND, red.0), FlipOutcome::Revealed);
    session.flip(PlayerId::SECOND, red.1);
    session.advance(690);
    assert_eq!(session.active_player(), Some(PlayerId::FIRST));

    session.advance(2990 - 2280);
    assert!(session.board(PlayerId::SECOND).unwrap().is_previewing());
    assert_eq!(session.active_player(), Some(PlayerId::FIRST));

    let blue = mismatch(session.board(PlayerId::FIRST).unwrap().board());
    assert_eq!(session.flip(PlayerId::FIRST, blue.0), FlipOutcome::Revealed);
}
