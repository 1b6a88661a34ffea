//! Integration tests for streaks and time tracking
//!
//! Days are advanced on a pinned clock shared with the game, so the tests
//! cover the calendar rules without waiting on real time:
//! - Consecutive days extend the streak, a gap resets it
//! - Freeze tokens bridge a gap
//! - Time-spent ticks and the startup backfill

use huzzlingo::catalog::LessonCatalog;
use huzzlingo::core::calendar::FixedClock;
use huzzlingo::core::config::GameConfig;
use huzzlingo::game::Game;
use huzzlingo::progress::StreakChange;
use huzzlingo::storage::MemoryStore;

fn new_game(clock: &FixedClock) -> Game<MemoryStore, &FixedClock> {
    Game::new(
        GameConfig::default(),
        LessonCatalog::builtin(),
        MemoryStore::new(),
        clock,
    )
}

// ============================================================================
// Streak
// ============================================================================

#[test]
fn test_week_of_practice() {
    let clock = FixedClock::at_date(2026, 1, 5);
    let mut game = new_game(&clock);

    assert_eq!(game.complete_practice(), StreakChange::Started);
    for _ in 0..6 {
        clock.advance_days(1);
        assert_eq!(game.complete_practice(), StreakChange::Extended);
        // a second session the same day changes nothing
        assert_eq!(game.complete_practice(), StreakChange::Unchanged);
    }

    let stats = game.stats();
    assert_eq!(stats.current_streak, 7);
    assert_eq!(stats.longest_streak, 7);
}

#[test]
fn test_missed_day_resets_but_keeps_best() {
    let clock = FixedClock::at_date(2026, 1, 5);
    let mut game = new_game(&clock);

    game.complete_practice();
    clock.advance_days(1);
    game.complete_practice();
    clock.advance_days(1);
    game.complete_practice();

    clock.advance_days(2);
    assert_eq!(game.complete_practice(), StreakChange::Reset);
    assert_eq!(game.streak().current_streak, 1);
    assert_eq!(game.streak().longest_streak, 3);
}

#[test]
fn test_freeze_bridges_gap() {
    let clock = FixedClock::at_date(2026, 1, 5);
    let mut game = new_game(&clock);

    game.complete_practice();
    game.add_streak_freeze();
    assert_eq!(game.streak().streak_freeze_count, 1);

    clock.advance_days(3);
    assert_eq!(game.complete_practice(), StreakChange::Frozen);
    assert_eq!(game.streak().current_streak, 2);
    assert_eq!(game.streak().streak_freeze_count, 0);

    // no freezes left
    clock.advance_days(3);
    assert_eq!(game.complete_practice(), StreakChange::Reset);
    assert!(!game.use_streak_freeze());
}

#[test]
fn test_reset_streak_keeps_freezes() {
    let clock = FixedClock::at_date(2026, 1, 5);
    let mut game = new_game(&clock);

    game.complete_practice();
    game.add_streak_freeze();
    game.reset_streak();

    assert_eq!(game.streak().current_streak, 0);
    assert_eq!(game.streak().longest_streak, 1);
    assert_eq!(game.streak().streak_freeze_count, 1);
    assert!(game.streak().last_practice_date.is_none());
}

// ============================================================================
// Time spent
// ============================================================================

#[test]
fn test_ticks_accumulate_whole_intervals() {
    let clock = FixedClock::at_date(2026, 1, 5);
    let mut game = new_game(&clock);

    clock.advance(chrono::Duration::seconds(90));
    assert_eq!(game.tick(), 1);
    // the half interval carries over
    clock.advance(chrono::Duration::seconds(30));
    assert_eq!(game.tick(), 1);
    assert_eq!(game.tick(), 0);

    assert_eq!(game.learner().time_spent_minutes, 2);
    assert_eq!(game.stats().formatted_time(), "2m");
}

#[test]
fn test_time_away_is_backfilled_on_reload() {
    let clock = FixedClock::at_date(2026, 1, 5);
    let game = new_game(&clock);
    let store = game.into_store();

    clock.advance_minutes(75);
    let game = Game::new(GameConfig::default(), LessonCatalog::builtin(), store, &clock);

    assert_eq!(game.learner().time_spent_minutes, 75);
    assert_eq!(game.stats().formatted_time(), "1h 15m");
}
