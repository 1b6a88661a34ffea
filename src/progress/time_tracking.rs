//! Time-spent accounting
//!
//! Every elapsed tick interval credits one minute. Ticks are reconciled from
//! the clock whenever the caller asks, so no timer thread is needed. Time
//! that passed while the game was closed is backfilled on startup from the
//! last-active stamp.

use crate::core::calendar::whole_minutes_between;
use chrono::{DateTime, Duration, Utc};

/// Minutes credited per elapsed tick
pub const MINUTES_PER_TICK: u64 = 1;

#[derive(Debug, Clone)]
pub struct TimeTracker {
    interval: Duration,
    last_tick: DateTime<Utc>,
}

impl TimeTracker {
    pub fn new(tick_interval_secs: u64, now: DateTime<Utc>) -> Self {
        let secs = tick_interval_secs.max(1) as i64;
        Self {
            interval: Duration::seconds(secs),
            last_tick: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_tick(&self) -> DateTime<Utc> {
        self.last_tick
    }

    /// Whole minutes the game was away since `last_active`
    pub fn backfill_minutes(last_active: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u64 {
        last_active
            .map(|stamp| whole_minutes_between(stamp, now))
            .unwrap_or(0)
    }

    /// Consume the ticks that have elapsed by `now`
    ///
    /// Partial intervals carry over to the next call.
    pub fn take_due_ticks(&mut self, now: DateTime<Utc>) -> u64 {
        if now <= self.last_tick {
            return 0;
        }
        let elapsed = (now - self.last_tick).num_seconds();
        let ticks = elapsed / self.interval.num_seconds();
        if ticks > 0 {
            self.last_tick += Duration::seconds(self.interval.num_seconds() * ticks);
        }
        ticks as u64
    }

    /// Minutes to credit for the ticks due by `now`
    pub fn take_due_minutes(&mut self, now: DateTime<Utc>) -> u64 {
        self.take_due_ticks(now) * MINUTES_PER_TICK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_no_ticks_before_interval() {
        let mut tracker = TimeTracker::new(60, t0());
        assert_eq!(tracker.take_due_ticks(t0() + Duration::seconds(59)), 0);
        assert_eq!(tracker.last_tick(), t0());
    }

    #[test]
    fn test_partial_interval_carries_over() {
        let mut tracker = TimeTracker::new(60, t0());
        assert_eq!(tracker.take_due_ticks(t0() + Duration::seconds(150)), 2);
        assert_eq!(tracker.last_tick(), t0() + Duration::seconds(120));
        assert_eq!(tracker.take_due_ticks(t0() + Duration::seconds(180)), 1);
    }

    #[test]
    fn test_clock_going_backwards_credits_nothing() {
        let mut tracker = TimeTracker::new(60, t0());
        assert_eq!(tracker.take_due_minutes(t0() - Duration::minutes(5)), 0);
    }

    #[test]
    fn test_backfill_whole_minutes() {
        let stamp = t0();
        let now = t0() + Duration::seconds(7 * 60 + 59);
        assert_eq!(TimeTracker::backfill_minutes(Some(stamp), now), 7);
        assert_eq!(TimeTracker::backfill_minutes(None, now), 0);
        assert_eq!(TimeTracker::backfill_minutes(Some(now), stamp), 0);
    }
}
