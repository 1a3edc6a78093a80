//! Countdown to the event start

use serde::Serialize;
use std::fmt;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = MS_PER_SECOND * 60;
const MS_PER_HOUR: i64 = MS_PER_MINUTE * 60;
const MS_PER_DAY: i64 = MS_PER_HOUR * 24;

/// Remaining time split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Zero-padded digits for the four timer slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDigits {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Countdown {
    /// Split a remaining distance in milliseconds; non-positive clamps to zero
    pub fn from_remaining(distance_ms: i64) -> Self {
        if distance_ms <= 0 {
            return Self::default();
        }

        Self {
            days: distance_ms / MS_PER_DAY,
            hours: (distance_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Countdown from `now_ms` to `target_ms` (both epoch milliseconds)
    pub fn between(target_ms: i64, now_ms: i64) -> Self {
        Self::from_remaining(target_ms.saturating_sub(now_ms))
    }

    /// True once the target has been reached
    pub fn is_elapsed(&self) -> bool {
        *self == Self::default()
    }

    pub fn digits(&self) -> CountdownDigits {
        CountdownDigits {
            days: format!("{:02}", self.days),
            hours: format!("{:02}", self.hours),
            minutes: format!("{:02}", self.minutes),
            seconds: format!("{:02}", self.seconds),
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Owns the periodic refresh of a countdown
///
/// `H` is the scheduler's handle (an interval in the browser). At most one
/// handle is held, so a second `start` never registers a second cadence, and
/// dropping the handle in `stop` cancels the ticking.
#[derive(Debug)]
pub struct CountdownTimer<H> {
    target_ms: i64,
    tick_ms: u32,
    handle: Option<H>,
}

impl<H> CountdownTimer<H> {
    pub fn new(target_ms: i64, tick_ms: u32) -> Self {
        Self {
            target_ms,
            tick_ms,
            handle: None,
        }
    }

    pub fn target_ms(&self) -> i64 {
        self.target_ms
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Start ticking with a handle from `schedule(tick_ms)`
    ///
    /// Returns `false` without calling `schedule` if already running.
    pub fn start<F>(&mut self, schedule: F) -> bool
    where
        F: FnOnce(u32) -> H,
    {
        if self.handle.is_some() {
            tracing::debug!("countdown already running, ignoring start");
            return false;
        }

        self.handle = Some(schedule(self.tick_ms));
        tracing::info!(target_ms = self.target_ms, tick_ms = self.tick_ms, "countdown started");
        true
    }

    /// Stop ticking; returns whether a handle was dropped
    pub fn stop(&mut self) -> bool {
        let stopped = self.handle.take().is_some();
        if stopped {
            tracing::info!("countdown stopped");
        }
        stopped
    }

    /// Countdown shown at `now_ms`
    pub fn remaining_at(&self, now_ms: i64) -> Countdown {
        Countdown::between(self.target_ms, now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_just_over_one_day() {
        let target = 1_770_717_600_000;
        let countdown = Countdown::between(target, target - 90_061_000);
        assert_eq!(
            countdown,
            Countdown {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        let digits = countdown.digits();
        assert_eq!(digits.days, "01");
        assert_eq!(digits.hours, "01");
        assert_eq!(digits.minutes, "01");
        assert_eq!(digits.seconds, "01");
    }

    #[test]
    fn test_floors_partial_seconds() {
        let countdown = Countdown::from_remaining(59_999);
        assert_eq!(countdown.minutes, 0);
        assert_eq!(countdown.seconds, 59);
        assert_eq!(Countdown::from_remaining(999).to_string(), "00:00:00:00");
    }

    #[test]
    fn test_clamps_at_and_after_target() {
        let target = 1_000_000;
        for now in [target, target + 1, target + 86_400_000] {
            let countdown = Countdown::between(target, now);
            assert!(countdown.is_elapsed());
            assert_eq!(countdown.to_string(), "00:00:00:00");
        }
    }

    #[test]
    fn test_days_above_two_digits() {
        let countdown = Countdown::from_remaining(123 * MS_PER_DAY);
        assert_eq!(countdown.digits().days, "123");
    }

    // Dropping the handle flips this flag, like cancelling an interval
    struct Handle(Rc<Cell<bool>>);

    impl Drop for Handle {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let scheduled = Rc::new(Cell::new(0));
        let cancelled = Rc::new(Cell::new(false));
        let mut timer = CountdownTimer::new(10_000, 1000);

        for _ in 0..2 {
            let scheduled = scheduled.clone();
            let cancelled = cancelled.clone();
            timer.start(move |tick| {
                assert_eq!(tick, 1000);
                scheduled.set(scheduled.get() + 1);
                Handle(cancelled)
            });
        }

        assert_eq!(scheduled.get(), 1);
        assert!(timer.is_running());
        assert!(!cancelled.get());

        assert!(timer.stop());
        assert!(cancelled.get());
        assert!(!timer.is_running());
        assert!(!timer.stop());
    }

    #[test]
    fn test_remaining_at() {
        let timer: CountdownTimer<()> = CountdownTimer::new(MS_PER_HOUR, 1000);
        assert_eq!(timer.remaining_at(0).hours, 1);
        assert!(timer.remaining_at(MS_PER_HOUR * 2).is_elapsed());
    }
}
