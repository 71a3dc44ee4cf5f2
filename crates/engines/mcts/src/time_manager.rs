//! Per-move time budget from the game clock.
//!
//! The first clock-carrying request fixes the normal per-move budget.
//! After a few moves the manager starts watching the clock: once the
//! remaining time drops to 1.5 budgets it spends a small fraction of what
//! is left and reports a switch into the low-time profile, and it reports
//! the switch back when the clock recovers (through increments).

use std::time::Duration;

/// Moves assumed left in the game when the budget is first computed.
pub const MOVES_PER_GAME: u32 = 10;
/// Share of the increment added to the budget.
pub const INCREMENT_AMOUNT: f64 = 0.7;
/// Share of the normal budget used once the clock is watched.
pub const ORIGINAL_TIME_AMOUNT: f64 = 0.7;
/// Share of the remaining time used in the low-time profile.
pub const TIME_PROPORTION: f64 = 0.05;
/// Safety margin kept back from a fixed `movetime`.
pub const MOVE_TIME_MARGIN: Duration = Duration::from_millis(500);

/// `d * factor`, rounded to whole milliseconds.
fn scale(d: Duration, factor: f64) -> Duration {
    Duration::from_millis((d.as_millis() as f64 * factor).round() as u64)
}

#[derive(Debug, Clone, Default)]
pub struct TimeManager {
    per_move: Option<Duration>,
    original: Option<Duration>,
    executed_moves: u32,
    watching: bool,
    low_time: bool,
}

impl TimeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the normal budget has been computed from a clock.
    pub fn is_initialized(&self) -> bool {
        self.original.is_some()
    }

    pub fn init(&mut self, remaining: Duration, increment: Duration) {
        let budget = remaining / MOVES_PER_GAME + scale(increment, INCREMENT_AMOUNT);
        self.per_move = Some(budget);
        self.original = Some(budget);
    }

    /// Recompute the budget from the remaining clock. Returns the new
    /// low-time state when it flips.
    pub fn update(&mut self, remaining: Duration) -> Option<bool> {
        let original = self.original?;
        if !self.watching && self.executed_moves + 1 >= MOVES_PER_GAME {
            self.watching = true;
        }
        if !self.watching {
            return None;
        }

        let low_time = remaining <= original + original / 2;
        self.per_move = Some(if low_time {
            scale(remaining, TIME_PROPORTION)
        } else {
            scale(original, ORIGINAL_TIME_AMOUNT)
        });

        if low_time != self.low_time {
            self.low_time = low_time;
            Some(low_time)
        } else {
            None
        }
    }

    /// Handle a clock request: the first one initialises, later ones update.
    pub fn on_clock(&mut self, remaining: Duration, increment: Duration) -> Option<bool> {
        if self.is_initialized() {
            self.update(remaining)
        } else {
            self.init(remaining, increment);
            None
        }
    }

    /// Fixed time for the next move, less a safety margin.
    pub fn set_move_time(&mut self, move_time: Duration) {
        let budget = move_time
            .saturating_sub(MOVE_TIME_MARGIN)
            .max(Duration::from_millis(1));
        self.per_move = Some(budget);
    }

    pub fn record_move(&mut self) {
        self.executed_moves += 1;
    }

    pub fn per_move(&self) -> Option<Duration> {
        self.per_move
    }

    pub fn executed_moves(&self) -> u32 {
        self.executed_moves
    }

    pub fn is_low_time(&self) -> bool {
        self.low_time
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_init_budget() {
        let mut tm = TimeManager::new();
        assert_eq!(tm.per_move(), None);
        tm.init(ms(60_000), ms(1_000));
        assert_eq!(tm.per_move(), Some(ms(6_700)));
        assert!(tm.is_initialized());
    }

    #[test]
    fn test_clock_only_watched_after_nine_moves() {
        let mut tm = TimeManager::new();
        assert_eq!(tm.on_clock(ms(10_000), ms(0)), None);
        for _ in 0..8 {
            tm.record_move();
            assert_eq!(tm.on_clock(ms(1_000), ms(0)), None);
            assert_eq!(tm.per_move(), Some(ms(1_000)));
        }
        tm.record_move();
        // 9 moves played and 1000 ms left, under 1.5 * 1000
        assert_eq!(tm.on_clock(ms(1_000), ms(0)), Some(true));
        assert_eq!(tm.per_move(), Some(ms(50)));
        assert!(tm.is_low_time());
    }

    #[test]
    fn test_low_time_switches_back() {
        let mut tm = TimeManager::new();
        tm.init(ms(10_000), ms(0));
        for _ in 0..9 {
            tm.record_move();
        }
        assert_eq!(tm.update(ms(5_000)), None);
        assert_eq!(tm.per_move(), Some(ms(700)));
        assert_eq!(tm.update(ms(1_500)), Some(true));
        assert_eq!(tm.update(ms(1_400)), None);
        assert_eq!(tm.per_move(), Some(ms(70)));
        assert_eq!(tm.update(ms(1_600)), Some(false));
        assert_eq!(tm.per_move(), Some(ms(700)));
    }

    #[test]
    fn test_move_time_keeps_margin() {
        let mut tm = TimeManager::new();
        tm.set_move_time(ms(2_000));
        assert_eq!(tm.per_move(), Some(ms(1_500)));
        tm.set_move_time(ms(300));
        assert_eq!(tm.per_move(), Some(ms(1)));
        // A fixed move time does not count as clock initialisation
        assert!(!tm.is_initialized());
    }

    #[test]
    fn test_reset() {
        let mut tm = TimeManager::new();
        tm.init(ms(10_000), ms(0));
        tm.record_move();
        tm.reset();
        assert_eq!(tm.per_move(), None);
        assert_eq!(tm.executed_moves(), 0);
        assert!(!tm.is_low_time());
    }
}
