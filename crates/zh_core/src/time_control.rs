//! Time control and search limits for engines.
//!
//! A move request carries either a fixed per-move budget, the game clock
//! (remaining time plus increment) for the engine to budget itself, or a
//! simulation count. `TimeControl` is the shared stop flag and stopwatch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Remaining time and increment for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    pub remaining: Duration,
    pub increment: Duration,
}

/// Search limits that control when an engine should stop searching.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Fixed number of simulations (None = engine default)
    pub simulations: Option<u32>,
    /// Fixed time for this move
    pub move_time: Option<Duration>,
    /// Game clock for engines that budget their own time
    pub clock: Option<GameClock>,
    /// Stop flag and stopwatch for this search
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Let the engine use its configured budget.
    pub fn engine_default() -> Self {
        Self {
            simulations: None,
            move_time: None,
            clock: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Run exactly `n` simulations.
    pub fn simulations(n: u32) -> Self {
        Self {
            simulations: Some(n),
            ..Self::engine_default()
        }
    }

    /// Create limits with only a time constraint.
    pub fn time(move_time: Duration) -> Self {
        Self {
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
            ..Self::engine_default()
        }
    }

    /// Budget from the game clock.
    pub fn clock(remaining: Duration, increment: Duration) -> Self {
        Self {
            clock: Some(GameClock {
                remaining,
                increment,
            }),
            ..Self::engine_default()
        }
    }

    /// Check if search should stop.
    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Start the time control clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::engine_default()
    }
}

/// Thread-safe time controller that tracks whether search should stop.
///
/// Cheap to clone; clones share the stop flag, so a front end can stop a
/// search from another thread.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
}

impl TimeControl {
    /// Create a new time controller.
    ///
    /// # Arguments
    /// * `time_limit` - Maximum time allowed for search (None = infinite)
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
        }
    }

    /// Start the clock. Should be called when search begins.
    pub fn start(&self) {
        let mut start = self.start_time.write().unwrap_or_else(|e| e.into_inner());
        *start = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Check the clock and set the stop flag once the limit has passed.
    /// Searches poll this between simulations.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(limit) = self.time_limit
            && self.elapsed() >= limit
        {
            self.stop();
            return true;
        }
        false
    }

    /// Get elapsed time since search started.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
