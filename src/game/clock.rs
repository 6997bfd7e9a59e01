use std::time::{Duration, Instant};

/// Wall-clock run timer.
///
/// The boom schedule and the HUD work in whole seconds since the start of
/// the run; the finer-grained windows (big fruit, invincibility) compare
/// `Instant`s directly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GameClock {
    pub(super) started: Instant,
}

impl GameClock {
    pub(super) fn start() -> GameClock {
        GameClock {
            started: Instant::now(),
        }
    }

    pub(super) fn restart(&mut self) {
        self.started = Instant::now();
    }

    pub(super) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whole seconds since the run started
    pub(super) fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Shift the start of the run into the past.  Test hook for exercising
    /// the timed spawns without sleeping.
    #[cfg(test)]
    pub(super) fn rewind(&mut self, by: Duration) {
        self.started -= by;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_clock_reads_zero() {
        let clock = GameClock::start();
        assert_eq!(clock.elapsed_secs(), 0);
    }

    #[test]
    fn rewind_advances_elapsed_time() {
        let mut clock = GameClock::start();
        clock.rewind(Duration::from_secs(11));
        assert!(clock.elapsed_secs() >= 11);
        clock.restart();
        assert_eq!(clock.elapsed_secs(), 0);
    }
}
