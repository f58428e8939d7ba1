/// Most time a single `advance` may add, in seconds. Caps catch-up after a
/// stalled frame.
const MAX_BACKLOG: f64 = 0.25;
/// Slack for float drift when comparing the accumulator to the interval.
const EPSILON: f64 = 1e-9;

/// Fixed-interval timer polled from the event loop.
///
/// Accumulates real elapsed time and reports how many whole intervals have
/// passed. A stopped ticker drops its backlog and never fires.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: f64,
    accumulator: f64,
    running: bool,
}

impl Ticker {
    /// New running ticker. `interval` is in seconds and must be positive.
    pub fn new(interval: f64) -> Self {
        assert!(interval > 0.0, "ticker interval must be positive");
        Self {
            interval,
            accumulator: 0.0,
            running: true,
        }
    }

    /// New ticker that waits for `start()`.
    pub fn stopped(interval: f64) -> Self {
        let mut t = Self::new(interval);
        t.running = false;
        t
    }

    /// Add `dt` seconds and return the number of intervals that elapsed.
    ///
    /// A single `dt` counts for at most `MAX_BACKLOG` (or one interval, if
    /// longer); leftover time from earlier calls is always kept.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !self.running {
            return 0;
        }

        let cap = MAX_BACKLOG.max(self.interval);
        self.accumulator += dt.clamp(0.0, cap);

        let mut fired = 0;
        while self.accumulator + EPSILON >= self.interval {
            self.accumulator = (self.accumulator - self.interval).max(0.0);
            fired += 1;
        }
        fired
    }

    /// (Re)start from a clean phase.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = 0.0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_whole_interval() {
        let mut t = Ticker::new(0.1);
        assert_eq!(t.advance(0.05), 0);
        assert_eq!(t.advance(0.06), 1);
        assert_eq!(t.advance(0.2), 2);
    }

    #[test]
    fn backlog_is_clamped() {
        let mut t = Ticker::new(0.05);
        // 10 seconds of stall collapses to 0.25s of backlog.
        assert_eq!(t.advance(10.0), 5);
    }

    #[test]
    fn stopped_ticker_never_fires() {
        let mut t = Ticker::stopped(0.1);
        assert_eq!(t.advance(1.0), 0);

        t.start();
        assert_eq!(t.advance(0.1), 1);

        t.stop();
        assert_eq!(t.advance(1.0), 0);
    }

    #[test]
    fn leftover_carries_into_a_near_cap_step() {
        let mut t = Ticker::new(0.1);
        assert_eq!(t.advance(0.05), 0);
        // 0.05 carried + 0.25 = three whole intervals.
        assert_eq!(t.advance(0.25), 3);
        assert_eq!(t.advance(0.25), 2);
        assert_eq!(t.advance(0.05), 1);
    }

    #[test]
    fn whole_intervals_are_not_lost_to_float_drift() {
        let mut t = Ticker::new(0.1);
        let fired: u32 = (0..10).map(|_| t.advance(0.1)).sum();
        assert_eq!(fired, 10);
        assert_eq!(t.advance(0.25) + t.advance(0.25), 5);
    }

    #[test]
    fn restart_discards_partial_interval() {
        let mut t = Ticker::new(0.1);
        assert_eq!(t.advance(0.09), 0);
        t.start();
        assert_eq!(t.advance(0.02), 0);
    }
}
