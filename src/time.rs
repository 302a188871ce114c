//! Fixed-cadence auto-mine clock using an accumulator pattern.
//!
//! The host calls `update()` whenever it wakes up (animation frame, interval
//! callback) with a wall-clock timestamp. GameTime turns the elapsed time into
//! a whole number of ticks of `tick_interval_ms`, carrying the remainder, so
//! the engine itself never looks at a clock.

/// Largest gap (ms) credited in one update. Longer gaps (tab backgrounded,
/// machine asleep) are cut down to this.
pub const MAX_CATCH_UP_MS: f64 = 5000.0;

pub struct GameTime {
    /// Milliseconds per tick (1000ms = 1 tick/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None before the first one
    last_timestamp: Option<f64>,
}

impl GameTime {
    /// `tick_interval_ms`: wall-clock milliseconds per tick (0 is treated as 1).
    pub fn new(tick_interval_ms: u32) -> Self {
        Self {
            ms_per_tick: tick_interval_ms.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp in milliseconds.
    /// Returns the number of ticks that came due since the previous call.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_CATCH_UP_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }

    /// Forget the last timestamp and any partial tick.
    pub fn restart(&mut self) {
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }
}

/// Current `performance.now()` in milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> Option<f64> {
    Some(web_sys::window()?.performance()?.now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_returns_zero_ticks() {
        let mut gt = GameTime::new(1000);
        assert_eq!(gt.update(12_345.0), 0);
    }

    #[test]
    fn one_tick_per_second() {
        let mut gt = GameTime::new(1000);
        gt.update(0.0);
        assert_eq!(gt.update(999.0), 0);
        assert_eq!(gt.update(1000.0), 1);
        assert_eq!(gt.total_ticks, 1);
    }

    #[test]
    fn remainder_carried_over() {
        let mut gt = GameTime::new(1000);
        gt.update(0.0);
        assert_eq!(gt.update(1500.0), 1); // 500ms left over
        assert_eq!(gt.update(2000.0), 1); // 500 + 500
        assert_eq!(gt.total_ticks, 2);
    }

    #[test]
    fn clamp_large_delta() {
        let mut gt = GameTime::new(1000);
        gt.update(0.0);
        // An hour away is credited as MAX_CATCH_UP_MS.
        assert_eq!(gt.update(3_600_000.0), 5);
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut gt = GameTime::new(1000);
        gt.update(5000.0);
        assert_eq!(gt.update(1000.0), 0);
        assert_eq!(gt.update(2000.0), 1);
    }

    #[test]
    fn steady_60fps_for_three_seconds() {
        let mut gt = GameTime::new(1000);
        gt.update(0.0);
        let mut total = 0u32;
        for i in 1..=180 {
            total += gt.update(i as f64 * 16.667);
        }
        assert_eq!(total, 3);
    }

    #[test]
    fn restart_drops_partial_tick() {
        let mut gt = GameTime::new(1000);
        gt.update(0.0);
        gt.update(900.0);
        gt.restart();
        assert_eq!(gt.update(10_000.0), 0);
        assert_eq!(gt.update(10_200.0), 0);
        assert_eq!(gt.update(11_000.0), 1);
    }

    #[test]
    fn zero_interval_does_not_divide_by_zero() {
        let mut gt = GameTime::new(0);
        gt.update(0.0);
        assert_eq!(gt.update(10.0), 10);
    }
}
