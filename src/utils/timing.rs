//! # Fixed Timestep
//!
//! Converts variable frame times into a whole number of fixed game ticks.

/// Most ticks run for a single rendered frame. Longer stalls are dropped
/// instead of replayed.
pub const MAX_TICKS_PER_FRAME: u32 = 5;

/// Accumulates frame time and hands out fixed-length ticks.
///
/// # Examples
///
/// ```
/// use emerald::FixedTimestep;
///
/// let mut timestep = FixedTimestep::new(60);
/// assert_eq!(timestep.advance(1.0 / 60.0), 1);
/// assert_eq!(timestep.advance(0.001), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    tick_seconds: f64,
    accumulator: f64,
    max_ticks: u32,
    dropped_ticks: u64,
}

impl FixedTimestep {
    /// Creates a timestep running `ticks_per_second` ticks (at least one).
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            tick_seconds: 1.0 / ticks_per_second.max(1) as f64,
            accumulator: 0.0,
            max_ticks: MAX_TICKS_PER_FRAME,
            dropped_ticks: 0,
        }
    }

    /// Adds a frame's elapsed time and returns how many ticks to run now.
    pub fn advance(&mut self, frame_seconds: f64) -> u32 {
        if frame_seconds.is_finite() && frame_seconds > 0.0 {
            self.accumulator += frame_seconds;
        }

        // Small tolerance so exact multiples of the tick are not lost to rounding
        let epsilon = self.tick_seconds * 1e-6;
        let mut ticks = 0;
        while self.accumulator + epsilon >= self.tick_seconds {
            self.accumulator = (self.accumulator - self.tick_seconds).max(0.0);
            if ticks < self.max_ticks {
                ticks += 1;
            } else {
                self.dropped_ticks += 1;
            }
        }

        ticks
    }

    /// Length of one tick in seconds.
    pub fn tick_seconds(&self) -> f64 {
        self.tick_seconds
    }

    /// Ticks skipped because a frame took too long.
    pub fn dropped_ticks(&self) -> u64 {
        self.dropped_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut timestep = FixedTimestep::new(60);
        let half = timestep.tick_seconds() / 2.0;

        assert_eq!(timestep.advance(half), 0);
        assert_eq!(timestep.advance(half), 1);
    }

    #[test]
    fn test_runs_several_ticks_after_slow_frame() {
        let mut timestep = FixedTimestep::new(60);
        assert_eq!(timestep.advance(3.0 / 60.0), 3);
    }

    #[test]
    fn test_caps_catch_up() {
        let mut timestep = FixedTimestep::new(60);
        assert_eq!(timestep.advance(1.0), MAX_TICKS_PER_FRAME);
        assert_eq!(timestep.dropped_ticks(), 55);
        assert_eq!(timestep.advance(0.0), 0);
    }

    #[test]
    fn test_ignores_bad_frame_times() {
        let mut timestep = FixedTimestep::new(0);
        assert_eq!(timestep.tick_seconds(), 1.0);
        assert_eq!(timestep.advance(f64::NAN), 0);
        assert_eq!(timestep.advance(-5.0), 0);
    }
}
