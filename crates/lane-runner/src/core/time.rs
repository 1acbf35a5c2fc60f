/// Repeating interval accumulator.
/// Turns variable frame deltas into a count of whole intervals elapsed, so a
/// periodic action fires the right number of times however the frames land.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    /// Length of one interval in seconds.
    interval: f32,
    /// Time carried over from previous frames.
    accumulator: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns how many intervals completed.
    /// Unlike a render-loop timestep there is no cap: a long frame owes
    /// every interval it covered.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        let steps = (self.accumulator / self.interval) as u32;
        self.accumulator -= steps as f32 * self.interval;
        steps
    }

    /// Fraction of the current interval already elapsed (0.0 to 1.0).
    pub fn fraction(&self) -> f32 {
        self.accumulator / self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_interval_fires_once() {
        let mut timer = IntervalTimer::new(2.0);
        assert_eq!(timer.accumulate(2.0), 1);
        assert_eq!(timer.fraction(), 0.0);
    }

    #[test]
    fn partial_frames_carry_over() {
        let mut timer = IntervalTimer::new(2.0);
        assert_eq!(timer.accumulate(1.5), 0);
        assert_eq!(timer.accumulate(1.0), 1);
        assert!((timer.fraction() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn long_frame_is_not_capped() {
        let mut timer = IntervalTimer::new(2.0);
        assert_eq!(timer.accumulate(12.0), 6);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut timer = IntervalTimer::new(1.0);
        assert_eq!(timer.accumulate(-3.0), 0);
        assert_eq!(timer.accumulate(1.0), 1);
    }
}
