//! Fixed-step simulation time

/// Time tracking for a fixed-step simulation.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    /// Seconds per step
    step: f32,
    /// Seconds elapsed during the current step
    delta: f32,
    /// Total simulated seconds
    elapsed: f64,
    /// Steps taken so far
    frame: u64,
}

impl Time {
    /// Create a tracker stepping at `tick_rate` steps per second.
    #[must_use]
    pub fn with_tick_rate(tick_rate: u32) -> Self {
        Self {
            step: 1.0 / tick_rate.max(1) as f32,
            delta: 0.0,
            elapsed: 0.0,
            frame: 0,
        }
    }

    /// Advance by one step.
    pub fn advance(&mut self) {
        self.delta = self.step;
        self.elapsed += f64::from(self.step);
        self.frame += 1;
    }

    /// Seconds covered by the current step (0 before the first step).
    #[must_use]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Seconds per step.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total simulated seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Steps taken so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::with_tick_rate(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_advance() {
        let mut time = Time::with_tick_rate(4);
        assert_eq!(time.delta(), 0.0);

        time.advance();
        time.advance();

        assert_eq!(time.delta(), 0.25);
        assert_eq!(time.frame(), 2);
        assert!((time.elapsed() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let time = Time::with_tick_rate(0);
        assert_eq!(time.step(), 1.0);
    }
}
