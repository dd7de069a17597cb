use std::time::Duration;

use super::surface::Surface;

/// Elapsed time of the current autoplay cycle, projected onto the progress bar.
#[derive(Debug, Clone, Default)]
pub struct ProgressClock {
    started: Duration,
}

impl ProgressClock {
    pub fn reset(&mut self, now: Duration, surface: &mut Surface) {
        self.started = now;
        surface.progress_percent = 0.0;
    }

    /// Fraction of `duration` elapsed since the last reset, clamped to `[0, 1]`.
    pub fn fraction(&self, now: Duration, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    pub fn tick(&self, now: Duration, duration: Duration, running: bool, surface: &mut Surface) {
        surface.progress_percent = if running {
            self.fraction(now, duration) * 100.0
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_reset_zeroes_fill() {
        let mut clock = ProgressClock::default();
        let mut surface = Surface::new(1, 0);
        surface.progress_percent = 42.0;
        clock.reset(ms(500), &mut surface);
        assert_eq!(surface.progress_percent, 0.0);
    }

    #[test]
    fn test_fill_is_monotonic_and_clamped() {
        let mut clock = ProgressClock::default();
        let mut surface = Surface::new(1, 0);
        clock.reset(ms(1000), &mut surface);

        let mut last = 0.0;
        for t in (1000..=4000).step_by(100) {
            clock.tick(ms(t), ms(2000), true, &mut surface);
            assert!(surface.progress_percent >= last);
            assert!((0.0..=100.0).contains(&surface.progress_percent));
            last = surface.progress_percent;
        }
        assert_eq!(surface.progress_percent, 100.0);
    }

    #[test]
    fn test_halfway() {
        let mut clock = ProgressClock::default();
        let mut surface = Surface::new(1, 0);
        clock.reset(ms(0), &mut surface);
        clock.tick(ms(5000), ms(10_000), true, &mut surface);
        assert!((surface.progress_percent - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_not_running_forces_zero() {
        let mut clock = ProgressClock::default();
        let mut surface = Surface::new(1, 0);
        clock.reset(ms(0), &mut surface);
        clock.tick(ms(9000), ms(10_000), false, &mut surface);
        assert_eq!(surface.progress_percent, 0.0);
    }

    #[test]
    fn test_time_before_start_clamps_to_zero() {
        let mut clock = ProgressClock::default();
        let mut surface = Surface::new(1, 0);
        clock.reset(ms(1000), &mut surface);
        assert_eq!(clock.fraction(ms(500), ms(1000)), 0.0);
    }
}
