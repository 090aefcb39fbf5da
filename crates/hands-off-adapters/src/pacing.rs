//! Fixed-rate frame pacing for sources that could otherwise run flat out.

use std::time::{Duration, Instant};

/// Sleeps so that successive calls to [`wait`](Self::wait) are at least one
/// frame interval apart.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next: Option<Instant>,
}

impl FramePacer {
    /// Paces at `fps` frames per second. Zero, non-finite, or rates too
    /// slow for a representable interval disable pacing.
    #[must_use]
    pub fn new(fps: f64) -> Self {
        let interval = (fps.is_finite() && fps > 0.0)
            .then(|| Duration::try_from_secs_f64(1.0 / fps).ok())
            .flatten();
        Self {
            interval,
            next: None,
        }
    }

    /// A pacer that never sleeps.
    #[must_use]
    pub const fn unpaced() -> Self {
        Self {
            interval: None,
            next: None,
        }
    }

    /// The frame interval, if pacing is enabled.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Blocks until the next frame is due. The first call returns at once.
    pub fn wait(&mut self) {
        let Some(interval) = self.interval else {
            return;
        };
        let now = Instant::now();
        if let Some(due) = self.next {
            if due > now {
                std::thread::sleep(due - now);
            }
        }
        // Schedule from the later of due time and now, so a slow consumer
        // does not cause a burst afterwards.
        let base = self.next.map_or(now, |due| due.max(now));
        self.next = base.checked_add(interval);
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::unpaced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rates_disable_pacing() {
        assert!(FramePacer::new(0.0).interval().is_none());
        assert!(FramePacer::new(-5.0).interval().is_none());
        assert!(FramePacer::new(f64::NAN).interval().is_none());
    }

    #[test]
    fn test_tiny_rate_does_not_panic() {
        assert!(FramePacer::new(1e-20).interval().is_none());
        assert!(FramePacer::new(f64::MIN_POSITIVE).interval().is_none());
    }

    #[test]
    fn test_slow_rate_first_wait_returns_immediately() {
        // One frame per ~31 years: representable, but far beyond any Instant.
        let mut pacer = FramePacer::new(1e-9);
        assert!(pacer.interval().is_some());
        let start = Instant::now();
        pacer.wait();
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_interval_from_fps() {
        assert_eq!(
            FramePacer::new(20.0).interval(),
            Some(Duration::from_millis(50))
        );
    }

    #[test]
    fn test_wait_spaces_calls() {
        let mut pacer = FramePacer::new(100.0);
        let start = Instant::now();
        pacer.wait();
        pacer.wait();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_unpaced_returns_immediately() {
        let mut pacer = FramePacer::unpaced();
        let start = Instant::now();
        for _ in 0..100 {
            pacer.wait();
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
