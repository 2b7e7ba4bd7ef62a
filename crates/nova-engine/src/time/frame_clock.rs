use std::time::{Duration, Instant};

/// Counts frames and paces `execute_frame` to the configured budget.
///
/// Without a target the clock only counts; pacing is then left to the
/// swapchain's present mode.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frames: u64,
    overruns: u64,
    target: Option<Duration>,
}

impl FrameClock {
    pub fn with_target(target: Option<Duration>) -> Self {
        Self { target, ..Self::default() }
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Frames whose work alone took longer than the target.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Ends the frame that started at `started`: counts it, then sleeps out
    /// the rest of the budget. Returns the time the frame's work took.
    pub fn finish(&mut self, started: Instant) -> Duration {
        let spent = Instant::now().saturating_duration_since(started);
        self.frames = self.frames.wrapping_add(1);

        match self.remaining(spent) {
            Some(rest) => std::thread::sleep(rest),
            None if self.target.is_some_and(|t| spent > t) => {
                self.overruns += 1;
                log::debug!("frame {} took {spent:?}, over budget", self.frames);
            }
            None => {}
        }
        spent
    }

    fn remaining(&self, spent: Duration) -> Option<Duration> {
        self.target?.checked_sub(spent).filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_counts_frames() {
        let mut clock = FrameClock::default();
        clock.finish(Instant::now());
        clock.finish(Instant::now());
        assert_eq!(clock.frame_count(), 2);
        assert_eq!(clock.overruns(), 0);
    }

    #[test]
    fn no_target_means_no_pacing() {
        let clock = FrameClock::default();
        assert_eq!(clock.remaining(Duration::ZERO), None);
    }

    #[test]
    fn finish_waits_out_the_budget() {
        let mut clock = FrameClock::with_target(Some(Duration::from_millis(20)));
        let started = Instant::now();
        clock.finish(started);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn overrun_frame_does_not_wait_and_is_counted() {
        let mut clock = FrameClock::with_target(Some(Duration::from_millis(1)));
        let started = Instant::now() - Duration::from_millis(50);
        let spent = clock.finish(started);
        assert!(spent >= Duration::from_millis(50));
        assert_eq!(clock.overruns(), 1);
    }
}
