use std::ops::{Deref, DerefMut};
use std::time::Duration;

use super::clock::{Clock, MonotonicClock};

/// Length of one sampling window.
pub const SAMPLE_WINDOW: Duration = Duration::from_millis(1000);

/// Receives frame rates produced by an [`FpsSampler`].
pub trait FpsObserver {
    fn on_fps(&mut self, fps: u32);
}

impl<F> FpsObserver for F
where
    F: FnMut(u32),
{
    fn on_fps(&mut self, fps: u32) {
        self(fps)
    }
}

/// Frame counter that turns a count into a rate once per sampling window.
///
/// The window restarts at the exact instant a sample is taken, so the reset of
/// the counter and the restart of the timer cannot drift apart.
#[derive(Debug)]
pub struct FpsSampler<C: Clock = MonotonicClock> {
    clock: C,
    window: Duration,
    window_start: Duration,
    frame_count: u64,
}

impl FpsSampler<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for FpsSampler<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FpsSampler<C> {
    /// Creates a sampler whose first window starts now.
    pub fn with_clock(clock: C) -> Self {
        let window_start = clock.now();
        Self {
            clock,
            window: SAMPLE_WINDOW,
            window_start,
            frame_count: 0,
        }
    }

    /// Frames counted in the currently open window.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Records one completed frame.
    pub fn frame_rendered(&mut self) {
        self.frame_count = self.frame_count.saturating_add(1);
    }

    /// Closes the window if it has lasted at least [`SAMPLE_WINDOW`].
    ///
    /// Returns the rounded rate for the closed window, or `None` while the window
    /// is still open.
    pub fn sample(&mut self) -> Option<u32> {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.window_start);
        if elapsed < self.window {
            return None;
        }

        let rate = (self.frame_count as f64 / elapsed.as_secs_f64()).round();
        self.frame_count = 0;
        self.window_start = now;

        Some(rate.min(u32::MAX as f64) as u32)
    }

    /// Opens a measurement scope around one frame.
    ///
    /// The sampling check runs when the returned guard is dropped, on every exit
    /// path of the caller (early return and unwinding included).
    pub fn scope<'a, O>(&'a mut self, observer: &'a mut O) -> SampleScope<'a, C, O>
    where
        O: FpsObserver + ?Sized,
    {
        SampleScope {
            sampler: self,
            observer,
        }
    }
}

/// Guard returned by [`FpsSampler::scope`].
///
/// Derefs to the sampler so the frame body can call `frame_rendered()`.
pub struct SampleScope<'a, C: Clock, O: FpsObserver + ?Sized> {
    sampler: &'a mut FpsSampler<C>,
    observer: &'a mut O,
}

impl<C: Clock, O: FpsObserver + ?Sized> Deref for SampleScope<'_, C, O> {
    type Target = FpsSampler<C>;

    fn deref(&self) -> &Self::Target {
        self.sampler
    }
}

impl<C: Clock, O: FpsObserver + ?Sized> DerefMut for SampleScope<'_, C, O> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.sampler
    }
}

impl<C: Clock, O: FpsObserver + ?Sized> Drop for SampleScope<'_, C, O> {
    fn drop(&mut self) {
        if let Some(fps) = self.sampler.sample() {
            log::debug!("fps sample: {fps}");
            self.observer.on_fps(fps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    fn sampler() -> (ManualClock, FpsSampler<ManualClock>) {
        let clock = ManualClock::new();
        let sampler = FpsSampler::with_clock(clock.clone());
        (clock, sampler)
    }

    /// Renders `frames` scoped frames spread evenly so the last one ends at `total_ms`.
    fn run_frames(
        clock: &ManualClock,
        sampler: &mut FpsSampler<ManualClock>,
        frames: u64,
        total_ms: u64,
        seen: &mut Vec<u32>,
    ) {
        let mut observer = |fps: u32| seen.push(fps);
        for i in 0..frames {
            clock.set(Duration::from_millis((i + 1) * total_ms / frames));
            let mut scope = sampler.scope(&mut observer);
            scope.frame_rendered();
        }
    }

    // ── sampling ──────────────────────────────────────────────────────────

    #[test]
    fn thirty_frames_in_one_second_reports_thirty() {
        let (clock, mut s) = sampler();
        let mut seen = Vec::new();
        run_frames(&clock, &mut s, 30, 1000, &mut seen);
        assert_eq!(seen, vec![30]);
        assert_eq!(s.frame_count(), 0);
    }

    #[test]
    fn zero_frames_in_one_second_reports_zero() {
        let (clock, mut s) = sampler();
        let mut seen = Vec::new();
        clock.set(SAMPLE_WINDOW);
        {
            let mut observer = |fps: u32| seen.push(fps);
            let _scope = s.scope(&mut observer);
        }
        assert_eq!(seen, vec![0]);
    }

    #[test]
    fn nothing_emitted_before_window_closes() {
        let (clock, mut s) = sampler();
        let mut seen = Vec::new();
        run_frames(&clock, &mut s, 50, 999, &mut seen);
        assert!(seen.is_empty());
        assert_eq!(s.frame_count(), 50);
    }

    #[test]
    fn rate_is_rounded_over_actual_elapsed_time() {
        let (clock, mut s) = sampler();
        for _ in 0..90 {
            s.frame_rendered();
        }
        clock.set(Duration::from_millis(1500));
        assert_eq!(s.sample(), Some(60));
    }

    #[test]
    fn window_restarts_at_sample_time() {
        let (clock, mut s) = sampler();
        clock.set(Duration::from_millis(1200));
        assert_eq!(s.sample(), Some(0));

        // 999ms after the restart is still inside the new window.
        clock.set(Duration::from_millis(2199));
        assert_eq!(s.sample(), None);

        clock.set(Duration::from_millis(2200));
        assert_eq!(s.sample(), Some(0));
    }

    #[test]
    fn paused_rendering_emits_nothing() {
        let (clock, mut s) = sampler();
        let mut seen = Vec::new();
        run_frames(&clock, &mut s, 3, 48, &mut seen);
        assert!(seen.is_empty());

        // Rendering stops for 10s: no scope closes, so no one is notified.
        clock.advance(Duration::from_secs(10));
        assert!(seen.is_empty());
        assert_eq!(s.frame_count(), 3);

        // The next frame closes the stale window with a single sample.
        let mut observer = |fps: u32| seen.push(fps);
        {
            let mut scope = s.scope(&mut observer);
            scope.frame_rendered();
        }
        assert_eq!(seen, vec![0]);
        assert_eq!(s.frame_count(), 0);
    }

    // ── scope guard ───────────────────────────────────────────────────────

    #[test]
    fn scope_samples_on_early_return() {
        fn frame(s: &mut FpsSampler<ManualClock>, observer: &mut dyn FpsObserver, bail: bool) {
            let mut scope = s.scope(observer);
            if bail {
                return;
            }
            scope.frame_rendered();
        }

        let (clock, mut s) = sampler();
        let mut seen = Vec::new();
        let mut observer = |fps: u32| seen.push(fps);

        frame(&mut s, &mut observer, false);
        clock.set(SAMPLE_WINDOW);
        frame(&mut s, &mut observer, true);

        assert_eq!(seen, vec![1]);
    }

    #[test]
    fn scope_samples_during_unwind() {
        let (clock, mut s) = sampler();
        let mut seen = Vec::new();
        clock.set(SAMPLE_WINDOW);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut observer = |fps: u32| seen.push(fps);
            let mut scope = s.scope(&mut observer);
            scope.frame_rendered();
            panic!("frame body failed");
        }));

        assert!(result.is_err());
        assert_eq!(seen, vec![1]);
    }
}
