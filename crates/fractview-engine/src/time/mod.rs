//! Time subsystem.
//!
//! Provides a swappable monotonic clock and the FPS sampler built on it.
//! Intended usage:
//! - one `FpsSampler` per render loop
//! - wrap each rendered frame in `FpsSampler::scope` and call `frame_rendered()` inside it

mod clock;
mod fps;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use fps::{FpsObserver, FpsSampler, SampleScope, SAMPLE_WINDOW};
