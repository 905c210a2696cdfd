//! Core engine-facing contracts.
//!
//! Defines the interface between the window runtime and the application:
//! the lifecycle hooks, the per-frame context, and the render parameters the
//! control surface feeds in.

mod app;
mod ctx;
mod params;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub use params::{ColorChannel, ParamSliders, RenderParams, COLOR_RANGE, ITERATIONS_RANGE};
