//! Coordinate spaces and the view transform.
//!
//! Three spaces are involved:
//! - screen: physical pixels, origin top-left, +Y down
//! - model: normalized, origin at the window center, +Y up; the shorter window
//!   axis spans [-1, 1]
//! - plane: the space the fragment shader evaluates, `center + model / exp(zoom_log)`
//!
//! Zoom and pan never enter the projection matrix; they are shader uniforms.

mod projection;
mod view;
mod viewport;

pub use projection::Projection;
pub use view::{ViewState, WHEEL_STEP, ZOOM_LOG_MAX, ZOOM_LOG_MIN};
pub use viewport::Viewport;
