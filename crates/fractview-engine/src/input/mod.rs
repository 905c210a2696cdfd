//! Input subsystem.
//!
//! The public API never exposes winit types. The runtime translates platform
//! events (see `platform`), `InputState` keeps modifiers and the pointer position, and
//! `PanZoomController` turns pointer gestures into view changes.

mod controller;
pub(crate) mod platform;
mod state;
mod types;

pub use controller::PanZoomController;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, Modifiers, MouseButton, WheelDelta, WHEEL_NOTCH};
