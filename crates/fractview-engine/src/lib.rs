//! fractview engine crate.
//!
//! Owns the platform + GPU runtime pieces and the render/interaction core of the
//! viewer: view transform, frame renderer, pan/zoom controller and FPS sampling.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
