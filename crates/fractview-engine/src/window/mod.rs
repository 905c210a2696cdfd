//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the viewer window, and drives the
//! `core::App` hooks from window events.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
