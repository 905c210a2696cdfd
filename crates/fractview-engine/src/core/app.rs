use anyhow::Result;

use crate::input::InputEvent;
use crate::render::RenderCtx;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Render-target hooks implemented by the application and driven by the runtime.
///
/// Every GPU-touching hook receives a [`RenderCtx`]; holding one means the
/// window's rendering context is current. Hook order:
///
/// 1. `on_init` exactly once, before anything else
/// 2. `on_resize` with the initial size, then on every size change
/// 3. `on_input` / `on_render` interleaved, as events arrive
/// 4. `on_exit` exactly once, only if `on_init` succeeded
pub trait App {
    /// Creates GPU resources. An error aborts startup.
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()>;

    /// The drawable changed to `width` x `height` physical pixels (either may be 0).
    fn on_resize(&mut self, ctx: &RenderCtx<'_>, width: u32, height: u32);

    /// Called for each translated input event. Request a redraw through `window`.
    fn on_input(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> AppControl {
        let _ = (window, event);
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_render(&mut self, frame: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Releases GPU resources while the context is still alive.
    fn on_exit(&mut self, ctx: &RenderCtx<'_>) {
        let _ = ctx;
    }
}
