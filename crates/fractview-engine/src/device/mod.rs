//! GPU device and window surface.
//!
//! `Gpu` owns the wgpu device/queue and the window's swapchain, hands out
//! `RenderCtx` views of itself, and turns surface failures into a
//! `SurfaceErrorAction`.

mod frame;
mod gpu;
mod init;
mod surface;

pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
