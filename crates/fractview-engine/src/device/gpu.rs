use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::RenderCtx;

use super::surface::SwapChain;
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// The wgpu device and queue plus the swapchain of one window.
///
/// A `&Gpu` (or the [`RenderCtx`] derived from it) is the proof that a rendering
/// context is current: GPU resources are only created, used and released through it.
pub struct Gpu<'w> {
    device: wgpu::Device,
    queue: wgpu::Queue,
    /// Bound to the window, which must outlive it (`'w`).
    swapchain: SwapChain<'w>,
}

impl<'w> Gpu<'w> {
    /// Picks an adapter for `window`, opens a device and configures the swapchain.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; the runtime blocks
    /// on it once at startup.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(
            size.width > 0 && size.height > 0,
            "window has zero size ({}x{})",
            size.width,
            size.height
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("fractview device"),
                required_features: wgpu::Features::empty(),
                required_limits: init.limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open wgpu device")?;

        let swapchain = SwapChain::configure(surface, &adapter, &device, size, &init)?;

        Ok(Self {
            device,
            queue,
            swapchain,
        })
    }

    /// Drawable size in physical pixels. Zero while minimized.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.swapchain.size()
    }

    pub fn is_zero_sized(&self) -> bool {
        !self.swapchain.has_area()
    }

    pub fn render_ctx(&self) -> RenderCtx<'_> {
        let size = self.swapchain.size();
        RenderCtx::new(
            &self.device,
            &self.queue,
            self.swapchain.format(),
            (size.width, size.height),
        )
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.swapchain.resize(&self.device, new_size);
    }

    /// Acquires the next swapchain image and opens an encoder for it.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        let surface_texture = self.swapchain.acquire()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("fractview frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the image.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        log::warn!("surface error: {err}");
        self.swapchain.recover(&self.device, err)
    }
}
