use anyhow::{Context, Result};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::coords::{Projection, ViewState};
use crate::core::RenderParams;
use crate::time::{Clock, FpsObserver, FpsSampler, MonotonicClock};

use super::program::{ShaderProgram, ShaderSources, DEPTH_FORMAT};
use super::quad::{QUAD_INDICES, QUAD_VERTICES};
use super::uniforms::ShaderUniforms;
use super::{RenderCtx, RenderTarget};

/// Background color, cleared at the start of every frame.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.3,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Externally visible lifecycle of a [`FrameRenderer`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RendererState {
    Uninitialized,
    Initialized,
    Disposed,
}

/// Everything one frame submits: the uniform block and the indexed draw size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCall {
    pub uniforms: ShaderUniforms,
    pub index_count: u32,
}

impl DrawCall {
    /// Plans a frame. Model and view are identity; only the projection reaches
    /// the MVP, zoom and pan travel as separate uniforms.
    pub fn plan(projection: &Projection, view: &ViewState, params: &RenderParams) -> Self {
        let model = Mat4::IDENTITY;
        let camera = Mat4::IDENTITY;
        let mvp = projection.matrix() * camera * model;

        Self {
            uniforms: ShaderUniforms::new(mvp, params, view),
            index_count: QUAD_INDICES.len() as u32,
        }
    }
}

/// Outcome of [`FrameRenderer::on_render`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    /// The submitted draw, `None` if nothing was drawn.
    pub draw: Option<DrawCall>,
    /// Continuous mode asks for the next frame right away.
    pub redraw_requested: bool,
}

struct DepthTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: (u32, u32),
}

impl DepthTarget {
    fn new(device: &wgpu::Device, size: (u32, u32)) -> Self {
        let size = (size.0.max(1), size.1.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("fractview depth"),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            size,
        }
    }

    /// Recreates the texture when the drawable size changed.
    fn ensure(&mut self, device: &wgpu::Device, size: (u32, u32)) {
        if self.size == (size.0.max(1), size.1.max(1)) {
            return;
        }
        self.texture.destroy();
        *self = Self::new(device, size);
    }
}

struct GpuResources {
    program: ShaderProgram,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth: DepthTarget,
}

impl GpuResources {
    fn create(ctx: &RenderCtx<'_>, shaders: &ShaderSources) -> Result<Self> {
        let program = ShaderProgram::link(ctx.device, ctx.surface_format, shaders)
            .context("failed to link shader program")?;

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("fractview quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("fractview quad ibo"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fractview uniforms"),
            size: std::mem::size_of::<ShaderUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fractview uniforms bind group"),
            layout: &program.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let depth = DepthTarget::new(ctx.device, ctx.size);

        Ok(Self {
            program,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            depth,
        })
    }

    fn release(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.uniform_buffer.destroy();
        self.depth.texture.destroy();
    }
}

enum Lifecycle {
    Uninitialized,
    Initialized(Box<GpuResources>),
    Disposed,
}

/// Draws the shader quad and owns every GPU resource it needs.
///
/// Lifecycle: `on_init` once, then any number of `on_resize` / `on_render`,
/// then `dispose` once. Resources are only released if `on_init` succeeded.
pub struct FrameRenderer<C: Clock = MonotonicClock> {
    lifecycle: Lifecycle,
    shaders: ShaderSources,
    projection: Projection,
    surface_size: (u32, u32),
    continuous: bool,
    sampler: FpsSampler<C>,
}

impl FrameRenderer<MonotonicClock> {
    pub fn new(shaders: ShaderSources) -> Self {
        Self::with_clock(shaders, MonotonicClock::new())
    }
}

impl<C: Clock> FrameRenderer<C> {
    pub fn with_clock(shaders: ShaderSources, clock: C) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            shaders,
            projection: Projection::default(),
            surface_size: (0, 0),
            continuous: true,
            sampler: FpsSampler::with_clock(clock),
        }
    }

    pub fn state(&self) -> RendererState {
        match self.lifecycle {
            Lifecycle::Uninitialized => RendererState::Uninitialized,
            Lifecycle::Initialized(_) => RendererState::Initialized,
            Lifecycle::Disposed => RendererState::Disposed,
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn sampler(&self) -> &FpsSampler<C> {
        &self.sampler
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    /// Compiles the program and uploads the quad. Must be the first call.
    ///
    /// A shader that fails to link aborts initialization; the renderer stays
    /// uninitialized and owns nothing.
    pub fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        self.ensure_uninitialized()?;

        let resources = GpuResources::create(ctx, &self.shaders)?;
        self.lifecycle = Lifecycle::Initialized(Box::new(resources));
        self.set_surface_size(ctx.size.0, ctx.size.1);

        log::info!(
            "frame renderer initialized ({:?}, {}x{})",
            ctx.surface_format,
            ctx.size.0,
            ctx.size.1
        );
        Ok(())
    }

    fn ensure_uninitialized(&self) -> Result<()> {
        match self.state() {
            RendererState::Uninitialized => Ok(()),
            state => anyhow::bail!("frame renderer cannot be initialized from {state:?}"),
        }
    }

    /// Refits the projection to a `width` x `height` drawable. CPU only.
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
        self.projection = Projection::fit(width, height);
    }

    /// Refits the projection and resizes the depth buffer.
    pub fn on_resize(&mut self, ctx: &RenderCtx<'_>, width: u32, height: u32) {
        self.set_surface_size(width, height);

        if width == 0 || height == 0 {
            return;
        }
        if let Lifecycle::Initialized(res) = &mut self.lifecycle {
            res.depth.ensure(ctx.device, (width, height));
        }
    }

    /// Records one frame into `target`.
    ///
    /// Every call, drawn or not, runs inside an FPS sampling scope; `observer`
    /// hears about each completed one-second window.
    pub fn on_render<O>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        view: &ViewState,
        params: &RenderParams,
        observer: &mut O,
    ) -> FrameReport
    where
        O: FpsObserver + ?Sized,
    {
        let Self {
            lifecycle,
            projection,
            continuous,
            sampler,
            ..
        } = self;

        let mut scope = sampler.scope(observer);

        let Lifecycle::Initialized(res) = lifecycle else {
            log::debug!("render skipped: renderer not initialized");
            return FrameReport {
                draw: None,
                redraw_requested: false,
            };
        };

        // A resize may not have reached us yet (e.g. restored from minimized).
        res.depth.ensure(ctx.device, ctx.size);

        let call = DrawCall::plan(projection, view, params);
        ctx.queue
            .write_buffer(&res.uniform_buffer, 0, bytemuck::bytes_of(&call.uniforms));

        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("fractview pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &res.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let (w, h) = res.depth.size;
            rpass.set_viewport(0.0, 0.0, w as f32, h as f32, 0.0, 1.0);
            rpass.set_pipeline(&res.program.pipeline);
            rpass.set_bind_group(0, &res.bind_group, &[]);
            rpass.set_vertex_buffer(0, res.vertex_buffer.slice(..));
            rpass.set_index_buffer(res.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..call.index_count, 0, 0..1);
        }

        scope.frame_rendered();

        FrameReport {
            draw: Some(call),
            redraw_requested: *continuous,
        }
    }

    /// Releases GPU resources. Returns `true` if anything was released.
    ///
    /// The first call always moves the renderer to `Disposed`; later calls are
    /// no-ops. Taking a [`RenderCtx`] keeps release on the rendering thread
    /// while the device is alive.
    pub fn dispose(&mut self, _ctx: &RenderCtx<'_>) -> bool {
        match self.take_resources() {
            Some(res) => {
                (*res).release();
                log::info!("frame renderer disposed");
                true
            }
            None => false,
        }
    }

    fn take_resources(&mut self) -> Option<Box<GpuResources>> {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Disposed) {
            Lifecycle::Initialized(res) => Some(res),
            Lifecycle::Uninitialized | Lifecycle::Disposed => None,
        }
    }
}

impl<C: Clock> Drop for FrameRenderer<C> {
    fn drop(&mut self) {
        if matches!(self.lifecycle, Lifecycle::Initialized(_)) {
            log::warn!("frame renderer dropped without dispose; GPU resources freed on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use glam::{Vec2, Vec3, Vec4};

    fn renderer() -> FrameRenderer<ManualClock> {
        FrameRenderer::with_clock(ShaderSources::mandelbrot(), ManualClock::new())
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn starts_uninitialized_and_continuous() {
        let r = renderer();
        assert_eq!(r.state(), RendererState::Uninitialized);
        assert!(r.is_continuous());
        assert_eq!(r.sampler().frame_count(), 0);
    }

    #[test]
    fn dispose_without_init_releases_nothing() {
        let mut r = renderer();
        assert!(r.take_resources().is_none());
        assert_eq!(r.state(), RendererState::Disposed);
        assert!(r.take_resources().is_none());
    }

    #[test]
    fn init_is_refused_after_dispose() {
        let mut r = renderer();
        assert!(r.ensure_uninitialized().is_ok());
        let _ = r.take_resources();
        let err = r.ensure_uninitialized().unwrap_err();
        assert!(err.to_string().contains("Disposed"));
    }

    #[test]
    fn continuous_flag_toggles() {
        let mut r = renderer();
        r.set_continuous(false);
        assert!(!r.is_continuous());
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_refits_projection() {
        let mut r = renderer();
        r.set_surface_size(800, 600);
        assert_eq!(r.surface_size(), (800, 600));
        assert_eq!(r.projection().half_extents(), Vec2::new(800.0 / 600.0, 1.0));

        r.set_surface_size(300, 600);
        assert_eq!(r.projection().half_extents(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn zero_sized_resize_keeps_projection_finite() {
        let mut r = renderer();
        r.set_surface_size(0, 0);
        let e = r.projection().half_extents();
        assert!(e.is_finite());
        assert!(e.min_element() >= 1.0);
    }

    // ── draw planning ─────────────────────────────────────────────────────

    #[test]
    fn plan_draws_two_triangles() {
        let call = DrawCall::plan(
            &Projection::default(),
            &ViewState::default(),
            &RenderParams::default(),
        );
        assert_eq!(call.index_count, 6);
    }

    #[test]
    fn mvp_ignores_zoom_and_pan() {
        let projection = Projection::fit(800, 600);
        let params = RenderParams::default();
        let a = DrawCall::plan(&projection, &ViewState::default(), &params);
        let b = DrawCall::plan(
            &projection,
            &ViewState {
                zoom_log: 4.0,
                center: Vec2::new(-0.7, 0.3),
            },
            &params,
        );

        assert_eq!(a.uniforms.mvp, b.uniforms.mvp);
        assert_eq!(a.uniforms.mvp(), projection.matrix());
        assert_eq!(b.uniforms.zoom_log, 4.0);
        assert_eq!(b.uniforms.position, [-0.7, 0.3]);
    }

    #[test]
    fn mvp_maps_unit_square_inside_clip_space() {
        let projection = Projection::fit(800, 600);
        let call = DrawCall::plan(&projection, &ViewState::default(), &RenderParams::default());
        let mvp = call.uniforms.mvp();

        for v in QUAD_VERTICES {
            let clip = mvp * Vec4::new(v.pos[0], v.pos[1], 0.0, 1.0);
            assert!(clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0, "{clip:?}");
            assert!((clip.z - 0.5).abs() < 1e-6);
        }
        // Short axis spans the full height.
        let top = mvp * Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert!((top.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn plan_passes_params_through() {
        let params = RenderParams {
            iterations: 42.0,
            color: Vec3::new(0.1, 0.5, 1.0),
        };
        let call = DrawCall::plan(&Projection::default(), &ViewState::default(), &params);
        assert_eq!(call.uniforms.iterations, 42.0);
        assert_eq!(call.uniforms.color, [0.1, 0.5, 1.0]);
    }
}
