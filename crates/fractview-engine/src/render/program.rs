use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use super::quad::QuadVertex;
use super::uniforms::ShaderUniforms;

/// Depth buffer format used by the viewer pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const VERTEX_ENTRY: &str = "vs_main";
const FRAGMENT_ENTRY: &str = "fs_main";

/// Pipeline stage a shader source belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => VERTEX_ENTRY,
            ShaderStage::Fragment => FRAGMENT_ENTRY,
        }
    }

    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Reasons a shader program fails to build.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// WGSL did not parse.
    Parse { stage: ShaderStage, message: String },
    /// WGSL parsed but failed validation.
    Validate { stage: ShaderStage, message: String },
    /// The stage source has no entry point with the expected name and stage.
    MissingEntryPoint { stage: ShaderStage, name: &'static str },
    /// The fragment stage reads a location the vertex stage never writes.
    UnlinkedInput { location: u32 },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Parse { stage, message } => {
                write!(f, "{stage} shader failed to parse:\n{message}")
            }
            ShaderError::Validate { stage, message } => {
                write!(f, "{stage} shader failed validation:\n{message}")
            }
            ShaderError::MissingEntryPoint { stage, name } => {
                write!(f, "{stage} shader has no @{stage} entry point `{name}`")
            }
            ShaderError::UnlinkedInput { location } => write!(
                f,
                "fragment input @location({location}) is not written by the vertex stage"
            ),
        }
    }
}

impl std::error::Error for ShaderError {}

/// The two WGSL sources making up the viewer program.
///
/// Each stage declares the same uniform block at `@group(0) @binding(0)`;
/// the vertex entry point is `vs_main`, the fragment entry point `fs_main`.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Built-in quad vertex stage with the Mandelbrot fragment stage.
    pub fn mandelbrot() -> Self {
        Self::new(
            include_str!("shaders/quad.vert.wgsl"),
            include_str!("shaders/mandelbrot.frag.wgsl"),
        )
    }

    /// Parses and validates both stages, then checks the stage interface.
    ///
    /// Runs on the CPU only; a source that passes is safe to hand to the device.
    pub fn check(&self) -> Result<(), ShaderError> {
        let vertex = parse_stage(ShaderStage::Vertex, &self.vertex)?;
        let fragment = parse_stage(ShaderStage::Fragment, &self.fragment)?;

        let written = stage_locations(&vertex, ShaderStage::Vertex);
        for location in stage_locations(&fragment, ShaderStage::Fragment) {
            if !written.contains(&location) {
                return Err(ShaderError::UnlinkedInput { location });
            }
        }
        Ok(())
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::mandelbrot()
    }
}

fn parse_stage(stage: ShaderStage, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
        stage,
        message: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| ShaderError::Validate {
        stage,
        message: e.into_inner().to_string(),
    })?;

    let name = stage.entry_point();
    let found = module
        .entry_points
        .iter()
        .any(|ep| ep.name == name && ep.stage == stage.naga_stage());
    if !found {
        return Err(ShaderError::MissingEntryPoint { stage, name });
    }

    Ok(module)
}

/// User locations crossing the vertex→fragment boundary.
///
/// Vertex: locations of the entry point result. Fragment: locations of the
/// entry point arguments.
fn stage_locations(module: &naga::Module, stage: ShaderStage) -> BTreeSet<u32> {
    let mut out = BTreeSet::new();
    let Some(ep) = module
        .entry_points
        .iter()
        .find(|ep| ep.name == stage.entry_point())
    else {
        return out;
    };

    match stage {
        ShaderStage::Vertex => {
            if let Some(result) = &ep.function.result {
                collect_locations(module, result.ty, result.binding.as_ref(), &mut out);
            }
        }
        ShaderStage::Fragment => {
            for arg in &ep.function.arguments {
                collect_locations(module, arg.ty, arg.binding.as_ref(), &mut out);
            }
        }
    }
    out
}

fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut BTreeSet<u32>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            out.insert(*location);
        }
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

/// Compiled render pipeline plus the uniform bind group layout it expects.
pub struct ShaderProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl ShaderProgram {
    /// Validates `sources` and builds the pipeline for `color_format`.
    ///
    /// Fixed state: back-face culling with CCW front faces, depth test `Less`
    /// with depth writes on.
    pub fn link(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        sources: &ShaderSources,
    ) -> Result<Self, ShaderError> {
        sources.check()?;

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fractview vertex shader"),
            source: wgpu::ShaderSource::Wgsl(sources.vertex.clone()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fractview fragment shader"),
            source: wgpu::ShaderSource::Wgsl(sources.fragment.clone()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fractview uniforms bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ShaderUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fractview pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fractview pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            pipeline,
            bind_group_layout,
        })
    }
}
