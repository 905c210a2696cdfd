//! GPU rendering subsystem.
//!
//! The viewer draws one full-screen quad whose fragment shader evaluates the
//! plane point under each pixel.
//!
//! Convention:
//! - quad geometry is in model space ([-1, 1] square, +Y up)
//! - the vertex shader applies the MVP matrix (orthographic, aspect-fitted)
//! - zoom and pan reach the fragment shader as uniforms

mod ctx;
mod frame;
mod program;
mod quad;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use frame::{DrawCall, FrameReport, FrameRenderer, RendererState, CLEAR_COLOR};
pub use program::{ShaderError, ShaderProgram, ShaderSources, ShaderStage, DEPTH_FORMAT};
pub use quad::{QuadVertex, QUAD_INDICES, QUAD_VERTICES};
pub use uniforms::ShaderUniforms;
