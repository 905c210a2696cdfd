use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::coords::ViewState;
use crate::core::RenderParams;

/// Uniform block shared by both shader stages (`@group(0) @binding(0)`).
///
/// Layout mirrors the WGSL struct, std140-compatible, 96 bytes:
/// `mvp` @0, `color` @64, `iterations` @76, `position` @80, `zoom_log` @88.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShaderUniforms {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub iterations: f32,
    pub position: [f32; 2],
    pub zoom_log: f32,
    pub _pad: f32,
}

impl ShaderUniforms {
    pub fn new(mvp: Mat4, params: &RenderParams, view: &ViewState) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            color: params.color.to_array(),
            iterations: params.iterations,
            position: view.center.to_array(),
            zoom_log: view.zoom_log,
            _pad: 0.0,
        }
    }

    pub fn mvp(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.mvp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn size_matches_wgsl_block() {
        assert_eq!(std::mem::size_of::<ShaderUniforms>(), 96);
        assert_eq!(std::mem::offset_of!(ShaderUniforms, color), 64);
        assert_eq!(std::mem::offset_of!(ShaderUniforms, iterations), 76);
        assert_eq!(std::mem::offset_of!(ShaderUniforms, position), 80);
        assert_eq!(std::mem::offset_of!(ShaderUniforms, zoom_log), 88);
    }

    #[test]
    fn carries_view_and_params() {
        let view = ViewState { zoom_log: 2.0, center: Vec2::new(-0.5, 0.25) };
        let params = RenderParams::default();
        let u = ShaderUniforms::new(Mat4::IDENTITY, &params, &view);

        assert_eq!(u.mvp(), Mat4::IDENTITY);
        assert_eq!(u.position, [-0.5, 0.25]);
        assert_eq!(u.zoom_log, 2.0);
        assert_eq!(u.iterations, 30.0);
        assert_eq!(u.color, params.color.to_array());
    }
}
