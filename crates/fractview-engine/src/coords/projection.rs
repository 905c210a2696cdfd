use glam::{Mat4, Vec2};

/// Orthographic projection fitted to the window aspect ratio.
///
/// The shorter axis always has a half-extent of exactly 1, so the unit square
/// around the origin stays fully visible without distortion.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    half_width: f32,
    half_height: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            half_width: 1.0,
            half_height: 1.0,
        }
    }
}

impl Projection {
    pub const NEAR: f32 = -1.0;
    pub const FAR: f32 = 1.0;

    /// Fits the projection to a drawable of `width` x `height` pixels.
    ///
    /// Zero dimensions are clamped to 1 before taking ratios.
    pub fn fit(width: u32, height: u32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;

        if w > h {
            Self {
                half_width: w / h,
                half_height: 1.0,
            }
        } else {
            Self {
                half_width: 1.0,
                half_height: h / w,
            }
        }
    }

    /// `(half_width, half_height)`.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }

    /// Projection matrix with wgpu clip conventions (depth in [0, 1]).
    pub fn matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            -self.half_width,
            self.half_width,
            -self.half_height,
            self.half_height,
            Self::NEAR,
            Self::FAR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn landscape_extends_horizontally() {
        let p = Projection::fit(800, 600);
        assert_eq!(p.half_extents(), Vec2::new(800.0 / 600.0, 1.0));
    }

    #[test]
    fn portrait_extends_vertically() {
        let p = Projection::fit(600, 900);
        assert_eq!(p.half_extents(), Vec2::new(1.0, 1.5));
    }

    #[test]
    fn square_is_unit() {
        assert_eq!(Projection::fit(512, 512).half_extents(), Vec2::ONE);
    }

    #[test]
    fn shorter_axis_is_exactly_one() {
        for (w, h) in [(1, 1), (1, 4000), (4000, 1), (1920, 1080), (333, 777), (2, 3)] {
            let e = Projection::fit(w, h).half_extents();
            assert_eq!(e.x.min(e.y), 1.0, "size {w}x{h}");
            assert!(e.x.max(e.y) >= 1.0, "size {w}x{h}");
        }
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let e = Projection::fit(0, 600).half_extents();
        assert_eq!(e, Vec2::new(1.0, 600.0));
        assert_eq!(Projection::fit(0, 0).half_extents(), Vec2::ONE);
        assert!(Projection::fit(800, 0).matrix().is_finite());
    }

    #[test]
    fn matrix_maps_extents_to_clip_edges() {
        let p = Projection::fit(800, 600);
        let m = p.matrix();
        let corner = m * Vec4::new(800.0 / 600.0, 1.0, 0.0, 1.0);
        assert!((corner.x - 1.0).abs() < 1e-6);
        assert!((corner.y - 1.0).abs() < 1e-6);
        // z = 0 sits halfway between near and far.
        assert!((corner.z - 0.5).abs() < 1e-6);
    }
}
