use glam::Vec2;

/// Drawable size in physical pixels.
///
/// Converts screen positions to model space. The mapping depends only on the
/// size, never on zoom or pan.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_physical(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Screen pixel (top-left origin, +Y down) to model coordinates (+Y up).
    ///
    /// The shorter axis is normalized to [-1, 1]. A degenerate size is treated as
    /// one pixel along the short side so the result stays finite.
    pub fn to_model_coords(self, p: Vec2) -> Vec2 {
        let scale = self.width.min(self.height).max(1.0);
        Vec2::new(
            2.0 * (p.x - self.width / 2.0) / scale,
            2.0 * (self.height / 2.0 - p.y) / scale,
        )
    }
}
