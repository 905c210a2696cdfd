use glam::Vec2;

/// Lower bound for [`ViewState::zoom_log`].
pub const ZOOM_LOG_MIN: f32 = -15.0;
/// Upper bound for [`ViewState::zoom_log`].
pub const ZOOM_LOG_MAX: f32 = 15.0;
/// Wheel delta (angle units, 120 per notch) that changes `zoom_log` by 1.
pub const WHEEL_STEP: f32 = 1000.0;

/// Pan/zoom state consumed by the fragment shader.
///
/// The effective linear zoom is `exp(zoom_log)`, so successive zoom steps add up.
/// `center` is the plane point shown at the model origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub zoom_log: f32,
    pub center: Vec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom_log: -1.0,
            center: Vec2::ZERO,
        }
    }
}

impl ViewState {
    /// Linear zoom factor.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.zoom_log.exp()
    }

    /// Plane point drawn at the given model position.
    #[inline]
    pub fn plane_point(&self, model: Vec2) -> Vec2 {
        self.center + model / self.scale()
    }

    /// Zooms by `wheel_delta` while keeping the plane point under `cursor_model` fixed.
    ///
    /// The anchor must be taken with the old zoom, before `zoom_log` changes.
    pub fn zoom_at(&mut self, wheel_delta: f32, cursor_model: Vec2) {
        if !wheel_delta.is_finite() || !cursor_model.is_finite() {
            return;
        }

        let new_zoom_log = (self.zoom_log + wheel_delta / WHEEL_STEP).clamp(ZOOM_LOG_MIN, ZOOM_LOG_MAX);

        let anchor = self.plane_point(cursor_model);
        self.center = anchor + (self.center - anchor) / (new_zoom_log - self.zoom_log).exp();
        self.zoom_log = new_zoom_log;
    }

    /// Drags the plane so the point under `from_model` ends up under `to_model`.
    pub fn pan(&mut self, from_model: Vec2, to_model: Vec2) {
        let delta = to_model - from_model;
        if !delta.is_finite() {
            return;
        }
        self.center -= delta / self.scale();
    }
}
