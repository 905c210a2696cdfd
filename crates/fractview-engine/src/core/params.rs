use std::ops::RangeInclusive;

use glam::Vec3;

/// Valid positions of the iteration slider.
pub const ITERATIONS_RANGE: RangeInclusive<i32> = 1..=60;
/// Valid positions of each color slider.
pub const COLOR_RANGE: RangeInclusive<i32> = 0..=100;

/// Shader parameters read by the renderer each frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderParams {
    /// Iteration count, in [1, 60].
    pub iterations: f32,
    /// Color multiplier, each channel in [0, 1].
    pub color: Vec3,
}

impl Default for RenderParams {
    fn default() -> Self {
        ParamSliders::default().params()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    pub const ALL: [ColorChannel; 3] = [ColorChannel::Red, ColorChannel::Green, ColorChannel::Blue];

    #[inline]
    fn index(self) -> usize {
        match self {
            ColorChannel::Red => 0,
            ColorChannel::Green => 1,
            ColorChannel::Blue => 2,
        }
    }
}

/// Integer slider positions of the control surface.
///
/// Setters clamp to the slider ranges and report whether the position moved, so
/// callers only invalidate the frame on real changes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ParamSliders {
    iterations: i32,
    rgb: [i32; 3],
}

impl Default for ParamSliders {
    fn default() -> Self {
        Self {
            iterations: 30,
            rgb: [22, 30, 90],
        }
    }
}

impl ParamSliders {
    pub fn iterations(&self) -> i32 {
        self.iterations
    }

    pub fn channel(&self, channel: ColorChannel) -> i32 {
        self.rgb[channel.index()]
    }

    pub fn set_iterations(&mut self, value: i32) -> bool {
        let value = value.clamp(*ITERATIONS_RANGE.start(), *ITERATIONS_RANGE.end());
        let changed = value != self.iterations;
        self.iterations = value;
        changed
    }

    pub fn set_channel(&mut self, channel: ColorChannel, value: i32) -> bool {
        let value = value.clamp(*COLOR_RANGE.start(), *COLOR_RANGE.end());
        let slot = &mut self.rgb[channel.index()];
        let changed = value != *slot;
        *slot = value;
        changed
    }

    pub fn nudge_iterations(&mut self, delta: i32) -> bool {
        self.set_iterations(self.iterations.saturating_add(delta))
    }

    pub fn nudge_channel(&mut self, channel: ColorChannel, delta: i32) -> bool {
        self.set_channel(channel, self.channel(channel).saturating_add(delta))
    }

    /// Normalized shader parameters for the current slider positions.
    pub fn params(&self) -> RenderParams {
        let [r, g, b] = self.rgb;
        RenderParams {
            iterations: self.iterations as f32,
            color: Vec3::new(r as f32 / 100.0, g as f32 / 100.0, b as f32 / 100.0),
        }
    }
}
