/// Adapter, device and swapchain preferences.
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub power_preference: wgpu::PowerPreference,
    /// Use an sRGB swapchain format when one is offered. Off by default: the
    /// fragment shader writes display-ready color.
    pub prefer_srgb: bool,
    pub present_mode: wgpu::PresentMode,
    pub limits: wgpu::Limits,
    /// Frames the CPU may queue ahead of the display (a hint).
    pub frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::AutoVsync,
            limits: wgpu::Limits::downlevel_defaults(),
            frame_latency: 2,
        }
    }
}
