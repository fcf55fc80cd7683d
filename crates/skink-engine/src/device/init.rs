/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends wgpu may pick from.
    pub backends: wgpu::Backends,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode. `Fifo` waits for vblank (one swap per refresh) and is
    /// supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference; falls back to a supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features. Empty keeps the renderer portable.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
