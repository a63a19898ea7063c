/// Surface settings for the clock window.
///
/// The face only needs baseline wgpu features and limits; what can vary is
/// how frames are paced and which surface format the colors land in.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    pub prefer_srgb: bool,
    /// `Fifo` ties the spring animation to vsync.
    pub present_mode: wgpu::PresentMode,
    pub frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            frame_latency: 2,
        }
    }
}
