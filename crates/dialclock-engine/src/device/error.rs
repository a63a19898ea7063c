/// What the frame loop does after `wgpu::Surface::get_current_texture` fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated surface, configured again.
    Reconfigured,
    /// Drop this frame and try the next one.
    SkipFrame,
    /// Out of memory. The window closes.
    Fatal,
}
