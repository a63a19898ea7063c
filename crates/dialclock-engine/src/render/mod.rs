//! GPU rendering subsystem.
//!
//! `SceneRenderer` consumes a `scene::DrawList` and issues wgpu commands in
//! paint order. Each shape renderer owns its own GPU resources (pipelines,
//! buffers) and is fed by the scene renderer one command at a time.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
mod scene_renderer;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene_renderer::SceneRenderer;
