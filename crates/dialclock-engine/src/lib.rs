//! dialclock engine crate.
//!
//! Owns the window loop, the GPU device and the 2D shape renderers the clock
//! face is drawn with. Higher layers record `scene::DrawList`s and hand them
//! to `render::SceneRenderer` once per frame.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
