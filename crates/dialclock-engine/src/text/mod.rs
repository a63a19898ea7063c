//! Font loading and text measurement.
//!
//! Glyph rasterization and the atlas live in `render::shapes::text`.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
