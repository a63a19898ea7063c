//! Coordinate and geometry types shared across renderers and the face.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//! - Positive angles turn clockwise on screen
//!
//! Renderers convert to NDC in shaders using a viewport uniform.

mod angle;
mod corner_radii;
mod rect;
mod vec2;
mod viewport;

pub use angle::Degrees;
pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
