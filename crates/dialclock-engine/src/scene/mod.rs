//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - provide deterministic ordering (z-index + insertion order)
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::{DrawCmd, ShapeKind};
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use shapes::{Border, Cutout};
pub use shapes::circle::CircleCmd;
pub use shapes::rounded_rect::RoundedRectCmd;
pub use shapes::text::TextCmd;
pub use z_index::ZIndex;
