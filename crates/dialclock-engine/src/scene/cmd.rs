use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::rounded_rect::RoundedRectCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and in [`ShapeKind`]
/// - implement push helpers inside that shape module
/// - add a matching renderer under `render::shapes::*` and route it in `SceneRenderer`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    RoundedRect(RoundedRectCmd),
    Circle(CircleCmd),
    Text(TextCmd),
}

/// Which renderer consumes a command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    RoundedRect,
    Circle,
    Text,
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            DrawCmd::RoundedRect(_) => ShapeKind::RoundedRect,
            DrawCmd::Circle(_) => ShapeKind::Circle,
            DrawCmd::Text(_) => ShapeKind::Text,
        }
    }
}
