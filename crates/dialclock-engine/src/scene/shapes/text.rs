use crate::coords::{Degrees, Vec2};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// Text draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the unrotated text block in logical pixels.
    pub origin: Vec2,
    /// Wrapping width in logical pixels. `None` = no wrapping.
    pub max_width: Option<f32>,
    /// Clockwise rotation applied to every glyph quad about `pivot`.
    pub rotation: Degrees,
    pub pivot: Vec2,
}

impl DrawList {
    /// Records a single-line text block rotated about `pivot`.
    #[allow(clippy::too_many_arguments)]
    pub fn push_rotated_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        rotation: Degrees,
        pivot: Vec2,
    ) {
        self.push(z, DrawCmd::Text(TextCmd {
            text: text.into(),
            font,
            size,
            color,
            origin,
            max_width: None,
            rotation,
            pivot,
        }));
    }
}
