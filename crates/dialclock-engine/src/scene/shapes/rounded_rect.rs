use crate::coords::{CornerRadii, Rect};
use crate::paint::Paint;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Rounded rectangle, in practice the outline of the pointer bar.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub paint: Paint,
    pub border: Option<Border>,
}

impl RoundedRectCmd {
    pub fn new(rect: Rect, radii: CornerRadii, paint: Paint, border: Option<Border>) -> Self {
        Self { rect, radii, paint, border }
    }

    /// Border only, the interior left unpainted.
    pub fn outline(rect: Rect, radii: CornerRadii, border: Border) -> Self {
        Self::new(rect, radii, Paint::none(), Some(border))
    }
}

impl DrawList {
    /// Records the outline of `rect`; the border lies inside the rect.
    pub fn push_rounded_rect_outline(&mut self, z: ZIndex, rect: Rect, radii: CornerRadii, border: Border) {
        self.push(z, DrawCmd::RoundedRect(RoundedRectCmd::outline(rect, radii, border)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn outline_leaves_the_interior_unpainted() {
        let mut dl = DrawList::new();
        let rect = Rect::new(200.0, 186.0, 125.0, 28.0);
        dl.push_rounded_rect_outline(ZIndex::default(), rect, CornerRadii::all(14.0), Border::new(2.0, Color::black()));

        match &dl.items()[0].cmd {
            DrawCmd::RoundedRect(r) => {
                assert_eq!(r.rect, rect);
                assert_eq!(r.paint, Paint::none());
                assert_eq!(r.border.as_ref().map(|b| b.width), Some(2.0));
            }
            other => panic!("expected a rounded rect, got {other:?}"),
        }
    }
}
