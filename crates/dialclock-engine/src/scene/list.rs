use crate::coords::Rect;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// # Clipping
///
/// Use [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) to scope draw
/// commands to a scissor rect. Nested clips are intersected with their parent.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Top is always the current effective clip, already intersected with all parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.clip_stack.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    ///
    /// The item inherits the current clip rect from the clip stack.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });

        self.sorted_dirty = true;
    }

    /// Begins a scissor region. Calls must be balanced with [`pop_clip`](Self::pop_clip).
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap yields a zero-area rect; the renderer skips those items.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Iterates items in paint order (back-to-front) without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        let items = &self.items;
        self.sorted_indices.sort_by(|&a, &b| items[a].key.cmp(&items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn radius_of(item: &DrawItem) -> f32 {
        match &item.cmd {
            DrawCmd::Circle(c) => c.radius,
            _ => panic!("expected a circle"),
        }
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex(2), Vec2::zero(), 1.0, Color::black());
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 2.0, Color::black());
        list.push_solid_circle(ZIndex(2), Vec2::zero(), 3.0, Color::black());

        let radii: Vec<f32> = list.iter_in_paint_order().map(radius_of).collect();
        assert_eq!(radii, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 1.0, Color::black());
        list.pop_clip();
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 1.0, Color::black());
        list.pop_clip();
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 1.0, Color::black());

        let clips: Vec<_> = list.items().iter().map(|i| i.clip_rect).collect();
        assert_eq!(clips[0], Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(clips[1], Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(clips[2], None);
    }

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 1.0, Color::black());
        list.clear();
        assert!(list.is_empty());
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 1.0, Color::black());
        assert_eq!(list.items()[0].key.order, 0);
    }
}
