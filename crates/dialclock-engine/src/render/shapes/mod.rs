//! Shape renderers.
//!
//! Every renderer follows the same frame protocol driven by `SceneRenderer`:
//! `begin_frame` → `push` per command → `prepare` → `draw` per batch.

pub(crate) mod common;

pub mod circle;
pub mod rounded_rect;
pub mod text;
