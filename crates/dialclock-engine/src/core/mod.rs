//! Core engine-facing contracts.
//!
//! Defines the interface between the window runtime and the layer that
//! draws (the clock face). Runtime internals stay behind `FrameCtx`.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
