//! Time subsystem.
//!
//! Frame timing utilities decoupled from the runtime:
//! - one `FrameClock` per window
//! - call `tick()` once per presented frame to obtain `FrameTime`
//!
//! Animations integrate over `FrameTime::dt`, so a stalled window resumes
//! with a bounded step instead of a jump.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
