//! dialclock face: a clock made of four rotating digit discs.
//!
//! - [`time_source`] walks a simulated day, one minute per interval
//! - [`disc`] and [`spring`] turn a time into disc angles
//! - [`face`] paints rings, discs and the pointer overlay into a draw list
//! - [`app`] runs it all in a window
//!
//! ```rust,ignore
//! dialclock_face::Application::new()
//!     .title("dialclock")
//!     .font(std::fs::read("DejaVuSans-Bold.ttf")?)
//!     .run()?;
//! ```

pub mod app;
pub mod disc;
pub mod face;
pub mod painter;
pub mod spring;
pub mod stripes;
pub mod style;
pub mod time_source;

pub use app::Application;
pub use face::ClockFace;
pub use style::FaceStyle;
pub use time_source::{SequenceMode, TimeOfDay, TimeSource, TimeSourceConfig};
