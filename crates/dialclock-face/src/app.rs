use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use dialclock_engine::core::{App as EngineApp, AppControl, FrameCtx};
use dialclock_engine::device::GpuInit;
use dialclock_engine::paint::Color;
use dialclock_engine::render::SceneRenderer;
use dialclock_engine::scene::DrawList;
use dialclock_engine::text::{FontId, FontSystem};
use dialclock_engine::window::{Runtime, RuntimeConfig};

use crate::face::ClockFace;
use crate::painter::Painter;
use crate::spring::SpringConfig;
use crate::style::FaceStyle;
use crate::time_source::{Subscription, TimeSource, TimeSourceConfig};

// ── Application ───────────────────────────────────────────────────────────

/// Clock application builder.
///
/// ```rust,ignore
/// Application::new()
///     .title("dialclock")
///     .size(480.0, 480.0)
///     .font(load_font())
///     .run()?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    font: Option<Vec<u8>>,
    background: Color,
    style: FaceStyle,
    spring: SpringConfig,
    time_source: TimeSourceConfig,
    gpu: GpuInit,
}

impl Application {
    pub fn new() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            title: runtime.title,
            width: runtime.initial_size.width,
            height: runtime.initial_size.height,
            font: None,
            background: Color::white(),
            style: FaceStyle::default(),
            spring: SpringConfig::default(),
            time_source: TimeSourceConfig::default(),
            gpu: GpuInit::default(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Font for the disc digits. Empty or unparsable bytes leave the discs blank.
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.font = Some(data);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn style(mut self, style: FaceStyle) -> Self {
        self.style = style;
        self
    }

    pub fn spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    pub fn time_source(mut self, config: TimeSourceConfig) -> Self {
        self.time_source = config;
        self
    }

    pub fn gpu(mut self, init: GpuInit) -> Self {
        self.gpu = init;
        self
    }

    /// Starts the time source and blocks in the window loop until it closes.
    pub fn run(self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("dialclock-time")
            .enable_time()
            .build()
            .context("failed to start tokio runtime")?;

        let mut fonts = FontSystem::new();
        let font = match self.font.as_deref() {
            Some(bytes) => match fonts.load_font(bytes) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("{e}; digits will not be drawn");
                    None
                }
            },
            None => {
                log::warn!("no font configured; digits will not be drawn");
                None
            }
        };

        let subscription = TimeSource::new(self.time_source.clone()).subscribe(runtime.handle());
        let driver = ClockDriver::new(ClockFace::new(self.style, self.spring), subscription);

        let config = RuntimeConfig {
            title: self.title,
            initial_size: LogicalSize::new(self.width, self.height),
        };

        let state = ClockAppState {
            driver,
            fonts,
            font,
            background: self.background,
            draw_list: DrawList::new(),
            scene: SceneRenderer::new(),
            _runtime: runtime,
        };

        Runtime::run(config, self.gpu, state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── ClockDriver ───────────────────────────────────────────────────────────

/// Connects the time source to the face: picks up new minutes and steps the
/// animation once per frame.
pub struct ClockDriver {
    face: ClockFace,
    subscription: Subscription,
}

impl ClockDriver {
    pub fn new(face: ClockFace, subscription: Subscription) -> Self {
        Self { face, subscription }
    }

    #[inline]
    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    /// Applies a pending minute, if any, then advances the springs by `dt`.
    /// Returns whether the displayed time changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        let changed = match self.subscription.poll_changed() {
            Some(time) => self.face.set_time(time),
            None => false,
        };
        self.face.advance(dt);
        changed
    }
}

// ── ClockAppState ─────────────────────────────────────────────────────────

/// Implements the engine `App`. Field order matters on drop: the
/// subscription cancels its task before the runtime shuts down.
struct ClockAppState {
    driver: ClockDriver,
    fonts: FontSystem,
    font: Option<FontId>,
    background: Color,
    draw_list: DrawList,
    scene: SceneRenderer,
    _runtime: tokio::runtime::Runtime,
}

impl EngineApp for ClockAppState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.driver.tick(ctx.time.dt);

        let center = ctx.window.viewport().center();
        self.draw_list.clear();
        {
            let mut painter = Painter::new(&mut self.draw_list, &self.fonts);
            self.driver.face().paint(&mut painter, center, self.font);
        }

        let (dl, fonts, scene) = (&mut self.draw_list, &self.fonts, &mut self.scene);
        ctx.render(self.background, |rctx, target| {
            scene.render(rctx, target, dl, fonts);
        })
    }

    fn on_exit(&mut self) {
        log::debug!("clock stopped at {}", self.driver.face().time());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_source::TimeOfDay;
    use tokio::runtime::Handle;

    #[test]
    fn builder_overrides_defaults() {
        let app = Application::new().title("clock").size(300.0, 200.0).font(vec![1, 2, 3]);
        assert_eq!(app.title, "clock");
        assert_eq!((app.width, app.height), (300.0, 200.0));
        assert_eq!(app.font.as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(app.time_source.interval.as_millis(), 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn driver_applies_each_minute_once() {
        let sub = TimeSource::default().subscribe(&Handle::current());
        let mut rx = sub.receiver();
        let mut driver = ClockDriver::new(ClockFace::default(), sub);

        // The first emission repeats the 00:00 the face already shows.
        rx.changed().await.unwrap();
        assert!(!driver.tick(0.016));

        rx.changed().await.unwrap();
        assert!(driver.tick(0.016));
        assert_eq!(driver.face().time(), TimeOfDay::from_minute_of_day(1));
        assert!(driver.face().is_animating());

        assert!(!driver.tick(0.016));
    }

    #[tokio::test(start_paused = true)]
    async fn driver_shows_the_final_minute_after_a_stall() {
        let source = TimeSource::new(TimeSourceConfig {
            interval: std::time::Duration::from_millis(10),
            mode: crate::time_source::SequenceMode::Once,
        });
        let sub = source.subscribe(&Handle::current());
        let mut rx = sub.receiver();
        let mut driver = ClockDriver::new(ClockFace::default(), sub);

        rx.changed().await.unwrap();
        driver.tick(0.016);
        rx.changed().await.unwrap();
        assert!(driver.tick(0.016));
        assert_eq!(driver.face().time(), TimeOfDay::from_minute_of_day(1));

        // The render thread stalls until the source has run out.
        while rx.changed().await.is_ok() {}

        assert!(driver.tick(0.016));
        assert_eq!(driver.face().time(), TimeOfDay::from_minute_of_day(1439));
        assert!(!driver.tick(0.016));
    }
}
