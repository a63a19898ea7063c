//! Simulated time-of-day source.
//!
//! Walks the 1440 minutes of a day, holding each value for a fixed real-time
//! interval. Values reach the render thread through a `watch` channel, so a
//! slow reader only ever sees the latest minute.

use std::fmt;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Number of simulated minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Hour and minute of a simulated day. Always valid (`hour < 24`, `minute < 60`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Returns `None` for out-of-range components.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Value for the `n`-th minute of the day; wraps past 23:59.
    pub const fn from_minute_of_day(n: u16) -> Self {
        let n = n % MINUTES_PER_DAY;
        Self { hour: (n / 60) as u8, minute: (n % 60) as u8 }
    }

    #[inline]
    pub const fn minute_of_day(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    #[inline]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// First digit of the zero-padded hour. Always 0, 1 or 2.
    #[inline]
    pub const fn hour_tens(self) -> u8 {
        self.hour / 10
    }

    #[inline]
    pub const fn hour_units(self) -> u8 {
        self.hour % 10
    }

    #[inline]
    pub const fn minute_tens(self) -> u8 {
        self.minute / 10
    }

    #[inline]
    pub const fn minute_units(self) -> u8 {
        self.minute % 10
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// What happens after 23:59.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SequenceMode {
    /// Wrap back to 00:00 and keep going.
    #[default]
    Cyclic,
    /// Stop after 23:59; the last value stays visible.
    Once,
}

/// Time source configuration.
#[derive(Debug, Clone)]
pub struct TimeSourceConfig {
    /// Real time each simulated minute is held for.
    pub interval: Duration,
    pub mode: SequenceMode,
}

impl Default for TimeSourceConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            mode: SequenceMode::Cyclic,
        }
    }
}

/// Lazy sequence of simulated minutes, starting at 00:00.
#[derive(Debug, Clone)]
pub struct Minutes {
    next: u32,
    mode: SequenceMode,
}

impl Iterator for Minutes {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<TimeOfDay> {
        let day = u32::from(MINUTES_PER_DAY);
        if self.mode == SequenceMode::Once && self.next >= day {
            return None;
        }
        let value = TimeOfDay::from_minute_of_day((self.next % day) as u16);
        self.next = match self.mode {
            SequenceMode::Cyclic => (self.next + 1) % day,
            SequenceMode::Once => self.next + 1,
        };
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.mode {
            SequenceMode::Cyclic => (usize::MAX, None),
            SequenceMode::Once => {
                let left = u32::from(MINUTES_PER_DAY).saturating_sub(self.next) as usize;
                (left, Some(left))
            }
        }
    }
}

/// Periodic producer of `TimeOfDay` values.
#[derive(Debug, Clone, Default)]
pub struct TimeSource {
    config: TimeSourceConfig,
}

impl TimeSource {
    pub fn new(config: TimeSourceConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &TimeSourceConfig {
        &self.config
    }

    /// Fresh sequence from 00:00. Each call restarts; nothing is shared.
    pub fn produce(&self) -> Minutes {
        Minutes { next: 0, mode: self.config.mode }
    }

    /// Spawns the emitting task on `runtime` and returns its subscription.
    ///
    /// The receiver holds 00:00 until the first emission. Dropping the
    /// subscription cancels the task.
    pub fn subscribe(&self, runtime: &Handle) -> Subscription {
        let (tx, rx) = watch::channel(TimeOfDay::MIDNIGHT);
        let token = CancellationToken::new();

        runtime.spawn(emit_minutes(tx, self.produce(), self.config.interval, token.clone()));

        Subscription { rx, _cancel_on_drop: token.drop_guard() }
    }
}

/// Emit-then-wait loop. Stops on cancellation, when every receiver is gone,
/// or when a `Once` sequence runs out.
async fn emit_minutes(
    tx: watch::Sender<TimeOfDay>,
    minutes: Minutes,
    interval: Duration,
    token: CancellationToken,
) {
    log::debug!("time source started ({} ms per minute)", interval.as_millis());

    for value in minutes {
        if token.is_cancelled() || tx.send(value).is_err() {
            break;
        }
        log::trace!("time source emitted {value}");

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = token.cancelled() => break,
            _ = tx.closed() => break,
        }
    }

    log::debug!("time source stopped");
}

/// Live subscription to a running `TimeSource`.
pub struct Subscription {
    rx: watch::Receiver<TimeOfDay>,
    _cancel_on_drop: DropGuard,
}

impl Subscription {
    /// Most recently emitted value (00:00 before the first emission).
    pub fn latest(&self) -> TimeOfDay {
        *self.rx.borrow()
    }

    /// Returns the new value if one arrived since the last call. Never blocks.
    pub fn poll_changed(&mut self) -> Option<TimeOfDay> {
        // `Ref::has_changed` still sees an unread value after the producer
        // finished; `Receiver::has_changed` would report the closed channel.
        let value = self.rx.borrow_and_update();
        value.has_changed().then(|| *value)
    }

    /// Additional receiver for async consumers.
    pub fn receiver(&self) -> watch::Receiver<TimeOfDay> {
        self.rx.clone()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("latest", &self.latest()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tokio::time::Instant;

    fn once() -> TimeSource {
        TimeSource::new(TimeSourceConfig { mode: SequenceMode::Once, ..Default::default() })
    }

    #[test]
    fn once_yields_the_whole_day_in_order() {
        let values: Vec<_> = once().produce().collect();
        assert_eq!(values.len(), 1440);
        for (n, t) in values.iter().enumerate() {
            assert_eq!(t.hour() as usize, n / 60);
            assert_eq!(t.minute() as usize, n % 60);
        }
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn cyclic_wraps_after_midnight() {
        let mut it = TimeSource::default().produce().skip(1439);
        assert_eq!(it.next(), TimeOfDay::new(23, 59));
        assert_eq!(it.next(), Some(TimeOfDay::MIDNIGHT));
        assert_eq!(it.next(), TimeOfDay::new(0, 1));
    }

    #[test]
    fn produce_restarts_from_midnight() {
        let source = once();
        let mut first = source.produce();
        first.nth(100);
        assert_eq!(source.produce().next(), Some(TimeOfDay::MIDNIGHT));
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(TimeOfDay::new(7, 5).map(|t| t.to_string()), Some("07:05".to_string()));
        assert_eq!(TimeOfDay::new(24, 0), None);
        assert_eq!(TimeOfDay::new(0, 60), None);
    }

    proptest! {
        #[test]
        fn digits_recompose(n in 0u16..1440) {
            let t = TimeOfDay::from_minute_of_day(n);
            prop_assert_eq!(t.hour_tens() * 10 + t.hour_units(), t.hour());
            prop_assert_eq!(t.minute_tens() * 10 + t.minute_units(), t.minute());
            prop_assert!(t.hour_tens() <= 2);
            prop_assert!(t.hour_units() <= 9 && t.minute_tens() <= 5 && t.minute_units() <= 9);
            prop_assert_eq!(t.minute_of_day(), n);
        }

        #[test]
        fn nth_value_matches_its_index(n in 0usize..1440) {
            let t = once().produce().nth(n);
            prop_assert_eq!(t, Some(TimeOfDay::from_minute_of_day(n as u16)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn emits_one_minute_per_interval() {
        let source = TimeSource::default();
        let sub = source.subscribe(&Handle::current());
        let mut rx = sub.receiver();
        assert_eq!(sub.latest(), TimeOfDay::MIDNIGHT);

        let start = Instant::now();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), TimeOfDay::MIDNIGHT);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), TimeOfDay::from_minute_of_day(1));
        assert_eq!(start.elapsed(), Duration::from_millis(1000));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), TimeOfDay::from_minute_of_day(2));
        assert_eq!(start.elapsed(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn poll_changed_reports_each_value_once() {
        let mut sub = TimeSource::default().subscribe(&Handle::current());
        let mut rx = sub.receiver();

        rx.changed().await.unwrap();
        assert_eq!(sub.poll_changed(), Some(TimeOfDay::MIDNIGHT));
        assert_eq!(sub.poll_changed(), None);

        rx.changed().await.unwrap();
        assert_eq!(sub.poll_changed(), Some(TimeOfDay::from_minute_of_day(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_subscription_stops_emission() {
        let sub = TimeSource::default().subscribe(&Handle::current());
        let mut rx = sub.receiver();
        rx.changed().await.unwrap();
        rx.borrow_and_update();

        let start = Instant::now();
        drop(sub);

        // The task exits and drops its sender instead of emitting 00:01.
        assert!(rx.changed().await.is_err());
        assert!(start.elapsed() < Duration::from_millis(1000));
        assert_eq!(*rx.borrow(), TimeOfDay::MIDNIGHT);
    }

    #[tokio::test(start_paused = true)]
    async fn once_mode_completes_after_the_last_minute() {
        let source = TimeSource::new(TimeSourceConfig {
            interval: Duration::from_millis(10),
            mode: SequenceMode::Once,
        });
        let sub = source.subscribe(&Handle::current());
        let mut rx = sub.receiver();

        while rx.changed().await.is_ok() {}
        assert_eq!(*rx.borrow(), TimeOfDay::new(23, 59).unwrap());
        assert_eq!(sub.latest(), TimeOfDay::new(23, 59).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn last_minute_is_delivered_after_the_source_finished() {
        let source = TimeSource::new(TimeSourceConfig {
            interval: Duration::from_millis(10),
            mode: SequenceMode::Once,
        });
        let mut sub = source.subscribe(&Handle::current());
        let mut rx = sub.receiver();

        rx.changed().await.unwrap();
        assert_eq!(sub.poll_changed(), Some(TimeOfDay::MIDNIGHT));

        // Nobody polls while the rest of the day is emitted.
        while rx.changed().await.is_ok() {}

        assert_eq!(sub.poll_changed(), TimeOfDay::new(23, 59));
        assert_eq!(sub.poll_changed(), None);
    }
}
