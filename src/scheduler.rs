//! Tick sources
//!
//! The session advances one step per tick. A [`TickSource`] hides where
//! ticks come from so the player can own exactly one timer handle and tear
//! it down deterministically. [`IntervalTicker`] follows the tokio clock,
//! which tests pause and advance with `#[tokio::test(start_paused = true)]`.
//! [`ManualTicker`] is stepped by hand through a [`TickTrigger`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[async_trait::async_trait]
pub trait TickSource: Send {
    /// Resolve at the next tick
    async fn tick(&mut self);

    /// Retire the current cadence and start a fresh one, so the next tick
    /// lands one full period from now
    fn restart(&mut self);
}

/// Fixed-period ticker on the tokio clock. The first tick fires one period
/// after construction, not immediately.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            interval: Self::fresh_interval(period),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    fn fresh_interval(period: Duration) -> Interval {
        let mut interval = time::interval_at(Instant::now() + period, period);
        // A stalled process should not burst through several seconds at once
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }
}

#[async_trait::async_trait]
impl TickSource for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }

    fn restart(&mut self) {
        self.interval = Self::fresh_interval(self.period);
    }
}

/// Ticker driven by explicit [`TickTrigger::fire`] calls
#[derive(Debug)]
pub struct ManualTicker {
    ticks: mpsc::UnboundedReceiver<()>,
    restarts: Arc<AtomicUsize>,
}

/// Handle used to fire ticks into a [`ManualTicker`]
#[derive(Debug, Clone)]
pub struct TickTrigger {
    ticks: mpsc::UnboundedSender<()>,
    restarts: Arc<AtomicUsize>,
}

impl ManualTicker {
    pub fn channel() -> (Self, TickTrigger) {
        let (tx, rx) = mpsc::unbounded_channel();
        let restarts = Arc::new(AtomicUsize::new(0));
        (
            Self {
                ticks: rx,
                restarts: Arc::clone(&restarts),
            },
            TickTrigger {
                ticks: tx,
                restarts,
            },
        )
    }
}

#[async_trait::async_trait]
impl TickSource for ManualTicker {
    async fn tick(&mut self) {
        if self.ticks.recv().await.is_none() {
            // Every trigger is gone: no tick will ever arrive again
            std::future::pending::<()>().await;
        }
    }

    fn restart(&mut self) {
        // Ticks queued for the retired cadence must not leak into the new one
        while self.ticks.try_recv().is_ok() {}
        self.restarts.fetch_add(1, Ordering::SeqCst);
    }
}

impl TickTrigger {
    /// Queue one tick. Returns false once the ticker has been dropped.
    pub fn fire(&self) -> bool {
        self.ticks.send(()).is_ok()
    }

    pub fn fire_n(&self, n: usize) -> bool {
        (0..n).all(|_| self.fire())
    }

    /// How many times the ticker was restarted
    pub fn restarts(&self) -> usize {
        self.restarts.load(Ordering::SeqCst)
    }

    /// True once the owning ticker has been dropped
    pub fn is_retired(&self) -> bool {
        self.ticks.is_closed()
    }
}
