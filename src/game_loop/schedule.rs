use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// A cancellable source of ticks for the game loop.
pub trait TickSchedule {
    /// Wait for the next tick. Resolves to `false` once the schedule is
    /// cancelled or has no ticks left.
    fn next_tick(&mut self) -> impl Future<Output = bool>;

    /// Stop producing ticks
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

/// Wall-clock schedule: one tick every `period`, the first one `period` after
/// creation. Late ticks push the following ones back instead of bursting.
pub struct IntervalSchedule {
    interval: Interval,
    active: bool,
}

impl IntervalSchedule {
    /// Must be called from within a tokio runtime
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            active: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl TickSchedule for IntervalSchedule {
    async fn next_tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.interval.tick().await;
        true
    }

    fn cancel(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Fixed number of ticks delivered without waiting. Drives the loop
/// synchronously in tests and headless runs.
#[derive(Debug, Clone)]
pub struct ManualSchedule {
    remaining: u64,
    active: bool,
}

impl ManualSchedule {
    pub fn new(ticks: u64) -> Self {
        Self {
            remaining: ticks,
            active: true,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl TickSchedule for ManualSchedule {
    async fn next_tick(&mut self) -> bool {
        if !self.active || self.remaining == 0 {
            self.active = false;
            return false;
        }
        self.remaining -= 1;
        true
    }

    fn cancel(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active && self.remaining > 0
    }
}
