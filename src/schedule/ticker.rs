use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Shortest period the scheduler will arm
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// One cancellable periodic timer with an adjustable period.
///
/// Dropping the scheduler cancels the timer. Must be created inside a tokio
/// runtime.
pub struct TickScheduler {
    period: Duration,
    interval: Interval,
}

impl TickScheduler {
    /// Arm a timer whose first tick fires one period from now
    pub fn new(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            period,
            interval: Self::arm(period),
        }
    }

    fn arm(period: Duration) -> Interval {
        let mut interval = interval_at(Instant::now() + period, period);
        // A stalled frame should not be followed by a burst of catch-up moves
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Re-arm with a new period, counting from now.
    ///
    /// Returns false and leaves the timer alone when the period is unchanged.
    pub fn set_period(&mut self, period: Duration) -> bool {
        let period = period.max(MIN_PERIOD);
        if period == self.period {
            return false;
        }

        self.period = period;
        self.interval = Self::arm(period);
        true
    }

    /// Wait for the next tick. Cancel safe.
    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await
    }
}
