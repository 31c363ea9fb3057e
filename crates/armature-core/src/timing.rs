//! Timer helpers driven by an explicit clock instead of host callbacks.

use std::time::Duration;

/// Trailing-edge debounce: a value fires once `delay` has passed without a newer one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Duration, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the delay from `now`.
    pub fn schedule(&mut self, now: Duration, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let due = matches!(&self.pending, Some((due, _)) if now >= *due);
        if due {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }
}

/// Fixed-period ticker; fires at most once per poll and never bursts to catch up.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: Duration,
    next: Duration,
}

impl Interval {
    /// First fire happens at `start`.
    pub fn new(period: Duration, start: Duration) -> Self {
        Self {
            period,
            next: start,
        }
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next {
            return false;
        }
        while self.next <= now {
            self.next += self.period.max(Duration::from_millis(1));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn debouncer_fires_after_quiet_period() {
        let mut debouncer = Debouncer::new(ms(200));
        debouncer.schedule(ms(0), "a");
        assert_eq!(debouncer.poll(ms(199)), None);
        assert_eq!(debouncer.poll(ms(200)), Some("a"));
        assert_eq!(debouncer.poll(ms(400)), None);
    }

    #[test]
    fn newer_schedule_cancels_the_pending_one() {
        let mut debouncer = Debouncer::new(ms(200));
        debouncer.schedule(ms(0), 1);
        debouncer.schedule(ms(150), 2);
        assert_eq!(debouncer.poll(ms(250)), None);
        assert_eq!(debouncer.poll(ms(350)), Some(2));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn interval_skips_missed_periods() {
        let mut interval = Interval::new(ms(1000), ms(0));
        assert!(interval.poll(ms(0)));
        assert!(!interval.poll(ms(999)));
        assert!(interval.poll(ms(3500)));
        assert!(!interval.poll(ms(3900)));
        assert!(interval.poll(ms(4000)));
    }
}
