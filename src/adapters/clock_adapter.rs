//! Tick clock adapters.

use std::thread;
use std::time::Duration;

use crate::ports::clock_port::TickClock;

/// Sleeps a fixed interval before every tick. A zero interval never sleeps.
#[derive(Debug, Clone, Copy)]
pub struct IntervalClock {
    interval: Duration,
}

impl IntervalClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl TickClock for IntervalClock {
    fn wait(&mut self) {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
    }
}

/// Never sleeps; counts how many ticks were requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    ticks: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl TickClock for ManualClock {
    fn wait(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn manual_clock_counts_waits() {
        let mut clock = ManualClock::new();
        clock.wait();
        clock.wait();
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn zero_interval_does_not_sleep() {
        let mut clock = IntervalClock::from_millis(0);
        let start = Instant::now();
        for _ in 0..100 {
            clock.wait();
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn interval_clock_sleeps_at_least_interval() {
        let mut clock = IntervalClock::from_millis(5);
        let start = Instant::now();
        clock.wait();
        assert!(start.elapsed() >= Duration::from_millis(5));
        assert_eq!(clock.interval(), Duration::from_millis(5));
    }
}
