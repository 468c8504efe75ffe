//! Monotonic clock standardized on integer microseconds, per the design
//! note that mixing float seconds and `u64` microseconds across the live
//! loop is error-prone. All internal timing crosses this one boundary.

use std::time::Instant;

pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self { origin: Instant::now() }
    }

    pub fn elapsed_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_us() as f64 / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonically_nondecreasing() {
        let clock = MonotonicClock::start();
        let a = clock.elapsed_us();
        let b = clock.elapsed_us();
        assert!(b >= a);
    }

    #[test]
    fn elapsed_secs_matches_elapsed_us() {
        let clock = MonotonicClock::start();
        let us = clock.elapsed_us();
        let secs = clock.elapsed_secs();
        assert!((secs - us as f64 / 1_000_000.0).abs() < 1e-9);
    }
}
