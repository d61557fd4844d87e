//! Timers on the simulated clock
//!
//! Spawning and reloading are scheduled in milliseconds of simulated time,
//! so their cadence does not depend on the tick rate.

/// Repeating timer (first fire one full period after creation)
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: f64,
    elapsed_ms: f64,
}

impl Interval {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Advance the clock; returns how many times the timer fired
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            fired += 1;
        }
        fired
    }
}

/// One-shot timer
#[derive(Debug, Clone)]
pub struct Delay {
    remaining_ms: f64,
}

impl Delay {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            remaining_ms: duration_ms,
        }
    }

    /// Advance the clock; true once the delay has elapsed
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.remaining_ms -= dt_ms;
        self.remaining_ms <= 0.0
    }

    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms.max(0.0)
    }
}
