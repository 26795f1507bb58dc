//! Demo sensor for running without hardware.

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use protogen_core::ProportionProvider;

/// Proportion that sweeps `0.0..=1.0` as a sine wave over time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SineProportion {
    start: Instant,
    period: Duration,
}

impl SineProportion {
    /// A sweep that repeats every `period`.
    pub(crate) fn new(period: Duration) -> Self {
        Self {
            start: Instant::now(),
            period,
        }
    }

    fn at(&self, elapsed: Duration) -> f64 {
        let period = self.period.as_secs_f64();
        if period <= 0.0 {
            return 0.0;
        }
        let phase = elapsed.as_secs_f64() / period * TAU;
        0.5 - 0.5 * phase.cos()
    }
}

impl ProportionProvider for SineProportion {
    fn proportion(&self) -> f64 {
        self.at(self.start.elapsed())
    }
}
