//! Sensor abstraction for normalized readings such as mouth openness.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A source of a normalized reading, expected in `[0.0, 1.0]`.
///
/// Pull-based: every call may return a fresh value, and callers must not
/// assume stability between calls. Implementations must be cheap and must not
/// block, because the render path calls them once per frame.
pub trait ProportionProvider: Send + Sync {
    /// The current reading.
    fn proportion(&self) -> f64;
}

/// A provider shared between the host and any number of apps.
pub type SharedProvider = Arc<dyn ProportionProvider>;

/// A provider that always reports the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedProportion(pub f64);

impl ProportionProvider for FixedProportion {
    fn proportion(&self) -> f64 {
        self.0
    }
}

/// A provider whose value can be updated from another thread.
///
/// The value is stored as raw `f64` bits in an atomic, so readers never see a
/// torn update.
pub struct SharedProportion {
    bits: AtomicU64,
}

impl SharedProportion {
    /// Create a provider holding `value`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    /// Replace the current value.
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Read the current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Default for SharedProportion {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for SharedProportion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedProportion")
            .field("value", &self.get())
            .finish()
    }
}

impl ProportionProvider for SharedProportion {
    fn proportion(&self) -> f64 {
        self.get()
    }
}
