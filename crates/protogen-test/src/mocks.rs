//! Mock implementations for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use protogen_core::ProportionProvider;

/// Scripted [`ProportionProvider`] that counts how often it is read.
///
/// Values are handed out in order; once one value remains it is repeated
/// forever. An empty script reads as `0.0`.
#[derive(Debug, Default)]
pub struct MockProportion {
    values: Mutex<VecDeque<f64>>,
    calls: AtomicUsize,
}

impl MockProportion {
    /// Create a provider that returns `values` in order.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a provider that always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }

    /// How many times [`ProportionProvider::proportion`] has been called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProportionProvider for MockProportion {
    fn proportion(&self) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        if values.len() > 1 {
            values.pop_front().unwrap_or_default()
        } else {
            values.front().copied().unwrap_or_default()
        }
    }
}
