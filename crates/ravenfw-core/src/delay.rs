//! Busy-wait delays
//!
//! There is no timer on the Raven; delays are loops of a fixed number of
//! iterations. The counts in [`crate::board`] are calibrated for the board's
//! core clock, so they are only meaningful there.

use core::hint::black_box;

/// A delay of a fixed number of loop iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDelay {
    iterations: u32,
}

impl CycleDelay {
    /// A delay of `iterations` loop turns
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Loop turns per call
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Spin for the configured number of iterations
    #[inline(never)]
    pub fn wait(&self) {
        spin(self.iterations);
    }
}

/// Spin for `iterations` loop turns
///
/// `black_box` keeps the loop from being optimised out.
#[inline(never)]
pub fn spin(iterations: u32) {
    for i in 0..iterations {
        black_box(i);
    }
}
