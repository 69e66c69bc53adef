//! Timing
//!
//! Monotonic wall-clock timing for benchmark invocations and measurement
//! windows, built on `std::time::Instant`.

use std::time::{Duration, Instant};

/// Timer for a single invocation
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed nanoseconds since start (saturating at `u64::MAX`)
    #[inline(always)]
    pub fn stop(&self) -> u64 {
        duration_nanos(self.start.elapsed())
    }
}

/// Deadline tracking for a measurement window.
///
/// The window only decides whether a *new* invocation may start; it never
/// interrupts one that is running.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    start: Instant,
    length_ns: u64,
}

impl Window {
    /// Open a window of the given length
    pub fn open(length_ns: u64) -> Self {
        Self {
            start: Instant::now(),
            length_ns,
        }
    }

    /// Whether the window length has elapsed
    #[inline]
    pub fn is_elapsed(&self) -> bool {
        self.start.elapsed().as_nanos() >= self.length_ns as u128
    }

    /// Nanoseconds since the window opened
    #[inline]
    pub fn elapsed_ns(&self) -> u64 {
        duration_nanos(self.start.elapsed())
    }
}

#[inline]
fn duration_nanos(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}
