//! Bounded busy-waiting.
//!
//! Peripherals signal completion through a busy bit. Instead of spinning on
//! it forever, callers give [`poll`] an attempt budget and get a [`Timeout`]
//! back when the device never answers.

use core::fmt;

/// The predicate never yielded a value within the attempt budget.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timeout {
    pub attempts: u32,
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no response after {} polls", self.attempts)
    }
}

/// Call `f` until it returns `Some`, at most `max_attempts` times.
#[inline]
pub fn poll<T>(max_attempts: u32, mut f: impl FnMut() -> Option<T>) -> Result<T, Timeout> {
    for _ in 0..max_attempts {
        if let Some(v) = f() {
            return Ok(v);
        }
    }
    Err(Timeout {
        attempts: max_attempts,
    })
}

/// Burn roughly `iterations` loop turns. Not calibrated to any clock.
#[inline(never)]
pub fn spin(iterations: u32) {
    for _ in 0..iterations {
        core::hint::spin_loop();
    }
}
