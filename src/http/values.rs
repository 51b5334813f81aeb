//! Source of the demo values attached by `/test-log`.

use rand::Rng;

/// Supplies numbers for demo log fields.
pub trait ValueSource: Send + Sync {
    /// A value in `0..upper` (or `0` when `upper` is `0`).
    fn next_below(&self, upper: u32) -> u32;
}

/// Uniformly random values from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl ValueSource for ThreadRngSource {
    fn next_below(&self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Always yields the same value, reduced into range.
#[derive(Debug, Clone, Copy)]
pub struct FixedValue(pub u32);

impl ValueSource for FixedValue {
    fn next_below(&self, upper: u32) -> u32 {
        if upper == 0 {
            0
        } else {
            self.0 % upper
        }
    }
}
