//! Seeded pseudo-random source for reproducible layouts.
//!
//! The generator is the Park–Miller "minimal standard" multiplicative
//! congruential generator: `seed' = seed * 16807 mod (2^31 - 1)`, sampled as
//! `seed' / (2^31 - 1)`. Every layout decision draws from one stream in a
//! fixed order, so the same inputs always produce the same arrangement.
//!
//! ```
//! use zenposter::rng::{ParkMiller, RandomSource};
//!
//! let mut a = ParkMiller::new(15_042);
//! let mut b = ParkMiller::new(15_042);
//! assert_eq!(a.next_f64(), b.next_f64());
//! ```

use crate::math;

/// Modulus of the generator, `2^31 - 1`.
pub const MODULUS: u64 = 2_147_483_647;
/// Multiplier of the generator, `7^5`.
pub const MULTIPLIER: u64 = 16_807;

/// A stream of uniform samples in `[0, 1)`.
///
/// Layout generation takes any implementation, so callers can substitute
/// their own stream in tests or replay a recorded one.
pub trait RandomSource {
    /// Advance the stream and return the next sample.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let i = math::floor(self.next_f64() * len as f64) as usize;
        // A source returning exactly 1.0 would otherwise step past the end.
        i.min(len - 1)
    }

    /// Pick one element uniformly.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }

    /// Fisher–Yates shuffle, walking from the last element down to index 1.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

/// Park–Miller minimal standard generator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    /// Start a stream from `seed`.
    ///
    /// The seed is reduced modulo [`MODULUS`]. A zero state would stick at
    /// zero forever, so it is replaced by 1.
    pub const fn new(seed: u64) -> Self {
        let state = seed % MODULUS;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Seed used for a layout of `count` photos in style `style_index`.
    pub const fn for_layout(count: u32, style_index: u32) -> Self {
        Self::new(count as u64 * 1000 + style_index as u64 * 137 + 42)
    }

    /// Current internal state (the last raw value produced).
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Advance and return the raw integer in `1..MODULUS`.
    pub fn next_raw(&mut self) -> u64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state
    }
}

impl RandomSource for ParkMiller {
    fn next_f64(&mut self) -> f64 {
        self.next_raw() as f64 / MODULUS as f64
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}
