//! Seeded linear congruential generator
//!
//! The dataset must regenerate bit-for-bit from a seed, so the generator uses a
//! fixed LCG rather than an entropy-seeded `rand` generator:
//! `state = (state * 9301 + 49297) mod 233280`, output `state / 233280`.
//!
//! `RngCore` / `SeedableRng` are implemented so the LCG can drive any `rand`
//! API; note it only has 233280 distinct states.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

pub const MULTIPLIER: u64 = 9301;
pub const INCREMENT: u64 = 49297;
pub const MODULUS: u64 = 233280;

/// Seed used by the reference dataset
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Current internal state
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Next value in [0, 1)
    pub fn next_unit(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// `low + u * span` for the next unit draw
    pub fn uniform(&mut self, low: f64, span: f64) -> f64 {
        low + self.next_unit() * span
    }

    /// Index in `0..len` chosen by `floor(u * len)`
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index draw from an empty list");
        let i = (self.next_unit() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }

    /// Uniformly pick an element. Callers guarantee `items` is non-empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Lcg::new(DEFAULT_SEED)
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        (self.next_unit() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Lcg::new(u64::from_le_bytes(seed))
    }

    /// Plain modular reduction, so `seed_from_u64(42)` reproduces the reference sequence
    fn seed_from_u64(state: u64) -> Self {
        Lcg::new(state)
    }
}
