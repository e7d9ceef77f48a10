//! Deterministic per-customer and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each customer carries an independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (customer_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive IDs uniformly across the seed space.  This
//! means:
//!
//! - A customer's browsing and buying decisions depend only on the run seed
//!   and their own ID, never on how many other customers exist or the order
//!   in which the orchestrator ticks them.
//! - Replaying a run with the same seed reproduces every draw exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::CustomerId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── CustomerRng ───────────────────────────────────────────────────────────────

/// Per-customer deterministic RNG, owned by the customer for its lifetime.
pub struct CustomerRng(SmallRng);

impl CustomerRng {
    /// Seed deterministically from the run's global seed and a customer ID.
    pub fn new(global_seed: u64, customer: CustomerId) -> Self {
        let seed = global_seed ^ (customer.0 as u64).wrapping_mul(MIXING_CONSTANT);
        CustomerRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice; `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Orchestrator-level RNG for global draws: arrival intervals, spawn-time
/// personality and budget sampling.  Customer-local decisions never touch
/// it, so per-customer streams stay independent of arrival order.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
