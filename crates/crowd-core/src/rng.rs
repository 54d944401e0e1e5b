//! Deterministic per-slot and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each solver slot gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (slot_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive slot IDs uniformly across the seed space.
//! This means:
//!
//! - A failed spawn in one slot never shifts the random stream of another,
//!   so runs stay reproducible while the world rejects spawns at random.
//! - Paths fork their own child stream at creation, so branch choices made
//!   while extending one path do not disturb preferred-speed draws.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::SlotId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-slot deterministic RNG.  Every agent spawned into a slot draws its
/// preferred speed, appearance, and path from that slot's stream.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a slot ID.
    pub fn new(global_seed: u64, slot: SlotId) -> Self {
        let seed = global_seed ^ (slot.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
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

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Fork an independent child stream (one per path).
    pub fn fork(&mut self) -> SimRng {
        SimRng::new(self.0.r#gen::<u64>())
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// General-purpose seeded RNG for single-owner state (paths, the in-process
/// world).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
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

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
