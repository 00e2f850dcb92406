//! Deterministic simulation-level RNG wrapper.
//!
//! Every stochastic decision in a warehouse (robot placement, box spawning,
//! box weights) draws from one `SimRng` owned by the simulation instance and
//! seeded from `SimConfig::seed`.  The whole tick runs on one logical thread,
//! so a single stream is enough to make runs reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Owned by the simulation and only drawn from in the sequential parts of a
/// tick (placement at build time, the belt pass).
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

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Pick `amount` distinct elements of `slice` without replacement, in
    /// random order.  Returns `None` when the slice is too short.
    pub fn sample<T: Copy>(&mut self, slice: &[T], amount: usize) -> Option<Vec<T>> {
        use rand::seq::SliceRandom;
        if amount > slice.len() {
            return None;
        }
        Some(slice.choose_multiple(&mut self.0, amount).copied().collect())
    }
}
