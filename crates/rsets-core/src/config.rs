//! Configuration for a sampling session.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::factory::DEFAULT_PROFILE;

/// Configuration for a [`Sampler`](crate::Sampler).
#[derive(Debug, Clone)]
pub struct SetsConfig {
    /// RNG seed for reproducible draws.
    pub seed: u64,
    /// Frequency profile applied when building sets.
    pub profile: String,
}

impl Default for SetsConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

impl SetsConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the frequency profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// A fresh RNG seeded from this configuration.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}
