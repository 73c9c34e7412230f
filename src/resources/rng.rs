use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Deterministic RNG source for everything stochastic in the simulation:
/// turbulence gusts, random-component damage rolls, gun spread.
///
/// Each named stream is a persistent `ChaCha8Rng` seeded from the master seed
/// hashed with the stream name, so two runs with the same seed produce the
/// same gusts and the same damage rolls, while streams stay independent of
/// each other.
#[derive(Resource)]
pub struct RngBank {
    master_seed: u64,
    streams: HashMap<String, ChaCha8Rng>,
}

impl Default for RngBank {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            streams: HashMap::new(),
        }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn stream(&mut self, name: &str) -> &mut ChaCha8Rng {
        let seed = self.derive_seed(name);
        self.streams
            .entry(name.to_string())
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(seed))
    }

    /// Drops all stream state so the next draw from each stream restarts its
    /// sequence. Used on full scenario reset.
    pub fn reset(&mut self) {
        self.streams.clear();
    }

    fn derive_seed(&self, name: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.master_seed.hash(&mut hasher);
        name.hash(&mut hasher);
        hasher.finish()
    }
}
