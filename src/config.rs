use crate::core::constants::{PARTICLE_COUNT, PARTICLE_SEED};
use crate::core::{LifecycleConfig, ProximityConfig};

/// Everything the tank reads once at startup.
#[derive(Clone, Debug)]
pub struct TankConfig {
    pub lifecycle: LifecycleConfig,
    pub proximity: ProximityConfig,
    pub particle_count: usize,
    pub particle_seed: u64,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleConfig::default(),
            proximity: ProximityConfig::default(),
            particle_count: PARTICLE_COUNT,
            particle_seed: PARTICLE_SEED,
        }
    }
}
