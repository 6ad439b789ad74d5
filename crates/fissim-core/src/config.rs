//! Engine configuration
//!
//! One explicit context object constructed once and passed into the engine
//! and each worker. There is no process-wide mutable configuration.

use std::time::Duration;

use crate::constants;

/// Tunable parameters for the simulation engine
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Bytes allocated per MeV of field energy
    pub memory_scale: f64,
    /// CPU cycles budgeted per MeV of field energy
    pub cycle_scale: f64,
    /// Fractional energy loss scale per transform round
    pub dissipation_per_round: f64,
    /// Exponential decay constant (ln 2 by default)
    pub decay_constant: f64,
    /// Cumulative cap on transform rounds per field
    pub max_rounds: u32,
    /// Energy conservation tolerance (MeV)
    pub energy_tolerance: f64,
    /// Relative momentum conservation tolerance
    pub momentum_tolerance: f64,
    /// Worker pool size
    pub worker_threads: usize,
    /// Parent nucleus mass used by continuous mode (amu)
    pub default_parent_mass: f64,
    /// Parent proton count used to derive fragment charges
    pub default_parent_atomic_number: u32,
    /// Excitation energy used by continuous mode (MeV)
    pub default_excitation_energy: f64,
    /// Initial continuous-mode target rate (events per second)
    pub default_rate: f64,
    /// Share of total kinetic energy given to the alpha particle
    pub alpha_ke_fraction: f64,
    /// Worker wait timeout on the event queue; bounds shutdown latency
    pub queue_wait: Duration,
    /// Continuous generator polling tick
    pub poll_interval: Duration,
    /// Cadence of the background dissipation sweep over live fields
    pub sweep_interval: Duration,
    /// Fields below this fraction of initial energy are removed
    pub depletion_fraction: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            memory_scale: constants::ENERGY_TO_MEMORY_SCALE,
            cycle_scale: constants::ENERGY_TO_CPU_CYCLES,
            dissipation_per_round: constants::DISSIPATION_PER_ROUND,
            decay_constant: constants::ENTROPY_DECAY_CONSTANT,
            max_rounds: constants::MAX_DISSIPATION_ROUNDS,
            energy_tolerance: constants::ENERGY_TOLERANCE,
            momentum_tolerance: constants::MOMENTUM_TOLERANCE,
            worker_threads: default_worker_threads(),
            default_parent_mass: constants::DEFAULT_PARENT_MASS,
            default_parent_atomic_number: constants::DEFAULT_PARENT_ATOMIC_NUMBER,
            default_excitation_energy: constants::DEFAULT_EXCITATION_ENERGY,
            default_rate: 10.0,
            alpha_ke_fraction: constants::ALPHA_KE_FRACTION,
            queue_wait: Duration::from_millis(50),
            poll_interval: Duration::from_micros(200),
            sweep_interval: Duration::from_millis(100),
            depletion_fraction: constants::DEPLETION_FRACTION,
        }
    }
}

impl EngineConfig {
    /// Configuration for unit tests: one worker, tiny resource scales so
    /// field buffers stay small
    pub fn small() -> Self {
        EngineConfig {
            memory_scale: 1.0e3,
            cycle_scale: 1.0e6,
            worker_threads: 1,
            ..EngineConfig::default()
        }
    }
}

fn default_worker_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.memory_scale, 1.0e6);
        assert_eq!(config.cycle_scale, 1.0e9);
        assert_eq!(config.max_rounds, 256);
        assert!(config.worker_threads >= 1);
    }

    #[test]
    fn test_small_config_overrides() {
        let config = EngineConfig::small();
        assert_eq!(config.worker_threads, 1);
        assert_eq!(config.memory_scale, 1.0e3);
        // Everything else keeps the defaults
        assert_eq!(config.max_rounds, 256);
    }
}
