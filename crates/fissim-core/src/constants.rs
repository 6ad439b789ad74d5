//! Model constants for ternary fission emulation
//!
//! These parameters define the synthetic model, not validated nuclear
//! physics: energy is mapped onto memory bytes and CPU cycles, and decays
//! through keyed transform rounds. The values come from the reference
//! emulation parameters for U-235 ternary fission.

/// Base Q-value for a ternary fission event (MeV)
pub const TERNARY_Q_VALUE: f64 = 200.0;

/// Alpha particle (third fragment) rest mass (amu)
pub const ALPHA_PARTICLE_MASS: f64 = 4.002603;

/// Alpha particle proton count
pub const ALPHA_ATOMIC_NUMBER: u32 = 2;

/// Alpha particle nucleon count
pub const ALPHA_MASS_NUMBER: u32 = 4;

/// Alpha particle binding energy (MeV)
pub const ALPHA_BINDING_ENERGY: f64 = 28.3;

/// Alpha particle half-life (seconds) - effectively stable
pub const ALPHA_HALF_LIFE: f64 = 1.0e100;

/// Mass-energy conversion factor (MeV per amu)
pub const AMU_TO_MEV: f64 = 931.494;

/// Fragment binding energy approximation (MeV per nucleon)
pub const BINDING_ENERGY_PER_NUCLEON: f64 = 8.5;

/// Parent nucleus binding energy approximation (MeV per nucleon, U-235)
pub const PARENT_BINDING_ENERGY_PER_NUCLEON: f64 = 7.6;

/// Energy-to-memory mapping: 1 MeV = 1 MB allocated
pub const ENERGY_TO_MEMORY_SCALE: f64 = 1.0e6;

/// Energy-to-cycles mapping: 1 MeV = 1e9 CPU cycles
pub const ENERGY_TO_CPU_CYCLES: f64 = 1.0e9;

/// Decay constant, ln 2, for half-life style dissipation
pub const ENTROPY_DECAY_CONSTANT: f64 = 0.693147;

/// Cumulative cap on keyed transform rounds per field
pub const MAX_DISSIPATION_ROUNDS: u32 = 256;

/// Fractional energy loss scale per transform round
pub const DISSIPATION_PER_ROUND: f64 = 0.01;

/// A field is removed once its energy falls below this fraction of its
/// initial value
pub const DEPLETION_FRACTION: f64 = 0.01;

/// Default parent nucleus mass (amu, U-235)
pub const DEFAULT_PARENT_MASS: f64 = 235.0;

/// Default parent proton count (U-235)
pub const DEFAULT_PARENT_ATOMIC_NUMBER: u32 = 92;

/// Default nuclear excitation energy (MeV)
pub const DEFAULT_EXCITATION_ENERGY: f64 = 6.5;

/// Mean of the light/heavy mass-split ratio distribution
pub const MASS_RATIO_MEAN: f64 = 1.4;

/// Standard deviation of the mass-split ratio distribution
pub const MASS_RATIO_SIGMA: f64 = 0.15;

/// Fixed share of total kinetic energy carried by the alpha particle
pub const ALPHA_KE_FRACTION: f64 = 0.05;

/// Default energy conservation tolerance (MeV)
pub const ENERGY_TOLERANCE: f64 = 1.0e-3;

/// Default momentum conservation tolerance, relative to the largest
/// fragment momentum magnitude
pub const MOMENTUM_TOLERANCE: f64 = 1.0e-6;
