//! Spectral helpers
//!
//! Small standalone functions for sampling and evaluating the energy
//! distributions the emulator approximates. Not on the event hot path;
//! used by analysis code and tests.

use std::f64::consts::FRAC_PI_2;

use crate::rng::PhysicsRng;

/// Watt fission spectrum parameters for thermal fission of U-235
pub const WATT_A: f64 = 0.988;
pub const WATT_B: f64 = 2.249;

/// Sample an energy in MeV from a Maxwellian density at temperature `kt`
pub fn maxwell_sample(rng: &mut PhysicsRng, kt: f64) -> f64 {
    let r1 = rng.uniform(f64::MIN_POSITIVE, 1.0);
    let r2 = rng.uniform(f64::MIN_POSITIVE, 1.0);
    let c = (FRAC_PI_2 * rng.uniform(0.0, 1.0)).cos();
    -kt * (r1.ln() + r2.ln() * c * c)
}

/// Sample a neutron energy in MeV from the Watt spectrum
///
/// Maxwellian-plus-shift decomposition: a Maxwellian variate at
/// temperature `a`, displaced by `a^2 b / 4` plus a signed cross term,
/// is exactly Watt-distributed. Exact sampling, no rejection loop.
pub fn watt_sample(rng: &mut PhysicsRng) -> f64 {
    let w = maxwell_sample(rng, WATT_A);
    let shift = WATT_A * WATT_A * WATT_B / 4.0;
    let sign = 2.0 * rng.uniform(0.0, 1.0) - 1.0;
    w + shift + sign * (4.0 * shift * w).sqrt()
}

/// Maxwell-Boltzmann energy density at `energy` for temperature `kt`, both
/// in MeV
pub fn maxwell_boltzmann(energy: f64, kt: f64) -> f64 {
    if energy < 0.0 || kt <= 0.0 {
        return 0.0;
    }
    let norm = 2.0 * (energy / std::f64::consts::PI).sqrt() / kt.powf(1.5);
    norm * (-energy / kt).exp()
}
