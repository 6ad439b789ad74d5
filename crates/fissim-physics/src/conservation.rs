//! Conservation-law verification
//!
//! Events carry their own conserved-flags, but those are set by the
//! generator. `verify` recomputes both balances from the fragments alone
//! so callers can audit an event they did not produce.

use fissim_core::FissionEvent;

/// Outcome of checking one event against both conservation laws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservationReport {
    pub energy_conserved: bool,
    /// Absolute difference between fragment kinetic energy and the Q value
    pub energy_error: f64,
    pub momentum_conserved: bool,
    /// Magnitude of the residual momentum vector
    pub momentum_error: f64,
}

impl ConservationReport {
    /// Whether both laws hold within their tolerances
    pub fn is_valid(&self) -> bool {
        self.energy_conserved && self.momentum_conserved
    }

    /// Write the report back into the event's flag fields
    pub fn apply(&self, event: &mut FissionEvent) {
        event.energy_conserved = self.energy_conserved;
        event.energy_error = self.energy_error;
        event.momentum_conserved = self.momentum_conserved;
        event.momentum_error = self.momentum_error;
    }
}

/// Check energy and momentum balance for one event
///
/// Energy: the fragment kinetic energies must sum to the Q value within
/// `energy_tolerance` MeV. Momentum: the vector sum of the three fragment
/// momenta must vanish; the residual magnitude is compared against
/// `momentum_tolerance` scaled by the largest fragment momentum so the
/// check is insensitive to the event's absolute energy.
pub fn verify(
    event: &FissionEvent,
    energy_tolerance: f64,
    momentum_tolerance: f64,
) -> ConservationReport {
    let energy_error = (event.kinetic_energy_sum() - event.q_value).abs();

    let residual = event.total_momentum().magnitude();
    let scale = event
        .fragments()
        .iter()
        .map(|f| f.momentum_magnitude())
        .fold(1.0f64, f64::max);
    let momentum_error = residual / scale;

    ConservationReport {
        energy_conserved: energy_error <= energy_tolerance,
        energy_error,
        momentum_conserved: momentum_error <= momentum_tolerance,
        momentum_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::EventGenerator;
    use fissim_core::EngineConfig;

    fn event() -> FissionEvent {
        let mut gen = EventGenerator::seeded(EngineConfig::default(), 11);
        gen.generate(235.0, 6.5).unwrap()
    }

    #[test]
    fn test_generated_event_passes() {
        let e = event();
        let report = verify(&e, 1e-3, 1e-6);
        assert!(report.is_valid());
        assert!(report.energy_error < 1e-9);
    }

    #[test]
    fn test_energy_violation_detected() {
        let mut e = event();
        e.light.kinetic_energy += 5.0;
        let report = verify(&e, 1e-3, 1e-6);
        assert!(!report.energy_conserved);
        assert!((report.energy_error - 5.0).abs() < 1e-9);
        assert!(report.momentum_conserved);
    }

    #[test]
    fn test_momentum_violation_detected() {
        let mut e = event();
        e.alpha.momentum.x += e.heavy.momentum_magnitude();
        let report = verify(&e, 1e-3, 1e-6);
        assert!(!report.momentum_conserved);
    }

    #[test]
    fn test_apply_writes_flags() {
        let mut e = event();
        e.heavy.kinetic_energy += 1.0;
        let report = verify(&e, 1e-3, 1e-6);
        report.apply(&mut e);
        assert!(!e.energy_conserved);
        assert_eq!(e.energy_error, report.energy_error);
    }
}
