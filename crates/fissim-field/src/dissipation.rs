//! Energy dissipation through keyed transform rounds
//!
//! Each round encrypts the field's buffer with a round-specific key and
//! decays the field's energy by an exponential factor modulated by the
//! ciphertext. Rounds accumulate across calls and are capped per field;
//! energy never increases and entropy never decreases.

use tracing::{debug, warn};

use fissim_core::{EnergyField, EngineConfig};
use fissim_physics::entropy_estimate;

use crate::cipher::FieldCipher;

/// Outcome of one `dissipate` call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DissipationReport {
    /// Rounds that transformed the buffer and decayed energy
    pub rounds_applied: u32,
    /// Rounds consumed without effect because the transform failed
    pub rounds_skipped: u32,
    /// Energy released by this call (MeV)
    pub energy_released: f64,
}

impl DissipationReport {
    pub fn total_rounds(&self) -> u32 {
        self.rounds_applied + self.rounds_skipped
    }
}

/// Apply up to `rounds` transform rounds to the field
///
/// Requests beyond the field's remaining round budget are silently
/// truncated; `rounds_applied` reports what actually ran. Zero rounds is
/// a strict no-op.
pub fn dissipate(field: &mut EnergyField, rounds: u32, config: &EngineConfig) -> DissipationReport {
    let budget = rounds.min(config.max_rounds.saturating_sub(field.rounds_completed));
    let mut report = DissipationReport::default();
    let energy_before = field.energy_mev;

    for _ in 0..budget {
        let round = field.rounds_completed;
        match FieldCipher::for_round(field.id, round).transform(&mut field.buffer) {
            Ok(variation) => {
                let factor =
                    (-config.decay_constant * config.dissipation_per_round * variation).exp();
                field.energy_mev *= factor;
                field.entropy_factor =
                    (field.entropy_factor * (1.0 + config.dissipation_per_round)).clamp(0.0, 1.0);
                field.stability_factor = 1.0 - field.entropy_factor;
                report.rounds_applied += 1;
            }
            Err(e) => {
                // Energy untouched; the round is consumed so a persistent
                // failure cannot stall the cap
                warn!(field = %field.id, round, error = %e, "transform round skipped");
                report.rounds_skipped += 1;
            }
        }
        field.rounds_completed += 1;
    }

    report.energy_released = energy_before - field.energy_mev;
    field.energy_dissipated += report.energy_released;

    if report.rounds_applied > 0 {
        let elapsed = field.created_at.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            field.dissipation_rate = field.energy_dissipated / elapsed;
        }
        debug!(
            field = %field.id,
            rounds = report.rounds_applied,
            released_mev = report.energy_released,
            remaining_mev = field.energy_mev,
            "dissipation applied"
        );
    }

    report
}

/// Recompute the entropy proxy of a freshly allocated field from its
/// resource footprint
pub fn initial_entropy(field: &EnergyField) -> f64 {
    entropy_estimate(field.memory_bytes, field.cpu_cycles)
}
