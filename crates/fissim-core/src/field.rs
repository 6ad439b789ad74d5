//! Energy fields
//!
//! An energy field maps a quantity of energy onto consumable computational
//! resources: a sized byte buffer and a cycle budget. The buffer is
//! exclusively owned by the field - allocated when the field is created,
//! freed when the field is dropped, never aliased.

use std::time::Instant;

use crate::constants::DEPLETION_FRACTION;
use crate::FieldId;

/// A resource allocation representing a quantity of energy, subject to
/// decay through keyed transform rounds
#[derive(Debug)]
pub struct EnergyField {
    /// Field identity
    pub id: FieldId,
    /// Current energy level (MeV)
    pub energy_mev: f64,
    /// Energy level at creation (MeV)
    pub initial_energy_mev: f64,
    /// Bytes allocated to represent this energy (zero when degraded)
    pub memory_bytes: usize,
    /// Cycle budget representing computational cost
    pub cpu_cycles: u64,
    /// Thermodynamic entropy proxy in [0, 1]
    pub entropy_factor: f64,
    /// Stability, always `1 - entropy_factor`
    pub stability_factor: f64,
    /// Observed dissipation rate (MeV per second)
    pub dissipation_rate: f64,
    /// Normalized coupling strength for field interactions
    pub interaction_strength: f64,
    /// Transform rounds applied so far (capped)
    pub rounds_completed: u32,
    /// Total energy released through dissipation (MeV)
    pub energy_dissipated: f64,
    /// Creation timestamp
    pub created_at: Instant,
    /// Exclusively owned backing buffer; `buffer.len() == memory_bytes`
    pub buffer: Vec<u8>,
}

impl EnergyField {
    /// A field is depleted once its energy falls below 1% of its initial
    /// value; depleted fields are removed and their buffers freed.
    pub fn is_depleted(&self) -> bool {
        self.energy_mev < DEPLETION_FRACTION * self.initial_energy_mev
    }

    /// Bytes currently backing this field
    pub fn buffer_bytes(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_field(energy: f64) -> EnergyField {
        EnergyField {
            id: FieldId::new(1),
            energy_mev: energy,
            initial_energy_mev: energy,
            memory_bytes: 0,
            cpu_cycles: 0,
            entropy_factor: 0.0,
            stability_factor: 1.0,
            dissipation_rate: 0.0,
            interaction_strength: energy / 1000.0,
            rounds_completed: 0,
            energy_dissipated: 0.0,
            created_at: Instant::now(),
            buffer: Vec::new(),
        }
    }

    #[test]
    fn test_depletion_threshold() {
        let mut field = test_field(100.0);
        assert!(!field.is_depleted());

        field.energy_mev = 1.1;
        assert!(!field.is_depleted());

        field.energy_mev = 0.9;
        assert!(field.is_depleted());
    }
}
