//! Energy field lifecycle
//!
//! The manager turns energy quantities into fields: it sizes and allocates
//! the backing buffer, seeds it through one keyed transform pass, and
//! computes the initial thermodynamic factors. Allocation failure is not
//! fatal; the field is created degraded with a zero-byte buffer and the
//! failure is counted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tracing::{debug, info, warn};

use fissim_core::{EnergyField, EngineConfig, FieldId, FissionError, FissionResult};
use fissim_physics::entropy_estimate;

use crate::cipher::{FieldCipher, SEED_ROUND};

/// Creates, validates, and combines energy fields
pub struct FieldManager {
    config: EngineConfig,
    next_id: AtomicU64,
    alloc_failures: AtomicU64,
}

impl FieldManager {
    pub fn new(config: EngineConfig) -> Self {
        FieldManager {
            config,
            next_id: AtomicU64::new(1),
            alloc_failures: AtomicU64::new(0),
        }
    }

    /// Allocation failures survived so far
    pub fn alloc_failures(&self) -> u64 {
        self.alloc_failures.load(Ordering::Relaxed)
    }

    /// Create a field representing `energy_mev` of energy
    ///
    /// Buffer size and cycle budget scale linearly with energy. If the
    /// buffer cannot be allocated the field is created degraded: zero
    /// bytes, full cycle budget, entropy from the cycle term alone.
    pub fn create(&self, energy_mev: f64) -> FissionResult<EnergyField> {
        if !energy_mev.is_finite() || energy_mev <= 0.0 {
            return Err(FissionError::InvalidEnergy(energy_mev));
        }

        let id = FieldId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let requested_bytes = (energy_mev * self.config.memory_scale) as usize;
        let cpu_cycles = (energy_mev * self.config.cycle_scale) as u64;

        let mut buffer = Vec::new();
        let memory_bytes = match buffer.try_reserve_exact(requested_bytes) {
            Ok(()) => {
                buffer.resize(requested_bytes, 0);
                requested_bytes
            }
            Err(_) => {
                self.alloc_failures.fetch_add(1, Ordering::Relaxed);
                warn!(
                    field = %id,
                    requested_bytes,
                    "buffer allocation failed, field degraded to zero bytes"
                );
                0
            }
        };

        // Seeding pass gives the buffer non-trivial content before the
        // first dissipation round
        FieldCipher::for_round(id, SEED_ROUND).transform(&mut buffer)?;

        let entropy = entropy_estimate(memory_bytes, cpu_cycles);
        let field = EnergyField {
            id,
            energy_mev,
            initial_energy_mev: energy_mev,
            memory_bytes,
            cpu_cycles,
            entropy_factor: entropy,
            stability_factor: 1.0 - entropy,
            dissipation_rate: 0.0,
            interaction_strength: (energy_mev / 1000.0).min(1.0),
            rounds_completed: 0,
            energy_dissipated: 0.0,
            created_at: Instant::now(),
            buffer,
        };

        debug!(
            field = %field.id,
            energy_mev,
            bytes = field.memory_bytes,
            cycles = field.cpu_cycles,
            "field created"
        );
        Ok(field)
    }

    /// Structural consistency check
    pub fn validate(&self, field: &EnergyField) -> bool {
        field.energy_mev.is_finite()
            && field.energy_mev >= 0.0
            && field.energy_mev <= field.initial_energy_mev
            && (0.0..=1.0).contains(&field.entropy_factor)
            && (field.stability_factor - (1.0 - field.entropy_factor)).abs() < 1e-9
            && field.buffer.len() == field.memory_bytes
            && field.rounds_completed <= self.config.max_rounds
    }

    /// Consume a field, freeing its buffer
    pub fn destroy(&self, field: EnergyField) {
        info!(
            field = %field.id,
            released_bytes = field.buffer_bytes(),
            residual_mev = field.energy_mev,
            "field destroyed"
        );
        drop(field);
    }

    /// Interference factor between two fields in [-1, 1]
    ///
    /// Entropy difference acts as a phase: fields at equal entropy
    /// interfere constructively, fields at opposite ends destructively.
    /// The geometric mean of the interaction strengths damps the effect
    /// for weak fields.
    pub fn interference(&self, a: &EnergyField, b: &EnergyField) -> f64 {
        let coupling = (a.interaction_strength * b.interaction_strength).sqrt();
        let phase = std::f64::consts::PI * (a.entropy_factor - b.entropy_factor).abs();
        (coupling * phase.cos()).clamp(-1.0, 1.0)
    }

    /// Absorb `other` into `target`, conserving energy
    ///
    /// Energies, cycle budgets, and dissipation totals add; entropy is the
    /// energy-weighted mean. The target keeps its own buffer; the absorbed
    /// field's buffer is freed when it drops.
    pub fn merge(&self, target: &mut EnergyField, other: EnergyField) {
        let total = target.energy_mev + other.energy_mev;
        if total > 0.0 {
            target.entropy_factor = (target.entropy_factor * target.energy_mev
                + other.entropy_factor * other.energy_mev)
                / total;
            target.stability_factor = 1.0 - target.entropy_factor;
        }
        target.energy_mev = total;
        target.initial_energy_mev += other.initial_energy_mev;
        target.cpu_cycles += other.cpu_cycles;
        target.energy_dissipated += other.energy_dissipated;
        target.rounds_completed = target.rounds_completed.max(other.rounds_completed);
        target.interaction_strength = (target.energy_mev / 1000.0).min(1.0);

        info!(
            target = %target.id,
            absorbed = %other.id,
            merged_mev = total,
            "fields merged"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> FieldManager {
        FieldManager::new(EngineConfig::small())
    }

    #[test]
    fn test_create_sizes_resources() {
        let m = manager();
        let field = m.create(100.0).unwrap();
        assert_eq!(field.memory_bytes, 100_000);
        assert_eq!(field.cpu_cycles, 100_000_000);
        assert_eq!(field.buffer.len(), field.memory_bytes);
        assert_eq!(field.energy_mev, 100.0);
        assert_eq!(field.rounds_completed, 0);
    }

    #[test]
    fn test_default_scales_hundred_mev() {
        let m = FieldManager::new(EngineConfig::default());
        let field = m.create(100.0).unwrap();
        assert_eq!(field.memory_bytes, 100_000_000);
        assert_eq!(field.cpu_cycles, 100_000_000_000);
    }

    #[test]
    fn test_create_rejects_non_positive_energy() {
        let m = manager();
        assert!(matches!(m.create(0.0), Err(FissionError::InvalidEnergy(_))));
        assert!(matches!(m.create(-5.0), Err(FissionError::InvalidEnergy(_))));
        assert!(matches!(
            m.create(f64::NAN),
            Err(FissionError::InvalidEnergy(_))
        ));
    }

    #[test]
    fn test_buffer_seeded_nonzero() {
        let m = manager();
        let field = m.create(10.0).unwrap();
        assert!(field.buffer.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_ids_are_unique() {
        let m = manager();
        let a = m.create(1.0).unwrap();
        let b = m.create(1.0).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_validate_fresh_field() {
        let m = manager();
        let field = m.create(50.0).unwrap();
        assert!(m.validate(&field));
    }

    #[test]
    fn test_validate_catches_corruption() {
        let m = manager();
        let mut field = m.create(50.0).unwrap();
        field.entropy_factor = 2.0;
        assert!(!m.validate(&field));

        let mut field = m.create(50.0).unwrap();
        field.energy_mev = f64::INFINITY;
        assert!(!m.validate(&field));

        let mut field = m.create(50.0).unwrap();
        field.memory_bytes += 1;
        assert!(!m.validate(&field));
    }

    #[test]
    fn test_interference_bounds_and_symmetry() {
        let m = manager();
        let a = m.create(100.0).unwrap();
        let b = m.create(200.0).unwrap();
        let i = m.interference(&a, &b);
        assert!((-1.0..=1.0).contains(&i));
        assert_eq!(i, m.interference(&b, &a));
    }

    #[test]
    fn test_equal_entropy_is_constructive() {
        let m = manager();
        let a = m.create(100.0).unwrap();
        let b = m.create(100.0).unwrap();
        // Identical fields share entropy, so the phase term is 1
        let expected = a.interaction_strength;
        assert!((m.interference(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_merge_conserves_energy() {
        let m = manager();
        let mut a = m.create(100.0).unwrap();
        let b = m.create(60.0).unwrap();
        let before = a.energy_mev + b.energy_mev;
        m.merge(&mut a, b);
        assert_eq!(a.energy_mev, before);
        assert_eq!(a.initial_energy_mev, 160.0);
        assert!((0.0..=1.0).contains(&a.entropy_factor));
    }

    #[test]
    fn test_allocation_failure_degrades_field() {
        let m = manager();
        // ~1e16 requested bytes cannot be reserved
        let field = m.create(1.0e13).unwrap();
        assert_eq!(field.memory_bytes, 0);
        assert!(field.buffer.is_empty());
        assert_eq!(m.alloc_failures(), 1);
        assert!(m.validate(&field));
        // Entropy still accrues from the cycle budget
        assert!(field.entropy_factor > 0.0);
    }

    #[test]
    fn test_no_alloc_failures_in_normal_operation() {
        let m = manager();
        let _ = m.create(10.0).unwrap();
        assert_eq!(m.alloc_failures(), 0);
    }
}
