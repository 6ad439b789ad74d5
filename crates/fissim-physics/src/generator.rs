//! Ternary fission event generation
//!
//! One generator per producing thread. Generators created from the same
//! engine share an event-id counter so ids stay unique across the
//! single-shot path and the continuous path.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use fissim_core::constants::{
    ALPHA_PARTICLE_MASS, BINDING_ENERGY_PER_NUCLEON, MASS_RATIO_MEAN, MASS_RATIO_SIGMA,
    PARENT_BINDING_ENERGY_PER_NUCLEON, TERNARY_Q_VALUE,
};
use fissim_core::{
    EngineConfig, EventId, FissionError, FissionEvent, FissionResult, Fragment, Vec3,
};

use crate::conservation;
use crate::rng::PhysicsRng;

/// Non-relativistic momentum magnitude from mass and kinetic energy,
/// in the model's internal units
#[inline]
pub fn momentum_from_kinetic(mass: f64, kinetic_energy: f64) -> f64 {
    (2.0 * mass * kinetic_energy).sqrt()
}

/// Produces fission events from a parent mass and excitation energy
pub struct EventGenerator {
    config: EngineConfig,
    rng: PhysicsRng,
    next_id: Arc<AtomicU64>,
}

impl EventGenerator {
    /// Generator with its own id sequence, seeded from OS entropy
    pub fn new(config: EngineConfig) -> Self {
        Self::with_ids(config, Arc::new(AtomicU64::new(1)))
    }

    /// Generator sharing an id sequence with other generators
    pub fn with_ids(config: EngineConfig, next_id: Arc<AtomicU64>) -> Self {
        EventGenerator {
            config,
            rng: PhysicsRng::from_entropy(),
            next_id,
        }
    }

    /// Deterministic generator for reproducible tests
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        EventGenerator {
            config,
            rng: PhysicsRng::seeded(seed),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The id counter shared by this generator
    pub fn id_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.next_id)
    }

    /// Generate one event using the engine's default parent parameters
    pub fn generate_default(&mut self) -> FissionResult<FissionEvent> {
        let mass = self.config.default_parent_mass;
        let excitation = self.config.default_excitation_energy;
        self.generate(mass, excitation)
    }

    /// Generate one ternary fission event
    ///
    /// The parent mass splits into alpha + light + heavy. Momentum closure
    /// holds by construction: the heavy fragment's momentum is the negated
    /// vector sum of the other two. Mass-number closure is approximate to
    /// within +-1 because fragment A values are truncated independently.
    pub fn generate(
        &mut self,
        parent_mass: f64,
        excitation_energy: f64,
    ) -> FissionResult<FissionEvent> {
        if parent_mass <= ALPHA_PARTICLE_MASS {
            return Err(FissionError::InvalidParentMass(parent_mass));
        }
        if excitation_energy < 0.0 {
            return Err(FissionError::InvalidExcitationEnergy(excitation_energy));
        }

        let parent_z = self.config.default_parent_atomic_number;
        let mut alpha = Fragment::alpha();

        // Empirical light/heavy mass split; the floor guards the 1/(1+r)
        // division against extreme normal tails
        let mass_ratio = self.rng.normal(MASS_RATIO_MEAN, MASS_RATIO_SIGMA)?.max(0.1);
        let remaining_mass = parent_mass - ALPHA_PARTICLE_MASS;
        let light_mass = remaining_mass / (1.0 + mass_ratio);
        let heavy_mass = remaining_mass - light_mass;

        // Charges follow the parent's Z/A ratio; the light fragment's is
        // truncated, the heavy one closes the sum exactly
        let z_ratio = (parent_z - 2) as f64 / remaining_mass;
        let light_z = (light_mass * z_ratio) as u32;
        let heavy_z = parent_z - 2 - light_z;

        let light_a = (light_mass + 0.5) as u32;
        let heavy_a = (heavy_mass + 0.5) as u32;

        let q_value = TERNARY_Q_VALUE + excitation_energy;

        // Fixed alpha share, remainder proportional to fragment mass
        let alpha_ke = q_value * self.config.alpha_ke_fraction;
        let rest = q_value - alpha_ke;
        let light_ke = rest * light_mass / remaining_mass;
        let heavy_ke = rest - light_ke;

        // Two random directions; the heavy fragment balances them
        let p_alpha = self
            .rng
            .unit_sphere()
            .scaled(momentum_from_kinetic(ALPHA_PARTICLE_MASS, alpha_ke));
        let p_light = self
            .rng
            .unit_sphere()
            .scaled(momentum_from_kinetic(light_mass, light_ke));
        let p_heavy = -(p_alpha + p_light);

        alpha.kinetic_energy = alpha_ke;
        alpha.momentum = p_alpha;

        let light = Fragment {
            mass: light_mass,
            atomic_number: light_z,
            mass_number: light_a,
            kinetic_energy: light_ke,
            momentum: p_light,
            position: Vec3::ZERO,
            binding_energy: BINDING_ENERGY_PER_NUCLEON * light_a as f64,
            excitation_energy: excitation_energy * light_mass / remaining_mass,
            half_life: self.sample_half_life(),
        };
        let heavy = Fragment {
            mass: heavy_mass,
            atomic_number: heavy_z,
            mass_number: heavy_a,
            kinetic_energy: heavy_ke,
            momentum: p_heavy,
            position: Vec3::ZERO,
            binding_energy: BINDING_ENERGY_PER_NUCLEON * heavy_a as f64,
            excitation_energy: excitation_energy * heavy_mass / remaining_mass,
            half_life: self.sample_half_life(),
        };

        let parent_a = (parent_mass + 0.5) as u32;
        let fragment_binding = light.binding_energy + heavy.binding_energy + alpha.binding_energy;
        let binding_energy_released =
            fragment_binding - PARENT_BINDING_ENERGY_PER_NUCLEON * parent_a as f64;

        let mut event = FissionEvent {
            id: EventId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            field_id: None,
            light,
            heavy,
            alpha,
            total_kinetic_energy: alpha_ke + light_ke + heavy_ke,
            q_value,
            binding_energy_released,
            energy_conserved: false,
            energy_error: 0.0,
            momentum_conserved: false,
            momentum_error: 0.0,
            created_at: Instant::now(),
        };

        // Independent re-check even though closure holds by construction
        let report = conservation::verify(
            &event,
            self.config.energy_tolerance,
            self.config.momentum_tolerance,
        );
        report.apply(&mut event);

        Ok(event)
    }

    /// Fragment half-lives drawn log-uniform over milliseconds to ~17 min
    fn sample_half_life(&mut self) -> f64 {
        10f64.powf(self.rng.uniform(-3.0, 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> EventGenerator {
        EventGenerator::seeded(EngineConfig::default(), 42)
    }

    #[test]
    fn test_q_value_is_base_plus_excitation() {
        let mut gen = generator();
        let event = gen.generate(235.0, 6.5).unwrap();
        assert!((event.q_value - 206.5).abs() < 1e-12);
        assert!((event.total_kinetic_energy - 206.5).abs() < 1e-9);
    }

    #[test]
    fn test_conservation_flags_set() {
        let mut gen = generator();
        let event = gen.generate(235.0, 6.5).unwrap();
        assert!(event.energy_conserved);
        assert!(event.momentum_conserved);
    }

    #[test]
    fn test_mass_number_closure_within_one() {
        let mut gen = generator();
        for _ in 0..200 {
            let event = gen.generate(235.0, 6.5).unwrap();
            let sum = event.mass_number_sum() as i64;
            assert!((sum - 235).abs() <= 1, "mass number sum {sum}");
        }
    }

    #[test]
    fn test_charge_closure_exact() {
        let mut gen = generator();
        for _ in 0..200 {
            let event = gen.generate(235.0, 6.5).unwrap();
            assert_eq!(event.charge_sum(), 92);
        }
    }

    #[test]
    fn test_momentum_closure_by_construction() {
        let mut gen = generator();
        for _ in 0..200 {
            let event = gen.generate(235.0, 6.5).unwrap();
            let typical = event.heavy.momentum_magnitude();
            assert!(event.total_momentum().magnitude() / typical < 1e-6);
        }
    }

    #[test]
    fn test_alpha_share_is_five_percent() {
        let mut gen = generator();
        let event = gen.generate(235.0, 6.5).unwrap();
        assert!((event.alpha.kinetic_energy - 206.5 * 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let mut gen = generator();
        assert!(matches!(
            gen.generate(0.0, 6.5),
            Err(FissionError::InvalidParentMass(_))
        ));
        assert!(matches!(
            gen.generate(-10.0, 6.5),
            Err(FissionError::InvalidParentMass(_))
        ));
        assert!(matches!(
            gen.generate(235.0, -0.1),
            Err(FissionError::InvalidExcitationEnergy(_))
        ));
    }

    #[test]
    fn test_event_ids_unique() {
        let mut gen = generator();
        let a = gen.generate(235.0, 6.5).unwrap();
        let b = gen.generate(235.0, 6.5).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_binding_energy_released_positive() {
        let mut gen = generator();
        let event = gen.generate(235.0, 6.5).unwrap();
        assert!(event.binding_energy_released > 0.0);
    }
}
