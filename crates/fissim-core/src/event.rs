//! Fission events
//!
//! An event is one synthetic three-fragment decay record. It is created
//! once by the generator, never mutated afterwards (apart from the field
//! id assigned by the consumer that processes it), and consumed exactly
//! once - either synchronously or by one worker draining the queue.

use std::time::Instant;

use crate::{EventId, FieldId, Fragment, Vec3};

/// One ternary fission event with derived conservation results
#[derive(Clone, Debug)]
pub struct FissionEvent {
    /// Event identity
    pub id: EventId,
    /// Owning energy field, assigned by the consumer that processes
    /// this event
    pub field_id: Option<FieldId>,
    /// Lighter fission fragment
    pub light: Fragment,
    /// Heavier fission fragment
    pub heavy: Fragment,
    /// Third particle (alpha)
    pub alpha: Fragment,
    /// Total kinetic energy released (MeV)
    pub total_kinetic_energy: f64,
    /// Q-value of the reaction (MeV)
    pub q_value: f64,
    /// Binding energy released by the split (MeV)
    pub binding_energy_released: f64,
    /// Energy conservation verdict
    pub energy_conserved: bool,
    /// Absolute energy conservation error (MeV)
    pub energy_error: f64,
    /// Momentum conservation verdict
    pub momentum_conserved: bool,
    /// Relative momentum conservation error
    pub momentum_error: f64,
    /// Creation timestamp
    pub created_at: Instant,
}

impl FissionEvent {
    /// All three fragments, light first
    pub fn fragments(&self) -> [&Fragment; 3] {
        [&self.light, &self.heavy, &self.alpha]
    }

    /// Vector sum of fragment momenta (zero within tolerance by
    /// construction)
    pub fn total_momentum(&self) -> Vec3 {
        self.light.momentum + self.heavy.momentum + self.alpha.momentum
    }

    /// Sum of fragment nucleon counts
    pub fn mass_number_sum(&self) -> u32 {
        self.light.mass_number + self.heavy.mass_number + self.alpha.mass_number
    }

    /// Sum of fragment proton counts
    pub fn charge_sum(&self) -> u32 {
        self.light.atomic_number + self.heavy.atomic_number + self.alpha.atomic_number
    }

    /// Sum of fragment kinetic energies (MeV)
    pub fn kinetic_energy_sum(&self) -> f64 {
        self.light.kinetic_energy + self.heavy.kinetic_energy + self.alpha.kinetic_energy
    }
}
