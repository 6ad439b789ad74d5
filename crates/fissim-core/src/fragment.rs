//! Fission fragments and their kinematics

use std::ops::{Add, AddAssign, Neg};

use crate::constants;

/// 3-component vector for momenta and positions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    /// Euclidean magnitude
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Scale all components by a factor
    pub fn scaled(&self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// One of the three products of a fission event
///
/// Immutable once produced by the generator.
#[derive(Clone, Copy, Debug)]
pub struct Fragment {
    /// Fragment mass (amu)
    pub mass: f64,
    /// Proton count
    pub atomic_number: u32,
    /// Nucleon count
    pub mass_number: u32,
    /// Kinetic energy (MeV)
    pub kinetic_energy: f64,
    /// Momentum vector (model units)
    pub momentum: Vec3,
    /// Position vector (model units)
    pub position: Vec3,
    /// Binding energy (MeV)
    pub binding_energy: f64,
    /// Residual excitation energy (MeV)
    pub excitation_energy: f64,
    /// Decay half-life (seconds)
    pub half_life: f64,
}

impl Fragment {
    /// The third fragment of a ternary split, with fixed alpha constants.
    /// Kinematics are filled in by the generator.
    pub fn alpha() -> Self {
        Fragment {
            mass: constants::ALPHA_PARTICLE_MASS,
            atomic_number: constants::ALPHA_ATOMIC_NUMBER,
            mass_number: constants::ALPHA_MASS_NUMBER,
            kinetic_energy: 0.0,
            momentum: Vec3::ZERO,
            position: Vec3::ZERO,
            binding_energy: constants::ALPHA_BINDING_ENERGY,
            excitation_energy: 0.0,
            half_life: constants::ALPHA_HALF_LIFE,
        }
    }

    /// Momentum magnitude
    pub fn momentum_magnitude(&self) -> f64 {
        self.momentum.magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_magnitude() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec3_neg_cancels() {
        let v = Vec3::new(1.5, -2.5, 3.0);
        let sum = v + (-v);
        assert!(sum.magnitude() < 1e-12);
    }

    #[test]
    fn test_alpha_constants() {
        let alpha = Fragment::alpha();
        assert_eq!(alpha.atomic_number, 2);
        assert_eq!(alpha.mass_number, 4);
        assert!((alpha.mass - 4.002603).abs() < 1e-9);
    }
}
