//! Per-thread random variate generation
//!
//! Each worker and the continuous generator own a `PhysicsRng`; nothing is
//! shared across threads and no locking is needed. Seeded construction
//! makes test runs reproducible.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Poisson};

use fissim_core::{FissionError, FissionResult, Vec3};

/// Random variate generator for physics sampling
pub struct PhysicsRng {
    rng: StdRng,
}

impl PhysicsRng {
    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        PhysicsRng {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        PhysicsRng {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform sample in `[min, max)`
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..max)
    }

    /// Normal sample with the given mean and standard deviation
    ///
    /// `Normal::new` itself accepts a negative std_dev, so the bound is
    /// checked here.
    pub fn normal(&mut self, mean: f64, sigma: f64) -> FissionResult<f64> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FissionError::BadDistribution(format!(
                "standard deviation must be positive, got {sigma}"
            )));
        }
        let dist = Normal::new(mean, sigma)
            .map_err(|e| FissionError::BadDistribution(e.to_string()))?;
        Ok(dist.sample(&mut self.rng))
    }

    /// Poisson sample for discrete event counts
    pub fn poisson(&mut self, lambda: f64) -> FissionResult<u64> {
        let dist = Poisson::new(lambda)
            .map_err(|e| FissionError::BadDistribution(e.to_string()))?;
        Ok(dist.sample(&mut self.rng) as u64)
    }

    /// Direction drawn uniformly on the unit sphere
    ///
    /// theta from the inverse cosine of a uniform sample, phi uniform in
    /// [0, 2*pi), so solid angle is covered without pole clustering.
    pub fn unit_sphere(&mut self) -> Vec3 {
        let theta = (1.0 - 2.0 * self.uniform(0.0, 1.0)).acos();
        let phi = self.uniform(0.0, TAU);
        Vec3::new(
            theta.sin() * phi.cos(),
            theta.sin() * phi.sin(),
            theta.cos(),
        )
    }
}
