//! Fissim Physics - Event generation and conservation checking
//!
//! This crate implements the synthetic physics of the emulator:
//! - Per-thread random variate generation (uniform, normal, Poisson)
//! - The entropy estimator mapping resources to a [0, 1] entropy proxy
//! - The ternary fission event generator
//! - The conservation-law verifier
//! - Aggregate event statistics and spectral helpers

pub mod rng;
pub mod entropy;
pub mod generator;
pub mod conservation;
pub mod stats;
pub mod spectrum;

pub use rng::PhysicsRng;
pub use entropy::entropy_estimate;
pub use generator::EventGenerator;
pub use conservation::{verify, ConservationReport};
pub use stats::EventStatistics;
