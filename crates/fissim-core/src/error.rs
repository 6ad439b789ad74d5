//! Error types for the fissim emulator

use thiserror::Error;

/// Errors surfaced at the engine facade
#[derive(Error, Debug)]
pub enum FissionError {
    // Input validation
    #[error("Invalid parent mass: {0} amu (must exceed the alpha particle mass)")]
    InvalidParentMass(f64),

    #[error("Invalid excitation energy: {0} MeV (must be non-negative)")]
    InvalidExcitationEnergy(f64),

    #[error("Invalid field energy: {0} MeV (must be positive)")]
    InvalidEnergy(f64),

    #[error("Invalid event rate: {0} events/sec (must be positive)")]
    InvalidRate(f64),

    // Generator internals
    #[error("Invalid sampling distribution: {0}")]
    BadDistribution(String),

    // Field internals
    #[error("Keyed transform failed on field {0}")]
    TransformFailed(u64),

    // Lifecycle
    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    #[error("Engine has been shut down")]
    EngineShutDown,
}

/// Result type for fissim operations
pub type FissionResult<T> = Result<T, FissionError>;
