//! Fissim Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the fissim emulator:
//! - Identifiers (EventId, FieldId)
//! - Model constants (Q-values, resource scales, dissipation parameters)
//! - Data model (Fragment, FissionEvent, EnergyField)
//! - Engine configuration and error types

pub mod id;
pub mod constants;
pub mod fragment;
pub mod event;
pub mod field;
pub mod config;
pub mod error;

pub use id::*;
pub use fragment::*;
pub use event::*;
pub use field::*;
pub use config::*;
pub use error::*;
