//! Fissim Field - Energy field lifecycle and dissipation
//!
//! This crate owns everything that happens to an energy field after an
//! event produces one:
//! - Allocation and seeding of the backing buffer (`FieldManager`)
//! - Keyed cipher rounds that consume energy over time (`dissipate`)
//! - Pairwise interference and energy-conserving merges
//!
//! Fields are not `Clone`; each holds exclusive ownership of its buffer
//! and moves between the manager and callers by value.

pub mod cipher;
pub mod dissipation;
pub mod manager;

pub use cipher::FieldCipher;
pub use dissipation::{dissipate, DissipationReport};
pub use manager::FieldManager;
