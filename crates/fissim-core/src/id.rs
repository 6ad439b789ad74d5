//! Identity types for events and energy fields
//!
//! Both identifiers are 64-bit counters allocated by the owning context
//! (event generator, field manager); there is no process-global id state.

use std::fmt;

/// Fission event identity - unique within one engine instance
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventId(pub u64);

impl EventId {
    #[inline]
    pub fn new(id: u64) -> Self {
        EventId(id)
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        EventId(u64::from_le_bytes(bytes))
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Energy field identity - unique within one engine instance
///
/// Also keys the dissipation transform: round keys are derived from the
/// field id, so two fields never share a keystream.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldId(pub u64);

impl FieldId {
    #[inline]
    pub fn new(id: u64) -> Self {
        FieldId(id)
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        FieldId(u64::from_le_bytes(bytes))
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({})", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
