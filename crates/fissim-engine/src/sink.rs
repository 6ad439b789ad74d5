//! Event log sink
//!
//! The engine appends one record per processed event through this trait;
//! it is the only interface the core consumes from collaborators.

use tracing::info;

use fissim_core::FissionEvent;

/// Append-only consumer of processed-event records
pub trait EventSink: Send + Sync {
    fn record(&self, event: &FissionEvent);
}

/// Sink that emits one structured log record per event
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &FissionEvent) {
        info!(
            event = %event.id,
            q_value_mev = event.q_value,
            light_a = event.light.mass_number,
            heavy_a = event.heavy.mass_number,
            alpha_a = event.alpha.mass_number,
            energy_conserved = event.energy_conserved,
            momentum_conserved = event.momentum_conserved,
            "event processed"
        );
    }
}

/// Sink that discards records; used by benchmarks and tests
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: &FissionEvent) {}
}
