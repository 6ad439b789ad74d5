//! Performance metrics

use serde::Serialize;

/// Point-in-time view of engine throughput and resource usage
///
/// Counter values are read from independent atomics, so fields are
/// individually accurate but not jointly consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerformanceSnapshot {
    pub total_events: u64,
    pub events_per_second: f64,
    pub average_processing_ms: f64,
    pub active_fields: usize,
    pub total_fields_created: u64,
    pub current_memory_mb: f64,
    pub peak_memory_mb: f64,
    pub cpu_cycles_billions: f64,
    pub total_energy_mev: f64,
    pub allocation_failures: u64,
    pub skipped_rounds: u64,
    pub continuous_mode: bool,
    pub uptime_seconds: f64,
}

pub(crate) fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
