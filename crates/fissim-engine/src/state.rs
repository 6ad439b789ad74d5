//! Shared aggregate state
//!
//! One coarse lock linearizes all structural mutation of the event and
//! field collections; hot counters are independent atomics. A joint read
//! of counter values is therefore not atomically consistent with the
//! collections; callers needing that take the lock through `with_aggregate`.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use fissim_core::{EnergyField, EngineConfig, FissionEvent};
use fissim_field::dissipation;

/// Collections guarded by the coarse lock
#[derive(Default)]
pub struct AggregateState {
    pub events: Vec<FissionEvent>,
    pub fields: Vec<EnergyField>,
}

#[derive(Default)]
struct Totals {
    energy_mev: f64,
    processing_secs: f64,
}

/// Result of one dissipation sweep over the live fields
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepReport {
    pub fields_swept: usize,
    pub fields_removed: usize,
    pub energy_released: f64,
}

/// Aggregate state plus the lock-free counters around it
pub struct SharedState {
    aggregate: Mutex<AggregateState>,
    totals: Mutex<Totals>,
    events_simulated: AtomicU64,
    fields_created: AtomicU64,
    current_bytes: AtomicU64,
    peak_bytes: AtomicU64,
    total_cycles: AtomicU64,
    skipped_rounds: AtomicU64,
    started_at: Instant,
}

impl SharedState {
    pub fn new() -> Self {
        SharedState {
            aggregate: Mutex::new(AggregateState::default()),
            totals: Mutex::new(Totals::default()),
            events_simulated: AtomicU64::new(0),
            fields_created: AtomicU64::new(0),
            current_bytes: AtomicU64::new(0),
            peak_bytes: AtomicU64::new(0),
            total_cycles: AtomicU64::new(0),
            skipped_rounds: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    /// Record one processed event and the fields it produced
    pub fn record_event(
        &self,
        event: FissionEvent,
        fields: Vec<EnergyField>,
        processing: Duration,
    ) {
        let new_bytes: u64 = fields.iter().map(|f| f.buffer_bytes() as u64).sum();
        let new_cycles: u64 = fields.iter().map(|f| f.cpu_cycles).sum();

        self.events_simulated.fetch_add(1, Ordering::Relaxed);
        self.fields_created
            .fetch_add(fields.len() as u64, Ordering::Relaxed);
        self.total_cycles.fetch_add(new_cycles, Ordering::Relaxed);
        let current = self.current_bytes.fetch_add(new_bytes, Ordering::Relaxed) + new_bytes;
        self.peak_bytes.fetch_max(current, Ordering::Relaxed);

        {
            let mut totals = self.totals.lock();
            totals.energy_mev += event.q_value;
            totals.processing_secs += processing.as_secs_f64();
        }

        let mut aggregate = self.aggregate.lock();
        aggregate.events.push(event);
        aggregate.fields.extend(fields);
    }

    /// Apply `rounds` dissipation rounds to every live field, removing the
    /// ones that deplete
    pub fn sweep(&self, rounds: u32, config: &EngineConfig) -> SweepReport {
        let mut aggregate = self.aggregate.lock();
        let mut report = SweepReport {
            fields_swept: aggregate.fields.len(),
            ..SweepReport::default()
        };

        for field in aggregate.fields.iter_mut() {
            let round = dissipation::dissipate(field, rounds, config);
            report.energy_released += round.energy_released;
            if round.rounds_skipped > 0 {
                self.skipped_rounds
                    .fetch_add(round.rounds_skipped as u64, Ordering::Relaxed);
            }
        }

        let mut freed_bytes = 0u64;
        aggregate.fields.retain(|field| {
            if field.is_depleted() {
                freed_bytes += field.buffer_bytes() as u64;
                report.fields_removed += 1;
                false
            } else {
                true
            }
        });
        if freed_bytes > 0 {
            self.current_bytes.fetch_sub(freed_bytes, Ordering::Relaxed);
        }
        if report.fields_removed > 0 {
            debug!(
                removed = report.fields_removed,
                freed_bytes, "depleted fields removed"
            );
        }

        report
    }

    /// Run a closure under the coarse lock for a consistent joint view
    pub fn with_aggregate<R>(&self, f: impl FnOnce(&AggregateState) -> R) -> R {
        f(&self.aggregate.lock())
    }

    /// Drop all recorded events and fields
    pub fn clear(&self) {
        let mut aggregate = self.aggregate.lock();
        let freed: u64 = aggregate.fields.iter().map(|f| f.buffer_bytes() as u64).sum();
        aggregate.events.clear();
        aggregate.fields.clear();
        if freed > 0 {
            self.current_bytes.fetch_sub(freed, Ordering::Relaxed);
        }
    }

    pub fn record_skipped_rounds(&self, count: u32) {
        if count > 0 {
            self.skipped_rounds.fetch_add(count as u64, Ordering::Relaxed);
        }
    }

    pub fn total_events(&self) -> u64 {
        self.events_simulated.load(Ordering::Relaxed)
    }

    pub fn total_fields_created(&self) -> u64 {
        self.fields_created.load(Ordering::Relaxed)
    }

    pub fn active_fields(&self) -> usize {
        self.aggregate.lock().fields.len()
    }

    pub fn current_bytes(&self) -> u64 {
        self.current_bytes.load(Ordering::Relaxed)
    }

    pub fn peak_bytes(&self) -> u64 {
        self.peak_bytes.load(Ordering::Relaxed)
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles.load(Ordering::Relaxed)
    }

    pub fn skipped_rounds(&self) -> u64 {
        self.skipped_rounds.load(Ordering::Relaxed)
    }

    pub fn total_energy_mev(&self) -> f64 {
        self.totals.lock().energy_mev
    }

    pub fn processing_secs(&self) -> f64 {
        self.totals.lock().processing_secs
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of the background sweeper thread
///
/// One dissipation round over the live fields per tick. Sweeping runs
/// here, off the generation and worker paths, so emit pacing stays
/// independent of the total live buffer size. Shutdown latency is bounded
/// by one `sweep_interval`.
pub fn sweeper_loop(config: EngineConfig, state: Arc<SharedState>, shutdown: Arc<AtomicBool>) {
    debug!("sweeper started");
    loop {
        std::thread::sleep(config.sweep_interval);
        if shutdown.load(Ordering::Acquire) {
            break;
        }
        state.sweep(1, &config);
    }
    debug!("sweeper stopped");
}
