//! Engine facade
//!
//! `FissionEngine` owns the worker pool, the queue, the continuous
//! generator, and the aggregate state. It is the single surface external
//! callers consume; no thread or lock from the layers below leaks out.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{info, warn};

use fissim_core::{
    EnergyField, EngineConfig, EventId, FissionError, FissionEvent, FissionResult,
};
use fissim_field::{dissipate, DissipationReport, FieldManager};
use fissim_physics::EventGenerator;

use crate::continuous::{generator_loop, RateControl};
use crate::metrics::{bytes_to_mb, PerformanceSnapshot};
use crate::queue::EventQueue;
use crate::sink::{EventSink, TracingSink};
use crate::state::{sweeper_loop, SharedState, SweepReport};
use crate::worker::{process_event, worker_loop, WorkerContext};

/// The concurrent simulation core
///
/// Construction spawns the worker pool; `shutdown` (or drop) joins every
/// thread. All methods take `&self` and are safe to call from multiple
/// threads.
pub struct FissionEngine {
    config: EngineConfig,
    ctx: Arc<WorkerContext>,
    generator: Mutex<EventGenerator>,
    event_ids: Arc<AtomicU64>,
    rate: Arc<RateControl>,
    running: Arc<AtomicBool>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    continuous: Mutex<Option<JoinHandle<()>>>,
    shut_down: AtomicBool,
}

impl FissionEngine {
    /// Engine logging through the tracing sink
    pub fn new(config: EngineConfig) -> FissionResult<Self> {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Engine with a caller-provided event sink
    ///
    /// Fails if any worker thread cannot be spawned; a partial pool would
    /// not honor the concurrency contract, so already-spawned workers are
    /// torn down before the error is returned.
    pub fn with_sink(config: EngineConfig, sink: Arc<dyn EventSink>) -> FissionResult<Self> {
        let ctx = Arc::new(WorkerContext {
            config: config.clone(),
            queue: Arc::new(EventQueue::new()),
            state: Arc::new(SharedState::new()),
            fields: Arc::new(FieldManager::new(config.clone())),
            sink,
            shutdown: Arc::new(AtomicBool::new(false)),
        });

        let mut workers = Vec::with_capacity(config.worker_threads);
        for worker_id in 0..config.worker_threads {
            let spawn = std::thread::Builder::new()
                .name(format!("fissim-worker-{worker_id}"))
                .spawn({
                    let ctx = Arc::clone(&ctx);
                    move || worker_loop(worker_id, ctx)
                });
            match spawn {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    ctx.shutdown.store(true, Ordering::Release);
                    ctx.queue.close();
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(FissionError::WorkerSpawn(e));
                }
            }
        }

        // The sweeper joins at shutdown like the workers; its spawn failure
        // is just as fatal since fields would otherwise never decay
        let spawn = std::thread::Builder::new()
            .name("fissim-sweeper".into())
            .spawn({
                let config = config.clone();
                let state = Arc::clone(&ctx.state);
                let shutdown = Arc::clone(&ctx.shutdown);
                move || sweeper_loop(config, state, shutdown)
            });
        match spawn {
            Ok(handle) => workers.push(handle),
            Err(e) => {
                ctx.shutdown.store(true, Ordering::Release);
                ctx.queue.close();
                for handle in workers {
                    let _ = handle.join();
                }
                return Err(FissionError::WorkerSpawn(e));
            }
        }
        info!(workers = config.worker_threads, "engine started");

        let generator = EventGenerator::new(config.clone());
        let event_ids = generator.id_counter();
        let default_rate = config.default_rate;

        Ok(FissionEngine {
            config,
            ctx,
            generator: Mutex::new(generator),
            event_ids,
            rate: Arc::new(RateControl::new(default_rate)),
            running: Arc::new(AtomicBool::new(false)),
            workers: Mutex::new(workers),
            continuous: Mutex::new(None),
            shut_down: AtomicBool::new(false),
        })
    }

    fn check_alive(&self) -> FissionResult<()> {
        if self.shut_down.load(Ordering::Acquire) {
            return Err(FissionError::EngineShutDown);
        }
        Ok(())
    }

    /// Generate, verify, and process one event synchronously
    ///
    /// Bypasses the queue: fields are created on the calling thread
    /// through the same routine the workers run. The returned event
    /// carries the field id assigned during processing.
    pub fn simulate_event(
        &self,
        parent_mass: f64,
        excitation_energy: f64,
    ) -> FissionResult<FissionEvent> {
        self.check_alive()?;
        let mut event = self
            .generator
            .lock()
            .generate(parent_mass, excitation_energy)?;
        event.field_id = process_event(&self.ctx, event.clone());
        Ok(event)
    }

    /// Generate one event and hand it to the worker pool
    pub fn enqueue_event(
        &self,
        parent_mass: f64,
        excitation_energy: f64,
    ) -> FissionResult<EventId> {
        self.check_alive()?;
        let event = self
            .generator
            .lock()
            .generate(parent_mass, excitation_energy)?;
        let id = event.id;
        self.ctx.queue.push(event)?;
        Ok(id)
    }

    /// Create a standalone field owned by the caller
    pub fn create_field(&self, energy_mev: f64) -> FissionResult<EnergyField> {
        self.check_alive()?;
        self.ctx.fields.create(energy_mev)
    }

    /// Apply dissipation rounds to a caller-owned field
    pub fn dissipate_field(&self, field: &mut EnergyField, rounds: u32) -> DissipationReport {
        let report = dissipate(field, rounds, &self.config);
        self.ctx.state.record_skipped_rounds(report.rounds_skipped);
        report
    }

    /// Start continuous generation at `rate_per_sec` events per second
    ///
    /// Idempotent: starting while already running only updates the rate
    /// and logs a warning.
    pub fn start_continuous(&self, rate_per_sec: f64) -> FissionResult<()> {
        self.check_alive()?;
        if !rate_per_sec.is_finite() || rate_per_sec <= 0.0 {
            return Err(FissionError::InvalidRate(rate_per_sec));
        }
        self.rate.set(rate_per_sec);

        if self.running.swap(true, Ordering::AcqRel) {
            warn!(rate_per_sec, "continuous mode already running");
            return Ok(());
        }

        let spawn = std::thread::Builder::new()
            .name("fissim-continuous".into())
            .spawn({
                let config = self.config.clone();
                let generator =
                    EventGenerator::with_ids(self.config.clone(), Arc::clone(&self.event_ids));
                let queue = Arc::clone(&self.ctx.queue);
                let rate = Arc::clone(&self.rate);
                let running = Arc::clone(&self.running);
                move || generator_loop(config, generator, queue, rate, running)
            });
        match spawn {
            Ok(handle) => {
                *self.continuous.lock() = Some(handle);
                info!(rate_per_sec, "continuous mode started");
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                Err(FissionError::WorkerSpawn(e))
            }
        }
    }

    /// Stop continuous generation; a no-op when not running
    pub fn stop_continuous(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(handle) = self.continuous.lock().take() {
            let _ = handle.join();
        }
        info!("continuous mode stopped");
    }

    /// Change the continuous-mode target rate at runtime
    pub fn set_rate(&self, rate_per_sec: f64) -> FissionResult<()> {
        if !rate_per_sec.is_finite() || rate_per_sec <= 0.0 {
            return Err(FissionError::InvalidRate(rate_per_sec));
        }
        self.rate.set(rate_per_sec);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run continuous mode at `rate_per_sec` for `duration`, then stop
    pub fn run_for(&self, duration: Duration, rate_per_sec: f64) -> FissionResult<()> {
        self.start_continuous(rate_per_sec)?;
        std::thread::sleep(duration);
        self.stop_continuous();
        Ok(())
    }

    /// One dissipation sweep over all live fields
    pub fn sweep_fields(&self, rounds: u32) -> SweepReport {
        self.ctx.state.sweep(rounds, &self.config)
    }

    /// Point-in-time throughput and resource snapshot
    pub fn current_metrics(&self) -> PerformanceSnapshot {
        let state = &self.ctx.state;
        let total_events = state.total_events();
        let uptime = state.uptime().as_secs_f64();
        let processing = state.processing_secs();

        PerformanceSnapshot {
            total_events,
            events_per_second: if uptime > 0.0 {
                total_events as f64 / uptime
            } else {
                0.0
            },
            average_processing_ms: if total_events > 0 {
                processing * 1000.0 / total_events as f64
            } else {
                0.0
            },
            active_fields: state.active_fields(),
            total_fields_created: state.total_fields_created(),
            current_memory_mb: bytes_to_mb(state.current_bytes()),
            peak_memory_mb: bytes_to_mb(state.peak_bytes()),
            cpu_cycles_billions: state.total_cycles() as f64 / 1.0e9,
            total_energy_mev: state.total_energy_mev(),
            allocation_failures: self.ctx.fields.alloc_failures(),
            skipped_rounds: state.skipped_rounds(),
            continuous_mode: self.is_running(),
            uptime_seconds: uptime,
        }
    }

    /// Statistics export with a fixed key set
    pub fn statistics_json(&self) -> String {
        let m = self.current_metrics();
        serde_json::json!({
            "total_events": m.total_events,
            "active_fields": m.active_fields,
            "total_fields_created": m.total_fields_created,
            "total_energy_mev": m.total_energy_mev,
            "peak_memory_mb": m.peak_memory_mb,
            "current_memory_mb": m.current_memory_mb,
            "cpu_cycles_billions": m.cpu_cycles_billions,
            "continuous_mode": m.continuous_mode,
            "events_per_second": m.events_per_second,
        })
        .to_string()
    }

    pub fn allocation_failures(&self) -> u64 {
        self.ctx.fields.alloc_failures()
    }

    pub fn skipped_rounds(&self) -> u64 {
        self.ctx.state.skipped_rounds()
    }

    /// Stop everything and join every thread; safe to call twice
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return;
        }
        self.stop_continuous();
        self.ctx.shutdown.store(true, Ordering::Release);
        self.ctx.queue.close();
        for handle in self.workers.lock().drain(..) {
            let _ = handle.join();
        }
        self.ctx.state.clear();
        info!("engine shut down");
    }
}

impl Drop for FissionEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
