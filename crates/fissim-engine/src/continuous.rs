//! Continuous generation at a target rate
//!
//! One background thread paces event production by polling: short sleeps
//! bound CPU cost, and the target rate is re-read from its atomic every
//! tick so runtime changes take effect on the next cycle without a
//! restart. The tick only generates, pushes, and resets its clock; field
//! dissipation runs on the engine's sweeper thread so emit pacing never
//! depends on how many fields are live.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use fissim_core::EngineConfig;
use fissim_physics::EventGenerator;

use crate::queue::EventQueue;

/// Shared handle to the continuous generator's target rate
pub struct RateControl {
    bits: AtomicU64,
}

impl RateControl {
    pub fn new(rate_per_sec: f64) -> Self {
        RateControl {
            bits: AtomicU64::new(rate_per_sec.to_bits()),
        }
    }

    pub fn set(&self, rate_per_sec: f64) {
        self.bits.store(rate_per_sec.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// Body of the continuous generator thread
pub fn generator_loop(
    config: EngineConfig,
    mut generator: EventGenerator,
    queue: Arc<EventQueue>,
    rate: Arc<RateControl>,
    running: Arc<AtomicBool>,
) {
    debug!("continuous generator started");
    let mut last_emit = Instant::now();

    while running.load(Ordering::Acquire) {
        let rate_per_sec = rate.get();
        let interval = 1.0 / rate_per_sec;

        if last_emit.elapsed().as_secs_f64() >= interval {
            match generator.generate_default() {
                Ok(event) => {
                    if queue.push(event).is_err() {
                        // Queue closed underneath us; shutdown is in progress
                        break;
                    }
                    last_emit = Instant::now();
                }
                Err(e) => warn!(error = %e, "continuous generation failed"),
            }
        }

        std::thread::sleep(config.poll_interval);
    }
    debug!("continuous generator stopped");
}
