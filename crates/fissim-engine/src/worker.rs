//! Worker pool
//!
//! Each worker drains the shared queue: dequeue one event, create one
//! energy field per fragment, log the event, record everything in shared
//! state. Workers wake on the queue condition or on timeout, so the
//! shutdown flag is observed within one `queue_wait` interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use fissim_core::{EngineConfig, FieldId, FissionEvent};
use fissim_field::FieldManager;

use crate::queue::EventQueue;
use crate::sink::EventSink;
use crate::state::SharedState;

/// Everything a worker thread needs, shared across the pool
pub struct WorkerContext {
    pub config: EngineConfig,
    pub queue: Arc<EventQueue>,
    pub state: Arc<SharedState>,
    pub fields: Arc<FieldManager>,
    pub sink: Arc<dyn EventSink>,
    pub shutdown: Arc<AtomicBool>,
}

/// Body of one worker thread; returns when shutdown is observed
pub fn worker_loop(worker_id: usize, ctx: Arc<WorkerContext>) {
    debug!(worker_id, "worker started");
    while !ctx.shutdown.load(Ordering::Acquire) {
        if let Some(event) = ctx.queue.pop_timeout(ctx.config.queue_wait) {
            process_event(&ctx, event);
        }
    }
    debug!(worker_id, "worker stopped");
}

/// Create one field per fragment, log, and record
///
/// Also used by the single-shot facade path so queued and synchronous
/// events go through identical processing. Returns the field id assigned
/// to the event so synchronous callers can see it too.
pub fn process_event(ctx: &WorkerContext, mut event: FissionEvent) -> Option<FieldId> {
    let start = Instant::now();

    let mut fields = Vec::with_capacity(3);
    for fragment in event.fragments() {
        match ctx.fields.create(fragment.kinetic_energy) {
            Ok(field) => fields.push(field),
            Err(e) => warn!(event = %event.id, error = %e, "field creation failed"),
        }
    }
    let field_id = fields.first().map(|f| f.id);
    event.field_id = field_id;

    ctx.sink.record(&event);
    ctx.state.record_event(event, fields, start.elapsed());
    field_id
}
