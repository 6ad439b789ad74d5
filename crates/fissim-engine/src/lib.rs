//! Fissim Engine - Concurrent simulation core
//!
//! This crate assembles the physics and field layers into a running
//! system:
//! - A FIFO event queue with condition-variable handoff
//! - A fixed-size worker pool draining the queue
//! - A continuous generator pacing events at a runtime-adjustable rate
//! - Shared aggregate state behind one coarse lock plus atomic counters
//! - The `FissionEngine` facade that external callers consume

pub mod continuous;
pub mod engine;
pub mod metrics;
pub mod queue;
pub mod sink;
pub mod state;
pub mod worker;

pub use engine::FissionEngine;
pub use metrics::PerformanceSnapshot;
pub use queue::EventQueue;
pub use sink::{EventSink, NullSink, TracingSink};
pub use state::{SharedState, SweepReport};
