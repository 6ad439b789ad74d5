//! FIFO event queue shared between producers and the worker pool
//!
//! Push order is FIFO; completion order across workers is not. Workers
//! wait with a timeout so they observe the shutdown flag even when no
//! wakeup arrives.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use fissim_core::{FissionError, FissionEvent, FissionResult};

/// Bounded-wait FIFO queue for generated events
pub struct EventQueue {
    inner: Mutex<VecDeque<FissionEvent>>,
    available: Condvar,
    closed: AtomicBool,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue {
            inner: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Enqueue one event and wake one waiting worker
    pub fn push(&self, event: FissionEvent) -> FissionResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(FissionError::EngineShutDown);
        }
        self.inner.lock().push_back(event);
        self.available.notify_one();
        Ok(())
    }

    /// Pop the head event, waiting up to `timeout` for one to arrive
    ///
    /// Returns `None` on timeout with an empty queue, or immediately once
    /// the queue is closed and drained.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<FissionEvent> {
        let mut queue = self.inner.lock();
        loop {
            if let Some(event) = queue.pop_front() {
                return Some(event);
            }
            if self.closed.load(Ordering::Acquire) {
                return None;
            }
            if self.available.wait_for(&mut queue, timeout).timed_out() {
                return queue.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Reject further pushes and wake every waiter
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.available.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
