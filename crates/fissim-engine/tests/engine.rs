//! End-to-end tests for the engine facade

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use fissim_core::{EngineConfig, FissionEvent};
use fissim_engine::{EventSink, FissionEngine, NullSink};

struct CountingSink(AtomicUsize);

impl EventSink for CountingSink {
    fn record(&self, _event: &FissionEvent) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

fn engine() -> FissionEngine {
    FissionEngine::with_sink(EngineConfig::small(), Arc::new(NullSink)).unwrap()
}

fn wait_for(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    done()
}

#[test]
fn queue_drains_with_live_workers() {
    let engine = engine();
    for _ in 0..20 {
        engine.enqueue_event(235.0, 6.5).unwrap();
    }

    assert!(
        wait_for(Duration::from_secs(5), || {
            engine.current_metrics().total_events == 20
        }),
        "workers did not drain the queue"
    );
    let m = engine.current_metrics();
    assert_eq!(m.total_fields_created, 60);
    assert!(m.current_memory_mb > 0.0);
    assert!(m.peak_memory_mb >= m.current_memory_mb);
}

#[test]
fn sink_sees_every_event() {
    let sink = Arc::new(CountingSink(AtomicUsize::new(0)));
    let engine =
        FissionEngine::with_sink(EngineConfig::small(), Arc::clone(&sink) as Arc<dyn EventSink>)
            .unwrap();

    engine.simulate_event(235.0, 6.5).unwrap();
    for _ in 0..10 {
        engine.enqueue_event(238.0, 4.0).unwrap();
    }
    assert!(wait_for(Duration::from_secs(5), || {
        sink.0.load(Ordering::Relaxed) == 11
    }));
}

#[test]
fn continuous_mode_approximates_target_rate() {
    let engine = engine();
    // Pre-populate live fields so pacing is measured under buffer load;
    // sweeping those buffers must not slow the emit tick
    for _ in 0..10 {
        engine.simulate_event(235.0, 6.5).unwrap();
    }
    assert_eq!(engine.current_metrics().active_fields, 30);

    engine.start_continuous(50.0).unwrap();
    assert!(engine.is_running());
    std::thread::sleep(Duration::from_secs(1));
    engine.stop_continuous();
    assert!(!engine.is_running());

    // ~50 more expected on top of the 10 seeds; generous bounds for
    // loaded CI machines
    let produced = wait_for(Duration::from_secs(2), || {
        engine.current_metrics().total_events >= 30
    });
    assert!(produced, "continuous mode produced too few events");
    assert!(engine.current_metrics().total_events <= 120);
}

#[test]
fn start_continuous_twice_is_idempotent() {
    let engine = engine();
    engine.start_continuous(20.0).unwrap();
    engine.start_continuous(40.0).unwrap();
    assert!(engine.is_running());
    engine.stop_continuous();
    engine.stop_continuous();
    assert!(!engine.is_running());
}

#[test]
fn run_for_produces_and_stops() {
    let engine = engine();
    engine
        .run_for(Duration::from_millis(400), 50.0)
        .unwrap();
    assert!(!engine.is_running());
    assert!(wait_for(Duration::from_secs(2), || {
        engine.current_metrics().total_events >= 3
    }));
}

#[test]
fn sweep_decays_and_eventually_removes_fields() {
    let engine = engine();
    engine.simulate_event(235.0, 6.5).unwrap();
    assert_eq!(engine.current_metrics().active_fields, 3);

    let report = engine.sweep_fields(4);
    assert_eq!(report.fields_swept, 3);
    assert!(report.energy_released > 0.0);

    // Round cap prevents full depletion, so fields stay live
    engine.sweep_fields(1000);
    assert_eq!(engine.current_metrics().active_fields, 3);
}

#[test]
fn shutdown_clears_state_and_rejects_work() {
    let engine = engine();
    engine.simulate_event(235.0, 6.5).unwrap();
    engine.start_continuous(20.0).unwrap();
    engine.shutdown();

    assert!(!engine.is_running());
    let m = engine.current_metrics();
    assert_eq!(m.active_fields, 0);
    assert_eq!(m.current_memory_mb, 0.0);
    assert!(engine.enqueue_event(235.0, 6.5).is_err());
    assert!(engine.create_field(10.0).is_err());
}

#[test]
fn rate_change_takes_effect_without_restart() {
    let engine = engine();
    engine.start_continuous(5.0).unwrap();
    engine.set_rate(200.0).unwrap();
    std::thread::sleep(Duration::from_millis(500));
    engine.stop_continuous();

    // At the original 5/sec only ~2 events fit in half a second
    assert!(wait_for(Duration::from_secs(2), || {
        engine.current_metrics().total_events > 10
    }));
}

#[test]
fn event_ids_unique_across_paths() {
    let engine = engine();
    let a = engine.simulate_event(235.0, 6.5).unwrap();
    let queued = engine.enqueue_event(235.0, 6.5).unwrap();
    let b = engine.simulate_event(235.0, 6.5).unwrap();

    assert_ne!(a.id, b.id);
    assert_ne!(a.id, queued);
    assert_ne!(b.id, queued);
}
