//! End-to-end admission behavior through the public API.

use signal_gate::infrastructure::mocks::MockClock;
use signal_gate::RateGate;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn gate_with_clock(capacity: usize, clock: Arc<MockClock>) -> RateGate {
    RateGate::builder()
        .with_capacity(capacity)
        .with_clock(clock)
        .build()
        .unwrap()
}

#[test]
fn test_fresh_gate_admits_first_capacity_plus_one_calls() {
    let clock = Arc::new(MockClock::new(Instant::now()));
    let gate = gate_with_clock(5, clock);

    for _ in 0..6 {
        assert!(gate.try_admit());
    }
    assert!(!gate.try_admit());
    assert_eq!(gate.len(), 6);
}

#[test]
fn test_denial_inside_window_leaves_window_length_unchanged() {
    let clock = Arc::new(MockClock::new(Instant::now()));
    let gate = gate_with_clock(2, clock.clone());

    for _ in 0..3 {
        assert!(gate.try_admit());
    }

    clock.advance(Duration::from_millis(59_999));
    assert!(!gate.try_admit());
    assert_eq!(gate.len(), 3);
}

#[test]
fn test_stale_head_evicted_but_call_still_denied() {
    let clock = Arc::new(MockClock::new(Instant::now()));
    let gate = gate_with_clock(2, clock.clone());

    for _ in 0..3 {
        assert!(gate.try_admit());
    }

    clock.advance(Duration::from_millis(60_000));
    assert!(!gate.try_admit());
    assert_eq!(gate.len(), 2);

    // The freed slot belongs to the next call.
    assert!(gate.try_admit());
}

#[test]
fn test_worked_example_timeline() {
    // Replay of the millisecond timeline, deriving every expectation from
    // the admission rule: capacity 2, signals at t=0,1,2,3 then t=60001
    // and t=60002.
    let clock = Arc::new(MockClock::new(Instant::now()));
    let gate = gate_with_clock(2, clock.clone());

    assert!(gate.try_admit()); // t=0, size 0 <= 2
    clock.advance(Duration::from_millis(1));
    assert!(gate.try_admit()); // t=1, size 1 <= 2
    clock.advance(Duration::from_millis(1));
    assert!(gate.try_admit()); // t=2, size 2 <= 2
    clock.advance(Duration::from_millis(1));
    assert!(!gate.try_admit()); // t=3, size 3 > 2, head age 3ms, no eviction
    assert_eq!(gate.len(), 3);

    clock.advance(Duration::from_millis(59_998));
    assert!(!gate.try_admit()); // t=60001, head age >= 60s, evicts t=0, still denied
    assert_eq!(gate.len(), 2);

    clock.advance(Duration::from_millis(1));
    assert!(gate.try_admit()); // t=60002, size 2 <= 2
    assert_eq!(gate.len(), 3);
}

#[test]
fn test_each_denied_call_reclaims_at_most_one_entry() {
    let clock = Arc::new(MockClock::new(Instant::now()));
    let gate = gate_with_clock(2, clock.clone());

    for _ in 0..3 {
        assert!(gate.try_admit());
    }

    // All three recorded admissions age out at once, but denials reclaim
    // them one at a time, alternating with admissions into freed slots.
    clock.advance(Duration::from_secs(120));
    assert!(!gate.try_admit());
    assert_eq!(gate.len(), 2);
    assert!(gate.try_admit());
    assert_eq!(gate.len(), 3);
    assert!(!gate.try_admit());
    assert_eq!(gate.len(), 2);
    assert!(gate.try_admit());
}

#[test]
fn test_metrics_reflect_gate_activity() {
    let clock = Arc::new(MockClock::new(Instant::now()));
    let gate = gate_with_clock(1, clock.clone());

    assert!(gate.try_admit());
    assert!(gate.try_admit());
    assert!(!gate.try_admit());
    assert!(!gate.try_admit());

    clock.advance(Duration::from_secs(61));
    assert!(!gate.try_admit()); // evicts one stale entry

    let snapshot = gate.metrics().snapshot();
    assert_eq!(snapshot.signals_admitted, 2);
    assert_eq!(snapshot.signals_denied, 3);
    assert_eq!(snapshot.entries_evicted, 1);
    assert!((snapshot.denial_rate() - 0.6).abs() < f64::EPSILON);
}

#[test]
fn test_default_window_is_sixty_seconds() {
    let gate = RateGate::new(10);
    assert_eq!(gate.window(), Duration::from_secs(60));
}

#[test]
fn test_builder_rejects_zero_window() {
    use signal_gate::{BuildError, PolicyError};

    let result = RateGate::builder()
        .with_capacity(10)
        .with_window(Duration::ZERO)
        .build();
    assert_eq!(
        result.unwrap_err(),
        BuildError::Policy(PolicyError::ZeroWindow)
    );
}

#[test]
fn test_custom_window_length_is_honored() {
    let clock = Arc::new(MockClock::new(Instant::now()));
    let gate = RateGate::builder()
        .with_capacity(0)
        .with_window(Duration::from_secs(5))
        .with_clock(clock.clone())
        .build()
        .unwrap();

    assert!(gate.try_admit());
    assert!(!gate.try_admit());

    clock.advance(Duration::from_secs(5));
    assert!(!gate.try_admit()); // evicts at the 5s boundary
    assert!(gate.try_admit());
}
