//! Demo driver: several producer threads sharing one admission gate.
//!
//! Spawns a handful of producers that each present a fixed number of
//! signals with randomized inter-signal delays, then reports how many were
//! admitted versus attempted.
//!
//! Run with:
//! ```text
//! cargo run --example producers
//! ```

use rand::Rng;
use signal_gate::RateGate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const PRODUCERS: usize = 3;
const SIGNALS_PER_PRODUCER: usize = 100;
const CAPACITY: usize = 100;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let gate = Arc::new(RateGate::new(CAPACITY));
    let total_admitted = Arc::new(AtomicU64::new(0));

    println!("=== Admission Gate Demo ===\n");
    println!(
        "{} producers x {} signals against capacity {} in a {:?} window\n",
        PRODUCERS,
        SIGNALS_PER_PRODUCER,
        CAPACITY,
        gate.window()
    );

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|id| {
            let gate = Arc::clone(&gate);
            let total_admitted = Arc::clone(&total_admitted);
            thread::spawn(move || {
                let mut rng = rand::thread_rng();
                for _ in 0..SIGNALS_PER_PRODUCER {
                    if gate.try_admit() {
                        total_admitted.fetch_add(1, Ordering::Relaxed);
                    }
                    thread::sleep(Duration::from_millis(rng.gen_range(0..20)));
                }
                tracing::info!(producer = id, "producer finished");
            })
        })
        .collect();

    for producer in producers {
        producer.join().expect("producer thread panicked");
    }

    let attempted = (PRODUCERS * SIGNALS_PER_PRODUCER) as u64;
    let snapshot = gate.metrics().snapshot();

    println!(
        "\ngate admitted {} of {} signals ({:.1}% denied, {} stale entries evicted)",
        total_admitted.load(Ordering::Relaxed),
        attempted,
        snapshot.denial_rate() * 100.0,
        snapshot.entries_evicted,
    );
}
