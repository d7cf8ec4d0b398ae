//! # signal-gate
//!
//! A thread-safe admission gate with a rolling 60-second rate-limit window.
//!
//! Any number of producers share one [`RateGate`] and concurrently ask it
//! whether a signal may proceed. The gate keeps an insertion-ordered record
//! of recent admission timestamps and answers with a plain boolean; the
//! whole decision executes as a single critical section, so concurrent
//! callers can never double-spend the last free slot.
//!
//! ## Quick Start
//!
//! ```
//! use signal_gate::RateGate;
//! use std::sync::Arc;
//! use std::thread;
//!
//! // Up to 100 admissions may coexist inside the rolling window.
//! let gate = Arc::new(RateGate::new(100));
//!
//! let producers: Vec<_> = (0..3)
//!     .map(|_| {
//!         let gate = Arc::clone(&gate);
//!         thread::spawn(move || (0..10).filter(|_| gate.try_admit()).count())
//!     })
//!     .collect();
//!
//! let admitted: usize = producers.into_iter().map(|p| p.join().unwrap()).sum();
//! assert_eq!(admitted, 30); // well below capacity, everything passes
//! ```
//!
//! ## How the gate decides
//!
//! Each call to [`RateGate::try_admit`] takes one of two paths:
//!
//! - While the window holds **at most** `capacity` timestamps, the signal is
//!   admitted and its timestamp appended. The boundary is inclusive, so the
//!   window accumulates up to `capacity + 1` entries before denials begin;
//!   that inclusive threshold is the defined admission rate.
//! - Otherwise the signal is denied. If the oldest recorded admission has
//!   aged out of the window (60 seconds by default), that single entry is
//!   evicted, but the denial stands. Eviction and admission never combine
//!   in one call; the freed slot is only usable by the *next* signal.
//!
//! ## Configuration
//!
//! [`RateGate::new`] covers the common case: a fixed capacity, the default
//! 60-second window, and the system clock. The builder exposes the rest:
//!
//! ```
//! use signal_gate::RateGate;
//! use std::time::Duration;
//!
//! let gate = RateGate::builder()
//!     .with_capacity(500)
//!     .with_window(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! assert_eq!(gate.capacity(), 500);
//! ```
//!
//! All configuration is fixed at construction; there is no reconfiguration
//! while the gate is live.
//!
//! ## Observability
//!
//! The gate emits `trace`-level [`tracing`] events per decision and a
//! `debug` event per eviction, and keeps atomic counters queryable at any
//! time:
//!
//! ```
//! # use signal_gate::RateGate;
//! let gate = RateGate::new(2);
//! for _ in 0..5 {
//!     gate.try_admit();
//! }
//!
//! let snapshot = gate.metrics().snapshot();
//! assert_eq!(snapshot.signals_admitted, 3);
//! assert_eq!(snapshot.signals_denied, 2);
//! ```
//!
//! ## Testing with a mock clock
//!
//! Time is consumed through the [`Clock`] port. Enable the `test-helpers`
//! feature to drive the window deterministically from tests:
//!
//! ```toml
//! [dev-dependencies]
//! signal-gate = { version = "*", features = ["test-helpers"] }
//! ```

// Domain layer - pure decision logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::policy::{AdmissionDecision, PolicyError, WindowPolicy, DEFAULT_WINDOW};

pub use application::{
    gate::{BuildError, RateGate, RateGateBuilder},
    metrics::{GateMetrics, MetricsSnapshot},
    ports::Clock,
};

pub use infrastructure::clock::SystemClock;
