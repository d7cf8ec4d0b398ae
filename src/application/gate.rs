//! The shared admission gate.
//!
//! The gate is the single decision point that concurrent producers share.
//! Each call runs the whole decision as one critical section so callers
//! always observe a consistent window.

use crate::application::metrics::GateMetrics;
use crate::application::ports::Clock;
use crate::domain::policy::{AdmissionDecision, PolicyError, WindowPolicy, DEFAULT_WINDOW};
use crate::infrastructure::clock::SystemClock;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, trace};

/// Error returned when building a `RateGate` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Policy configuration validation failed
    Policy(PolicyError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Policy(e) => {
                write!(f, "policy configuration error: {}", e)
            }
        }
    }
}

impl std::error::Error for BuildError {}

impl From<PolicyError> for BuildError {
    fn from(e: PolicyError) -> Self {
        BuildError::Policy(e)
    }
}

/// A thread-safe admission gate over a rolling rate-limit window.
///
/// One `RateGate` is created with a fixed capacity and shared by reference
/// (typically via `Arc`) among all producers for the life of the process.
/// [`try_admit`](RateGate::try_admit) may be called concurrently from any
/// number of threads.
///
/// # Example
///
/// ```
/// use signal_gate::RateGate;
/// use std::sync::Arc;
/// use std::thread;
///
/// let gate = Arc::new(RateGate::new(8));
///
/// let workers: Vec<_> = (0..4)
///     .map(|_| {
///         let gate = Arc::clone(&gate);
///         thread::spawn(move || (0..5).filter(|_| gate.try_admit()).count())
///     })
///     .collect();
///
/// let admitted: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
/// // 20 rapid signals against capacity 8: exactly the inclusive
/// // threshold's worth get through.
/// assert_eq!(admitted, 9);
/// ```
#[derive(Debug)]
pub struct RateGate {
    window: Mutex<WindowPolicy>,
    clock: Arc<dyn Clock>,
    metrics: GateMetrics,
}

impl RateGate {
    /// Create a gate with the given capacity, the default 60-second window,
    /// and the system clock.
    ///
    /// `capacity` is the number of admissions tolerated to coexist inside
    /// the rolling window. Construction is infallible; the capacity type
    /// rules out negative values and the default window is non-zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            window: Mutex::new(WindowPolicy::with_default_window(capacity)),
            clock: Arc::new(SystemClock::new()),
            metrics: GateMetrics::new(),
        }
    }

    /// Start building a gate with a custom window or clock.
    pub fn builder() -> RateGateBuilder {
        RateGateBuilder::new()
    }

    /// Decide whether one signal may proceed right now.
    ///
    /// Returns `true` if the signal was admitted and its timestamp recorded
    /// against the limit, `false` if it was denied. A denied call may also
    /// evict one stale entry from the window; the freed slot only becomes
    /// usable by the next call.
    ///
    /// The size read, the append, and the head inspection must observe one
    /// consistent view of the window, so the whole decision runs under the
    /// gate's lock. Blocking is bounded by that lock; the critical section
    /// performs no I/O and never waits on other callers' progress.
    pub fn try_admit(&self) -> bool {
        let decision = {
            let mut window = self.lock_window();
            // Reading the clock inside the critical section keeps the
            // recorded timestamps ordered oldest-first.
            let now = self.clock.now();
            window.register_signal(now)
        };

        match decision {
            AdmissionDecision::Admit => self.metrics.record_admitted(),
            AdmissionDecision::Deny { evicted } => {
                self.metrics.record_denied();
                if evicted {
                    self.metrics.record_eviction();
                    debug!("stale admission evicted from window");
                }
            }
        }
        trace!(admitted = decision.is_admit(), "signal decision");

        decision.is_admit()
    }

    /// Number of admissions currently counted against the limit.
    pub fn len(&self) -> usize {
        self.lock_window().len()
    }

    /// Check if no admissions are currently recorded.
    pub fn is_empty(&self) -> bool {
        self.lock_window().is_empty()
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.lock_window().capacity()
    }

    /// The configured window length.
    pub fn window(&self) -> Duration {
        self.lock_window().window()
    }

    /// Get a reference to the gate's metrics.
    pub fn metrics(&self) -> &GateMetrics {
        &self.metrics
    }

    fn lock_window(&self) -> std::sync::MutexGuard<'_, WindowPolicy> {
        // Nothing inside the critical section panics between mutations, so
        // a poisoned lock still guards a coherent window.
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builder for constructing a [`RateGate`].
///
/// Starts from capacity 0 (one admission per window), the default 60-second
/// window, and the system clock.
#[derive(Debug)]
pub struct RateGateBuilder {
    capacity: usize,
    window: Duration,
    clock: Option<Arc<dyn Clock>>,
}

impl RateGateBuilder {
    fn new() -> Self {
        Self {
            capacity: 0,
            window: DEFAULT_WINDOW,
            clock: None,
        }
    }

    /// Set the number of admissions tolerated inside the rolling window.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the window length.
    ///
    /// The value will be validated when `build()` is called; a zero window
    /// is rejected.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Set a custom clock (mainly for testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the gate, validating the configuration.
    pub fn build(self) -> Result<RateGate, BuildError> {
        let policy = WindowPolicy::new(self.capacity, self.window)?;
        Ok(RateGate {
            window: Mutex::new(policy),
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(SystemClock::new())),
            metrics: GateMetrics::new(),
        })
    }
}

impl Default for RateGateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
