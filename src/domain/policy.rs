//! The rolling-window admission policy.
//!
//! This module holds the pure decision rule: given the current time, decide
//! whether one more signal fits inside the rolling rate-limit window. The
//! policy is not synchronized; `RateGate` wraps it in a lock.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// Window length used unless one is configured explicitly.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Decision made for a single signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// The signal may proceed; its timestamp now counts against the limit.
    Admit,
    /// The signal is rejected.
    Deny {
        /// Whether this call reclaimed a stale entry from the window.
        ///
        /// Eviction never turns the decision into an admission; the freed
        /// slot is only visible to the next signal.
        evicted: bool,
    },
}

impl AdmissionDecision {
    /// Check if this decision is Admit.
    pub fn is_admit(&self) -> bool {
        matches!(self, AdmissionDecision::Admit)
    }

    /// Check if this decision is Deny.
    pub fn is_deny(&self) -> bool {
        !self.is_admit()
    }
}

/// Error returned when a policy is configured with invalid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// The window duration must be non-zero
    ZeroWindow,
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::ZeroWindow => {
                write!(f, "window duration must be greater than zero")
            }
        }
    }
}

impl std::error::Error for PolicyError {}

/// Rolling-window admission policy.
///
/// Tracks the timestamps of recent admissions, oldest first. A signal is
/// admitted while the record holds at most `capacity` entries; the boundary
/// is inclusive, so up to `capacity + 1` timestamps accumulate before
/// denials begin. That inclusive threshold defines the admission rate and
/// is relied upon by callers.
///
/// On the deny path, a single entry older than the window is evicted, but
/// the denial stands. Expiry is checked lazily, only when a signal is
/// denied, so entries may linger past the window between calls.
///
/// # Example
/// ```
/// use signal_gate::{AdmissionDecision, WindowPolicy};
/// use std::time::{Duration, Instant};
///
/// let mut policy = WindowPolicy::new(2, Duration::from_secs(60)).unwrap();
/// let now = Instant::now();
///
/// // Inclusive threshold: capacity 2 admits three signals.
/// assert!(policy.register_signal(now).is_admit());
/// assert!(policy.register_signal(now).is_admit());
/// assert!(policy.register_signal(now).is_admit());
///
/// // The fourth is denied and nothing is evicted this early.
/// assert_eq!(
///     policy.register_signal(now),
///     AdmissionDecision::Deny { evicted: false }
/// );
/// assert_eq!(policy.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct WindowPolicy {
    capacity: usize,
    window: Duration,
    admitted: VecDeque<Instant>,
}

impl WindowPolicy {
    /// Create a policy with an explicit window length.
    ///
    /// # Arguments
    /// * `capacity` - Number of admissions tolerated inside the window
    /// * `window` - Age beyond which a recorded admission may be evicted
    pub fn new(capacity: usize, window: Duration) -> Result<Self, PolicyError> {
        if window.is_zero() {
            return Err(PolicyError::ZeroWindow);
        }
        Ok(Self {
            capacity,
            window,
            admitted: VecDeque::new(),
        })
    }

    /// Create a policy with the default 60-second window.
    pub fn with_default_window(capacity: usize) -> Self {
        Self {
            capacity,
            window: DEFAULT_WINDOW,
            admitted: VecDeque::new(),
        }
    }

    /// Register one signal at `now` and decide whether it may proceed.
    ///
    /// Admission appends `now` at the tail of the record. Denial inspects
    /// the oldest entry and removes it if it has aged past the window; at
    /// most one entry is reclaimed per call, and the call is denied either
    /// way.
    pub fn register_signal(&mut self, now: Instant) -> AdmissionDecision {
        if self.admitted.len() <= self.capacity {
            self.admitted.push_back(now);
            return AdmissionDecision::Admit;
        }

        let mut evicted = false;
        if let Some(&oldest) = self.admitted.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                self.admitted.pop_front();
                evicted = true;
            }
        }
        AdmissionDecision::Deny { evicted }
    }

    /// Number of admissions currently counted against the limit.
    pub fn len(&self) -> usize {
        self.admitted.len()
    }

    /// Check if no admissions are currently recorded.
    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty()
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The configured window length.
    pub fn window(&self) -> Duration {
        self.window
    }
}
