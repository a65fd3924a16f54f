//! Circuit breaker for primary upstream protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: primary assumed down, calls fail fast
//! - Half-Open: testing if the primary recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: consecutive_failures >= fail_threshold
//! Open → Half-Open: first admission attempt after reset_timeout
//! Half-Open → Closed: trial call succeeds
//! Half-Open → Open: trial call fails
//! ```
//!
//! # Design Decisions
//! - Fail fast in Open state (no waiting for timeout)
//! - Single trial call in Half-Open (prevents hammering a recovering
//!   upstream); concurrent callers are rejected until the trial settles
//! - State lives behind a mutex; admission and accounting are separate
//!   calls, so more than `fail_threshold` in-flight requests can all
//!   fail concurrently; that is accepted, a lost Open transition is not
//! - `*_at(now)` variants take an explicit clock so tests can drive the
//!   state machine without sleeping

use std::sync::Mutex;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Default number of consecutive failures before the breaker opens.
pub const DEFAULT_FAIL_THRESHOLD: u32 = 3;

/// Default cooldown before an open breaker admits a trial call.
pub const DEFAULT_RESET_TIMEOUT: Duration = Duration::from_secs(10);

/// Rejection returned while the breaker is open.
#[derive(Debug, Error)]
#[error("circuit breaker is open; primary call rejected")]
pub struct BreakerOpen;

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

struct Inner {
    state: BreakerState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
}

/// Consecutive-failure circuit breaker.
///
/// Invariant: `state == Open` implies
/// `consecutive_failures >= fail_threshold`.
pub struct CircuitBreaker {
    fail_threshold: u32,
    reset_timeout: Duration,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(fail_threshold: u32, reset_timeout: Duration) -> Self {
        Self {
            fail_threshold,
            reset_timeout,
            inner: Mutex::new(Inner {
                state: BreakerState::Closed,
                consecutive_failures: 0,
                opened_at: None,
            }),
        }
    }

    /// Ask for admission before calling the primary upstream.
    ///
    /// While open, returns `Err(BreakerOpen)` until the reset timeout
    /// elapses; the first admission after that transitions to half-open
    /// and lets exactly one trial call through.
    pub fn check(&self) -> Result<(), BreakerOpen> {
        self.check_at(Instant::now())
    }

    pub fn check_at(&self, now: Instant) -> Result<(), BreakerOpen> {
        let mut inner = self.lock();
        match inner.state {
            BreakerState::Closed => Ok(()),
            BreakerState::Open => {
                let elapsed = inner.opened_at.map(|t| now.duration_since(t));
                if elapsed.is_some_and(|e| e >= self.reset_timeout) {
                    inner.state = BreakerState::HalfOpen;
                    tracing::info!("Circuit breaker half-open; admitting trial call");
                    Ok(())
                } else {
                    Err(BreakerOpen)
                }
            }
            // A trial is already in flight.
            BreakerState::HalfOpen => Err(BreakerOpen),
        }
    }

    /// Record a successful (or non-5xx) primary call.
    pub fn on_success(&self) {
        let mut inner = self.lock();
        if inner.state != BreakerState::Closed {
            tracing::info!("Circuit breaker closed after successful trial");
        }
        inner.state = BreakerState::Closed;
        inner.consecutive_failures = 0;
        inner.opened_at = None;
    }

    /// Record a breaker-classified failure (transport error, timeout,
    /// or 5xx response).
    pub fn on_failure(&self) {
        self.on_failure_at(Instant::now())
    }

    pub fn on_failure_at(&self, now: Instant) {
        let mut inner = self.lock();
        match inner.state {
            BreakerState::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.fail_threshold {
                    inner.state = BreakerState::Open;
                    inner.opened_at = Some(now);
                    tracing::warn!(
                        consecutive_failures = inner.consecutive_failures,
                        reset_timeout_secs = self.reset_timeout.as_secs(),
                        "Circuit breaker opened"
                    );
                }
            }
            BreakerState::HalfOpen => {
                inner.state = BreakerState::Open;
                inner.opened_at = Some(now);
                tracing::warn!("Trial call failed; circuit breaker re-opened");
            }
            BreakerState::Open => {
                // A call admitted before the transition finished; the
                // cooldown window is not extended.
                inner.consecutive_failures += 1;
            }
        }
    }

    pub fn state(&self) -> BreakerState {
        self.lock().state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.lock().consecutive_failures
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(DEFAULT_FAIL_THRESHOLD, DEFAULT_RESET_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker() -> CircuitBreaker {
        CircuitBreaker::new(3, Duration::from_secs(10))
    }

    #[test]
    fn test_success_resets_failure_count() {
        let b = breaker();
        b.on_failure();
        b.on_failure();
        assert_eq!(b.consecutive_failures(), 2);
        assert_eq!(b.state(), BreakerState::Closed);

        b.on_success();
        assert_eq!(b.consecutive_failures(), 0);

        // A fresh streak is needed to open after a success.
        b.on_failure();
        b.on_failure();
        assert_eq!(b.state(), BreakerState::Closed);
    }

    #[test]
    fn test_opens_at_threshold() {
        let b = breaker();
        let t0 = Instant::now();
        for _ in 0..3 {
            assert!(b.check_at(t0).is_ok());
            b.on_failure_at(t0);
        }
        assert_eq!(b.state(), BreakerState::Open);
        assert!(b.consecutive_failures() >= 3);
        assert!(b.check_at(t0).is_err());
    }

    #[test]
    fn test_rejects_until_reset_timeout() {
        let b = breaker();
        let t0 = Instant::now();
        for _ in 0..3 {
            b.on_failure_at(t0);
        }

        assert!(b.check_at(t0 + Duration::from_secs(9)).is_err());
        // First admission after the timeout is the half-open trial.
        assert!(b.check_at(t0 + Duration::from_secs(10)).is_ok());
        assert_eq!(b.state(), BreakerState::HalfOpen);
    }

    #[test]
    fn test_half_open_admits_single_trial() {
        let b = breaker();
        let t0 = Instant::now();
        for _ in 0..3 {
            b.on_failure_at(t0);
        }

        let t1 = t0 + Duration::from_secs(11);
        assert!(b.check_at(t1).is_ok());
        // Concurrent callers are rejected while the trial is in flight.
        assert!(b.check_at(t1).is_err());
        assert!(b.check_at(t1 + Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_trial_success_closes() {
        let b = breaker();
        let t0 = Instant::now();
        for _ in 0..3 {
            b.on_failure_at(t0);
        }
        assert!(b.check_at(t0 + Duration::from_secs(10)).is_ok());

        b.on_success();
        assert_eq!(b.state(), BreakerState::Closed);
        assert_eq!(b.consecutive_failures(), 0);
        assert!(b.check().is_ok());
    }

    #[test]
    fn test_trial_failure_reopens_with_fresh_cooldown() {
        let b = breaker();
        let t0 = Instant::now();
        for _ in 0..3 {
            b.on_failure_at(t0);
        }

        let t1 = t0 + Duration::from_secs(10);
        assert!(b.check_at(t1).is_ok());
        b.on_failure_at(t1);
        assert_eq!(b.state(), BreakerState::Open);

        // Cooldown restarts from the trial failure, not the first open.
        assert!(b.check_at(t1 + Duration::from_secs(9)).is_err());
        assert!(b.check_at(t1 + Duration::from_secs(10)).is_ok());
    }
}
