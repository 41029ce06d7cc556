//! Synchronization primitives for cooperative batch workers.
//!
//! Batch reachability queries fan independent checks out to worker threads. Workers never
//! block on each other; instead they poll two kinds of one-way signals between checks.
//!
//! # Key Components
//!
//! - [`CancellationToken`] - Caller-owned abort signal, optionally tied to a deadline
//! - [`MonotonicFlag`] - A flag that only ever transitions from unset to set
//!
//! # Design Principles
//!
//! - **Monotonic**: once raised, a signal stays raised, so racing writers are idempotent
//! - **Lock-free**: raising and polling are single atomic operations
//! - **Fail-fast**: a raised signal is observed by every worker before its next check

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// A one-way flag shared by the workers of a single batch.
///
/// The flag starts unset and can only be raised. Concurrent calls to
/// [`raise`](MonotonicFlag::raise) are benign: exactly one of them observes the transition,
/// the rest are no-ops.
///
/// # Examples
///
/// ```rust
/// use ontoreach::utils::synchronization::MonotonicFlag;
///
/// let flag = MonotonicFlag::new();
/// assert!(!flag.is_raised());
///
/// assert!(flag.raise());   // first raise performs the transition
/// assert!(!flag.raise());  // later raises are idempotent
/// assert!(flag.is_raised());
/// ```
#[derive(Debug, Default)]
pub struct MonotonicFlag {
    raised: AtomicBool,
}

impl MonotonicFlag {
    /// Creates a new, unset flag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Raises the flag.
    ///
    /// Returns `true` if this call performed the unset-to-set transition.
    pub fn raise(&self) -> bool {
        !self.raised.swap(true, Ordering::AcqRel)
    }

    /// Returns `true` if the flag has been raised.
    #[must_use]
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
struct TokenState {
    cancelled: MonotonicFlag,
    deadline: Option<Instant>,
}

/// A cloneable cancellation signal handed to batch queries by their caller.
///
/// All clones share the same state: cancelling any clone cancels them all. A token may also
/// carry a deadline, after which it reports itself as cancelled without an explicit call to
/// [`cancel`](CancellationToken::cancel).
///
/// Cancellation is sticky; a token cannot be reset. Create a fresh token per logical request.
///
/// # Examples
///
/// ```rust
/// use ontoreach::CancellationToken;
/// use std::thread;
///
/// let token = CancellationToken::new();
/// let remote = token.clone();
///
/// thread::spawn(move || remote.cancel()).join().unwrap();
/// assert!(token.is_cancelled());
/// ```
///
/// ```rust
/// use ontoreach::CancellationToken;
/// use std::time::Duration;
///
/// let token = CancellationToken::with_timeout(Duration::ZERO);
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    state: Arc<TokenState>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    /// Creates a token without a deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::from_deadline(None)
    }

    /// Creates a token that cancels itself once `deadline` has passed.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::from_deadline(Some(deadline))
    }

    /// Creates a token that cancels itself `timeout` from now.
    ///
    /// A timeout too large to represent is treated as "no deadline".
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_deadline(Instant::now().checked_add(timeout))
    }

    fn from_deadline(deadline: Option<Instant>) -> Self {
        Self {
            state: Arc::new(TokenState {
                cancelled: MonotonicFlag::new(),
                deadline,
            }),
        }
    }

    /// Cancels the token and every clone of it.
    pub fn cancel(&self) {
        self.state.cancelled.raise();
    }

    /// Returns `true` if the token was cancelled or its deadline has passed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        if self.state.cancelled.is_raised() {
            return true;
        }
        match self.state.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.state.cancelled.raise();
                true
            }
            _ => false,
        }
    }

    /// Returns the deadline attached to this token, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.state.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    #[test]
    fn test_flag_single_transition_under_contention() {
        let flag = Arc::new(MonotonicFlag::new());
        let transitions = Arc::new(AtomicUsize::new(0));
        let mut handles = vec![];

        for _ in 0..8 {
            let flag = Arc::clone(&flag);
            let transitions = Arc::clone(&transitions);
            handles.push(thread::spawn(move || {
                if flag.raise() {
                    transitions.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(flag.is_raised());
        assert_eq!(transitions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_token_cancel_is_shared_by_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        assert!(!clone.is_cancelled());

        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_token_deadline_expires() {
        let token = CancellationToken::with_deadline(Instant::now());
        assert!(token.is_cancelled());
        assert!(token.deadline().is_some());
    }

    #[test]
    fn test_token_future_deadline_not_cancelled() {
        let token = CancellationToken::with_timeout(Duration::from_secs(3600));
        assert!(!token.is_cancelled());

        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_token_huge_timeout_means_no_deadline() {
        let token = CancellationToken::with_timeout(Duration::MAX);
        assert!(token.deadline().is_none());
        assert!(!token.is_cancelled());
    }
}
