//! Batch execution of independent reachability checks.
//!
//! A batch is a set of `can_reach` checks that do not depend on each other. The
//! [`BatchCoordinator`] runs them either on a rayon pool or sequentially on the caller's
//! thread; both paths drive the same per-check step, so they agree on every answer.
//!
//! Before and after each check the step polls two signals:
//!
//! - the batch's `unsatisfied` [`MonotonicFlag`], raised by the first check that fails in a
//!   universally quantified batch; once raised the answer is known to be `false`
//! - the caller's [`CancellationToken`]; once observed the whole call fails with
//!   [`Error::Cancelled`], unless an unsatisfied check already settled the answer

use std::{collections::HashSet, hash::Hash};

use dashmap::DashSet;
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use crate::{
    reachability::BatchMode,
    utils::synchronization::{CancellationToken, MonotonicFlag},
    Error, Result,
};

/// Why a batch stopped before visiting every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Unsatisfied,
    Cancelled,
}

/// Signals shared by the workers of one batch.
struct BatchContext<'a> {
    unsatisfied: MonotonicFlag,
    cancelled: MonotonicFlag,
    token: Option<&'a CancellationToken>,
}

impl<'a> BatchContext<'a> {
    fn new(token: Option<&'a CancellationToken>) -> Self {
        BatchContext {
            unsatisfied: MonotonicFlag::new(),
            cancelled: MonotonicFlag::new(),
            token,
        }
    }

    /// Polls both signals; called around every check.
    fn poll(&self) -> std::result::Result<(), Interrupt> {
        if self.unsatisfied.is_raised() {
            return Err(Interrupt::Unsatisfied);
        }
        if self.cancelled.is_raised() || self.token.is_some_and(CancellationToken::is_cancelled) {
            if self.cancelled.raise() {
                warn!("batch cancelled by caller");
            }
            return Err(Interrupt::Cancelled);
        }
        Ok(())
    }

    fn mark_unsatisfied(&self) -> Interrupt {
        if self.unsatisfied.raise() {
            debug!("batch short-circuited on first unsatisfied check");
        }
        Interrupt::Unsatisfied
    }
}

/// Starts a dedicated pool of `threads` workers for parallel batches.
///
/// # Errors
///
/// Returns [`Error::WorkerPool`] if the worker threads cannot be spawned.
pub(crate) fn build_pool(threads: usize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("ontoreach-batch-{i}"))
        .build()
        .map_err(|e| Error::WorkerPool(format!("failed to start {threads} batch workers: {e}")))?;
    debug!(threads, "batch worker pool started");
    Ok(pool)
}

/// Runs batches of reachability checks in a chosen [`BatchMode`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BatchCoordinator<'p> {
    pool: Option<&'p ThreadPool>,
}

impl<'p> BatchCoordinator<'p> {
    /// Creates a coordinator running parallel batches on `pool`, or on the rayon global pool
    /// when `None`.
    pub(crate) fn new(pool: Option<&'p ThreadPool>) -> Self {
        BatchCoordinator { pool }
    }

    /// Returns `true` iff `check` holds for every item; an empty batch holds vacuously.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the token is cancelled before the answer is known.
    pub(crate) fn all<T, F>(
        &self,
        items: &[T],
        mode: BatchMode,
        token: Option<&CancellationToken>,
        check: F,
    ) -> Result<bool>
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync,
    {
        let ctx = BatchContext::new(token);
        let step = |item: &T| -> std::result::Result<(), Interrupt> {
            ctx.poll()?;
            if check(item) {
                ctx.poll()
            } else {
                Err(ctx.mark_unsatisfied())
            }
        };

        // A token cancelled up front fails even an empty batch
        let outcome = ctx.poll().and_then(|()| match mode {
            BatchMode::Sequential => items.iter().try_for_each(step),
            BatchMode::Parallel => self.install(|| items.par_iter().try_for_each(step)),
        });

        // Workers race to report; a found counterexample outranks a cancellation
        if ctx.unsatisfied.is_raised() {
            return Ok(false);
        }
        match outcome {
            Ok(()) => Ok(true),
            Err(Interrupt::Unsatisfied) => Ok(false),
            Err(Interrupt::Cancelled) => Err(Error::Cancelled),
        }
    }

    /// Collects every `(source, destination)` pair of the cross product for which `check`
    /// holds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the token is cancelled before every pair was checked.
    pub(crate) fn pairs<N, F>(
        &self,
        sources: &[N],
        destinations: &[N],
        mode: BatchMode,
        token: Option<&CancellationToken>,
        check: F,
    ) -> Result<HashSet<(N, N)>>
    where
        N: Copy + Eq + Hash + Send + Sync,
        F: Fn(N, N) -> bool + Sync,
    {
        let ctx = BatchContext::new(token);
        let found: DashSet<(N, N)> = DashSet::new();
        let step = |source: N, destination: N| -> std::result::Result<(), Interrupt> {
            ctx.poll()?;
            if check(source, destination) {
                found.insert((source, destination));
            }
            ctx.poll()
        };

        let outcome = ctx.poll().and_then(|()| match mode {
            BatchMode::Sequential => sources.iter().try_for_each(|&source| {
                destinations
                    .iter()
                    .try_for_each(|&destination| step(source, destination))
            }),
            BatchMode::Parallel => self.install(|| {
                sources.par_iter().try_for_each(|&source| {
                    destinations
                        .par_iter()
                        .try_for_each(|&destination| step(source, destination))
                })
            }),
        });

        match outcome {
            Ok(()) => {
                debug!(pairs = found.len(), "connect pairs collected");
                Ok(found.into_iter().collect())
            }
            Err(_) => Err(Error::Cancelled),
        }
    }

    fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}
