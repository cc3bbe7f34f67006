//! Background prefetch queue.
//!
//! Producers (`retrieve`, `schedule_housekeeping`) never block: jobs go through
//! `try_send` on a bounded channel and are dropped when it is full. The worker
//! holds only a weak handle on the engine, so dropping the last engine handle
//! closes the channel and stops it.

use std::sync::{Mutex, PoisonError, Weak};

use lod_core::Granularity;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::engine::EngineInner;
use crate::metrics::CacheMetrics;

/// Deferred work fed by foreground completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefetchJob {
    /// Pre-embed a retrieved query at every level except `skip`.
    WarmQuery { query: String, skip: Granularity },
    /// Purge expired entries.
    Housekeeping,
}

impl PrefetchJob {
    pub fn kind(&self) -> &'static str {
        match self {
            PrefetchJob::WarmQuery { .. } => "warm_query",
            PrefetchJob::Housekeeping => "housekeeping",
        }
    }
}

/// Producer side of the queue. Empty until a worker is started.
#[derive(Debug, Default)]
pub(crate) struct PrefetchQueue {
    sender: Mutex<Option<mpsc::Sender<PrefetchJob>>>,
}

impl PrefetchQueue {
    /// Replace the channel with a fresh one of `capacity` slots. A previous
    /// worker sees its channel close and exits.
    pub(crate) fn open(&self, capacity: usize) -> mpsc::Receiver<PrefetchJob> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        *self.sender.lock().unwrap_or_else(PoisonError::into_inner) = Some(tx);
        rx
    }

    pub(crate) fn close(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    #[cfg(test)]
    pub(crate) fn is_open(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Offer a job without waiting. Returns whether it was queued.
    pub(crate) fn enqueue(&self, job: PrefetchJob, metrics: &CacheMetrics) -> bool {
        let mut guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = guard.as_ref() else {
            return false;
        };
        match sender.try_send(job) {
            Ok(()) => {
                metrics.record_prefetch_enqueued();
                true
            }
            Err(TrySendError::Full(job)) => {
                metrics.record_prefetch_dropped();
                warn!(job = job.kind(), "prefetch queue full, dropping job");
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!("prefetch worker gone, closing queue");
                *guard = None;
                false
            }
        }
    }
}

/// Drain `jobs` until the channel closes or the engine is dropped. Each job
/// runs on the blocking pool so embedding work never stalls the runtime.
pub(crate) async fn run_worker(engine: Weak<EngineInner>, mut jobs: mpsc::Receiver<PrefetchJob>) {
    while let Some(job) = jobs.recv().await {
        let Some(inner) = engine.upgrade() else {
            break;
        };
        let kind = job.kind();
        let outcome = tokio::task::spawn_blocking(move || inner.run_prefetch_job(job)).await;
        if let Err(e) = outcome {
            warn!(job = kind, error = %e, "prefetch job aborted");
        }
    }
    debug!("prefetch worker stopped");
}
