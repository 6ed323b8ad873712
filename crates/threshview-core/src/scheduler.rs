use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::document::{BgraBitmap, ImageDocument};
use crate::error::ThreshViewError;
use crate::params::ThresholdParams;
use crate::threshold::{composite_overlay, threshold_bitmap, CancelToken};

/// Default number of compute worker threads.
pub const DEFAULT_WORKERS: usize = 2;

pub type DocumentId = u64;

/// Per-document computation state, for status display and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComputePhase {
    #[default]
    Idle,
    Computing,
    Completed,
    Cancelled,
    Failed,
}

impl ComputePhase {
    pub fn is_busy(self) -> bool {
        matches!(self, ComputePhase::Computing)
    }
}

struct ComputeJob {
    doc_id: DocumentId,
    generation: u64,
    document: Arc<ImageDocument>,
    params: ThresholdParams,
    cancel: CancelToken,
}

enum Outcome {
    Completed(BgraBitmap),
    Cancelled,
    Failed(ThreshViewError),
}

struct OutcomeMsg {
    doc_id: DocumentId,
    generation: u64,
    outcome: Outcome,
}

struct DocEntry {
    document: Arc<ImageDocument>,
    /// Current displayable bitmap. Replaced wholesale, never mutated.
    result: Option<Arc<BgraBitmap>>,
    /// Generation of the last-started computation. Only an outcome
    /// carrying this exact generation may be applied.
    generation: u64,
    cancel: Option<CancelToken>,
    phase: ComputePhase,
    applied: u64,
}

/// Keeps each document's displayed bitmap consistent with the latest
/// parameters, cancelling superseded work.
///
/// Jobs run on a small worker pool; outcomes are applied only on the
/// thread that owns the scheduler (`drain`/`settle`), so the result slot
/// of every document is single-writer. A computation whose generation no
/// longer matches the document's current one is discarded even if it
/// finished first: last-started wins, not last-finished.
pub struct RecomputeScheduler {
    job_tx: Sender<ComputeJob>,
    outcome_rx: Receiver<OutcomeMsg>,
    entries: BTreeMap<DocumentId, DocEntry>,
    next_id: DocumentId,
}

impl RecomputeScheduler {
    pub fn new(workers: usize) -> Self {
        Self::with_notify(workers, || {})
    }

    /// `notify` runs on a worker thread after every outcome is queued;
    /// the GUI uses it to request a repaint.
    pub fn with_notify<F>(workers: usize, notify: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel::<ComputeJob>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<OutcomeMsg>();

        let job_rx = Arc::new(Mutex::new(job_rx));
        let notify: Arc<dyn Fn() + Send + Sync> = Arc::new(notify);

        for i in 0..workers.max(1) {
            let job_rx = Arc::clone(&job_rx);
            let outcome_tx = outcome_tx.clone();
            let notify = Arc::clone(&notify);
            std::thread::Builder::new()
                .name(format!("threshview-compute-{i}"))
                .spawn(move || worker_loop(job_rx, outcome_tx, notify))
                .expect("failed to spawn compute worker");
        }

        Self {
            job_tx,
            outcome_rx,
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Register a document and schedule its initial recompute.
    pub fn insert(&mut self, document: Arc<ImageDocument>, params: &ThresholdParams) -> DocumentId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            id,
            DocEntry {
                document,
                result: None,
                generation: 0,
                cancel: None,
                phase: ComputePhase::Idle,
                applied: 0,
            },
        );
        self.trigger(id, params);
        id
    }

    /// Cancel any in-flight computation and release the document.
    pub fn close(&mut self, id: DocumentId) {
        if let Some(entry) = self.entries.remove(&id) {
            if let Some(cancel) = entry.cancel {
                cancel.cancel();
            }
        }
    }

    /// Schedule a fresh computation for one document, cancelling the
    /// in-flight one without waiting for it.
    pub fn trigger(&mut self, id: DocumentId, params: &ThresholdParams) {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };

        // Unprocessable documents have nothing to show; recompute is a no-op.
        if !entry.document.is_processable() {
            debug!(id, "skipping recompute: empty grayscale buffer");
            return;
        }

        if let Some(cancel) = entry.cancel.take() {
            cancel.cancel();
        }

        entry.generation += 1;
        let cancel = CancelToken::new();
        entry.cancel = Some(cancel.clone());
        entry.phase = ComputePhase::Computing;

        let job = ComputeJob {
            doc_id: id,
            generation: entry.generation,
            document: Arc::clone(&entry.document),
            params: *params,
            cancel,
        };
        if self.job_tx.send(job).is_err() {
            warn!(id, "compute workers are gone; recompute dropped");
            entry.phase = ComputePhase::Failed;
        }
    }

    /// Schedule a fresh computation for every document (shared-parameter
    /// change fan-out: exactly one recompute request per document).
    pub fn trigger_all(&mut self, params: &ThresholdParams) {
        let ids: Vec<DocumentId> = self.entries.keys().copied().collect();
        for id in ids {
            self.trigger(id, params);
        }
    }

    /// Apply all pending outcomes without blocking. Returns the ids whose
    /// displayed bitmap changed.
    pub fn drain(&mut self) -> Vec<DocumentId> {
        let mut updated = Vec::new();
        while let Ok(msg) = self.outcome_rx.try_recv() {
            if let Some(id) = self.apply(msg) {
                updated.push(id);
            }
        }
        updated
    }

    /// Block until no document is computing or the timeout elapses.
    /// Returns true when everything settled.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.entries.values().any(|e| e.phase.is_busy()) {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return false;
            };
            match self.outcome_rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.apply(msg);
                }
                Err(_) => return false,
            }
        }
        true
    }

    pub fn result(&self, id: DocumentId) -> Option<Arc<BgraBitmap>> {
        self.entries.get(&id).and_then(|e| e.result.clone())
    }

    pub fn document(&self, id: DocumentId) -> Option<Arc<ImageDocument>> {
        self.entries.get(&id).map(|e| Arc::clone(&e.document))
    }

    pub fn phase(&self, id: DocumentId) -> ComputePhase {
        self.entries
            .get(&id)
            .map(|e| e.phase)
            .unwrap_or(ComputePhase::Idle)
    }

    /// How many results have been applied for this document.
    pub fn apply_count(&self, id: DocumentId) -> u64 {
        self.entries.get(&id).map(|e| e.applied).unwrap_or(0)
    }

    pub fn ids(&self) -> Vec<DocumentId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply one outcome. Returns the document id when a bitmap was
    /// installed.
    fn apply(&mut self, msg: OutcomeMsg) -> Option<DocumentId> {
        let Some(entry) = self.entries.get_mut(&msg.doc_id) else {
            // Document closed while the job was in flight.
            return None;
        };

        if msg.generation != entry.generation {
            // A newer computation was started; this one lost, even if it
            // finished first.
            debug!(
                id = msg.doc_id,
                stale = msg.generation,
                current = entry.generation,
                "discarding superseded computation"
            );
            return None;
        }

        entry.cancel = None;
        match msg.outcome {
            Outcome::Completed(bitmap) => {
                entry.result = Some(Arc::new(bitmap));
                entry.phase = ComputePhase::Completed;
                entry.applied += 1;
                Some(msg.doc_id)
            }
            Outcome::Cancelled => {
                // Silent: the previous bitmap stays displayed.
                entry.phase = ComputePhase::Cancelled;
                None
            }
            Outcome::Failed(err) => {
                // The previous bitmap stays displayed; the document is
                // not invalidated.
                warn!(id = msg.doc_id, error = %err, "recompute failed");
                entry.phase = ComputePhase::Failed;
                None
            }
        }
    }
}

fn worker_loop(
    jobs: Arc<Mutex<Receiver<ComputeJob>>>,
    outcome_tx: Sender<OutcomeMsg>,
    notify: Arc<dyn Fn() + Send + Sync>,
) {
    loop {
        let job = {
            let rx = jobs.lock().expect("job queue lock poisoned");
            rx.recv()
        };
        let Ok(job) = job else {
            break; // scheduler dropped
        };

        let outcome = run_job(&job);
        if outcome_tx
            .send(OutcomeMsg {
                doc_id: job.doc_id,
                generation: job.generation,
                outcome,
            })
            .is_err()
        {
            break;
        }
        notify();
    }
}

fn run_job(job: &ComputeJob) -> Outcome {
    if job.cancel.is_cancelled() {
        return Outcome::Cancelled;
    }

    let doc = &job.document;
    let result = if doc.has_color() {
        composite_overlay(&doc.grayscale, &doc.color, &job.params, &job.cancel)
    } else {
        // Degenerate fallback: grayscale present, color missing.
        threshold_bitmap(&doc.grayscale, &job.params, &job.cancel)
    };

    match result {
        Ok(bitmap) => Outcome::Completed(bitmap),
        Err(ThreshViewError::Cancelled) => Outcome::Cancelled,
        Err(err) => Outcome::Failed(err),
    }
}
