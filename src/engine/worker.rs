// Background worker that runs a batch and streams progress back

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use super::batch::{BatchSummary, convert_all};
use super::core::{BatchProgress, ConversionOutcome, Transcoder};
use super::session::BatchPlan;

/// Message from the batch worker to whoever is presenting progress
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Conversion of the file at `index` is about to start
    FileStarted { index: usize, input_path: PathBuf },

    /// File at `index` finished (either way); `progress.completed` counts it
    Progress {
        index: usize,
        progress: BatchProgress,
        outcome: ConversionOutcome,
    },

    /// Sent once after the last file
    BatchFinished { summary: BatchSummary },
}

/// Handle to a running batch.
///
/// There is no cancel: once started the worker runs the whole plan.
pub struct BatchHandle {
    rx: Receiver<WorkerMessage>,
    thread: Option<JoinHandle<BatchSummary>>,
    total: usize,
}

impl BatchHandle {
    /// Get the receiver for worker messages
    pub fn receiver(&self) -> &Receiver<WorkerMessage> {
        &self.rx
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Non-blocking poll, for UI loops
    pub fn try_next(&self) -> Option<WorkerMessage> {
        match self.rx.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait for the worker to finish and return its summary
    pub fn join(mut self) -> BatchSummary {
        let total = self.total;
        self.thread
            .take()
            .and_then(|t| t.join().ok())
            .unwrap_or_else(|| BatchSummary {
                total,
                ..Default::default()
            })
    }
}

/// Spawn the single background worker for `plan`
pub fn start_batch(transcoder: Arc<dyn Transcoder>, plan: BatchPlan) -> BatchHandle {
    let (tx, rx) = mpsc::channel();
    let total = plan.jobs.len();

    let thread = thread::spawn(move || {
        convert_all(transcoder.as_ref(), &plan.jobs, |msg| {
            // Receiver may be gone if the presenter quit; keep converting anyway
            let _ = tx.send(msg);
        })
    });

    BatchHandle {
        rx,
        thread: Some(thread),
        total,
    }
}
