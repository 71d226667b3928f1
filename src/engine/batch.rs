// Sequential batch conversion

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::core::{BatchProgress, ConversionJob, ConversionOutcome, Transcoder};
use super::worker::WorkerMessage;

/// What happened over a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.completed.saturating_sub(self.failed.len())
    }
}

/// Convert every job in order, one at a time.
///
/// A failed conversion is recorded and the batch moves on; nothing here returns
/// early. `on_event` sees `FileStarted` and `Progress` once per job, then
/// `BatchFinished` exactly once.
pub fn convert_all<F>(transcoder: &dyn Transcoder, jobs: &[ConversionJob], mut on_event: F) -> BatchSummary
where
    F: FnMut(WorkerMessage),
{
    let mut progress = BatchProgress::new(jobs.len());
    let mut summary = BatchSummary {
        total: jobs.len(),
        ..Default::default()
    };

    info!(total = jobs.len(), "batch started");

    for (index, job) in jobs.iter().enumerate() {
        on_event(WorkerMessage::FileStarted {
            index,
            input_path: job.input_path.clone(),
        });

        let outcome = transcoder.convert(job);
        match &outcome {
            ConversionOutcome::Completed => {
                debug!(input = %job.input_path.display(), output = %job.output_path.display(), "converted");
            }
            ConversionOutcome::Failed(reason) => {
                warn!(input = %job.input_path.display(), %reason, "conversion failed, continuing");
                summary.failed.push(job.input_path.clone());
            }
        }

        progress.completed += 1;
        summary.completed = progress.completed;

        on_event(WorkerMessage::Progress {
            index,
            progress,
            outcome,
        });
    }

    info!(
        total = summary.total,
        failed = summary.failed.len(),
        "batch finished"
    );

    on_event(WorkerMessage::BatchFinished {
        summary: summary.clone(),
    });

    summary
}
