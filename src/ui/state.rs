// Dashboard state, fed by worker messages

use std::path::PathBuf;
use std::time::Instant;

use crate::engine::{BatchPlan, BatchProgress, BatchSummary, ConversionOutcome, WorkerMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileState {
    Pending,
    Running,
    Done,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FileRow {
    pub name: String,
    pub state: FileState,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub encoder: String,
    pub format: String,
    pub output_dir: PathBuf,
    pub rows: Vec<FileRow>,
    pub progress: BatchProgress,
    pub current: Option<usize>,
    pub summary: Option<BatchSummary>,
    pub started_at: Instant,
    /// Set when the user asked to quit mid-batch
    pub quit_refused: bool,
}

impl DashboardState {
    pub fn new(plan: &BatchPlan) -> Self {
        let rows = plan
            .jobs
            .iter()
            .map(|job| FileRow {
                name: job
                    .input_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                state: FileState::Pending,
            })
            .collect();

        Self {
            encoder: plan.encoder.clone(),
            format: plan.output_format.to_string(),
            output_dir: plan.output_dir.clone(),
            rows,
            progress: BatchProgress::new(plan.jobs.len()),
            current: None,
            summary: None,
            started_at: Instant::now(),
            quit_refused: false,
        }
    }

    pub fn apply(&mut self, msg: WorkerMessage) {
        match msg {
            WorkerMessage::FileStarted { index, .. } => {
                if let Some(row) = self.rows.get_mut(index) {
                    row.state = FileState::Running;
                }
                self.current = Some(index);
            }
            WorkerMessage::Progress {
                index,
                progress,
                outcome,
            } => {
                if let Some(row) = self.rows.get_mut(index) {
                    row.state = match outcome {
                        ConversionOutcome::Completed => FileState::Done,
                        ConversionOutcome::Failed(reason) => FileState::Failed(reason.to_string()),
                    };
                }
                self.progress = progress;
            }
            WorkerMessage::BatchFinished { summary } => {
                self.current = None;
                self.summary = Some(summary);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }
}
