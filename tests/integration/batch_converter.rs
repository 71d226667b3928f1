// Tests for sequential batch conversion and its event stream

use crate::common::helpers::ScriptedTranscoder;
use gpuconv::engine::{
    BatchProgress, ConversionJob, ConversionOutcome, OutputFormat, WorkerMessage, convert_all,
};
use std::path::{Path, PathBuf};

fn jobs(names: &[&str]) -> Vec<ConversionJob> {
    let out = Path::new("/videos/converted");
    names
        .iter()
        .map(|n| ConversionJob::new(PathBuf::from("/videos").join(n), out, "hevc_nvenc", OutputFormat::Mp4))
        .collect()
}

#[test]
fn test_progress_counts_are_one_through_n() {
    let transcoder = ScriptedTranscoder::new();
    let jobs = jobs(&["a.mp4", "b.mov", "c.mkv", "d.avi"]);

    let mut seen = Vec::new();
    convert_all(&transcoder, &jobs, |msg| {
        if let WorkerMessage::Progress { progress, .. } = msg {
            seen.push(progress);
        }
    });

    let expected: Vec<_> = (1..=4)
        .map(|completed| BatchProgress {
            completed,
            total: 4,
        })
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_files_are_converted_in_list_order() {
    let transcoder = ScriptedTranscoder::new();
    let jobs = jobs(&["zeta.mp4", "alpha.mp4", "mid.webm"]);

    convert_all(&transcoder, &jobs, |_| {});

    assert_eq!(
        transcoder.converted_names(),
        ["zeta.mp4", "alpha.mp4", "mid.webm"]
    );
}

#[test]
fn test_failed_file_does_not_stop_the_batch() {
    let transcoder = ScriptedTranscoder::new().failing_on(&["b.mov"]);
    let jobs = jobs(&["a.mp4", "b.mov", "c.mkv"]);

    let mut outcomes = Vec::new();
    let summary = convert_all(&transcoder, &jobs, |msg| {
        if let WorkerMessage::Progress { outcome, .. } = msg {
            outcomes.push(outcome.is_completed());
        }
    });

    assert_eq!(transcoder.converted_names(), ["a.mp4", "b.mov", "c.mkv"]);
    assert_eq!(outcomes, [true, false, true]);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.completed, 3);
    assert_eq!(summary.failed, [PathBuf::from("/videos/b.mov")]);
    assert_eq!(summary.succeeded(), 2);
}

#[test]
fn test_every_file_failing_still_reaches_the_end() {
    let transcoder = ScriptedTranscoder::new().failing_on(&["a.mp4", "b.mp4"]);
    let jobs = jobs(&["a.mp4", "b.mp4"]);

    let mut finished = 0;
    let summary = convert_all(&transcoder, &jobs, |msg| {
        if matches!(msg, WorkerMessage::BatchFinished { .. }) {
            finished += 1;
        }
    });

    assert_eq!(finished, 1);
    assert_eq!(summary.failed.len(), 2);
    assert_eq!(summary.succeeded(), 0);
}

#[test]
fn test_event_sequence_for_each_file() {
    let transcoder = ScriptedTranscoder::new();
    let jobs = jobs(&["a.mp4", "b.mp4"]);

    let mut kinds = Vec::new();
    convert_all(&transcoder, &jobs, |msg| {
        kinds.push(match msg {
            WorkerMessage::FileStarted { index, .. } => format!("start {}", index),
            WorkerMessage::Progress { index, outcome, .. } => {
                assert_eq!(outcome, ConversionOutcome::Completed);
                format!("done {}", index)
            }
            WorkerMessage::BatchFinished { .. } => "finished".to_string(),
        });
    });

    assert_eq!(kinds, ["start 0", "done 0", "start 1", "done 1", "finished"]);
}

#[test]
fn test_empty_batch_only_reports_completion() {
    let transcoder = ScriptedTranscoder::new();

    let mut events = Vec::new();
    let summary = convert_all(&transcoder, &[], |msg| events.push(msg));

    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        WorkerMessage::BatchFinished { summary } if summary.total == 0
    ));
    assert_eq!(summary.completed, 0);
    assert!(transcoder.converted_names().is_empty());
}
