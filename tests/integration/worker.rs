// Tests for the background batch worker and message handling

use crate::common::helpers::{ScriptedTranscoder, folder_with};
use gpuconv::engine::{OutputFormat, Session, WorkerMessage, probe, registry, start_batch};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_worker_streams_progress_then_finishes() {
    let dir = folder_with(&["one.mp4", "two.mov", "three.webm"]);
    let transcoder = Arc::new(ScriptedTranscoder::new().with_working(&["h264_qsv"]).failing_on(&["two.mov"]));

    let availability = probe(transcoder.as_ref(), &registry::candidates());
    let mut session = Session::new();
    session.select_folder(dir.path()).unwrap();
    session.select_encoder(&availability, "h264_qsv").unwrap();
    session.set_output_format(OutputFormat::Mkv);
    let plan = session.plan().unwrap();

    let handle = start_batch(transcoder.clone(), plan);
    assert_eq!(handle.total(), 3);

    let mut completed_counts = Vec::new();
    let mut finished = 0;
    loop {
        let msg = handle
            .receiver()
            .recv_timeout(Duration::from_secs(10))
            .expect("worker stalled");
        match msg {
            WorkerMessage::Progress { progress, .. } => completed_counts.push(progress.completed),
            WorkerMessage::BatchFinished { .. } => {
                finished += 1;
                break;
            }
            WorkerMessage::FileStarted { .. } => {}
        }
    }

    assert_eq!(completed_counts, [1, 2, 3]);
    assert_eq!(finished, 1);

    let summary = handle.join();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].ends_with("two.mov"));
}

#[test]
fn test_join_without_reading_messages() {
    let dir = folder_with(&["a.mp4", "b.mp4"]);
    let transcoder = Arc::new(ScriptedTranscoder::new().with_working(&["hevc_vaapi"]));

    let availability = probe(transcoder.as_ref(), &registry::candidates());
    let mut session = Session::new();
    session.select_folder(dir.path()).unwrap();
    session.select_encoder(&availability, "hevc_vaapi").unwrap();

    let handle = start_batch(transcoder.clone(), session.plan().unwrap());
    let summary = handle.join();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(transcoder.converted_names().len(), 2);
}

#[test]
fn test_try_next_drains_after_completion() {
    let dir = folder_with(&["a.mp4"]);
    let transcoder = Arc::new(ScriptedTranscoder::new().with_working(&["h264_amf"]));

    let availability = probe(transcoder.as_ref(), &registry::candidates());
    let mut session = Session::new();
    session.select_folder(dir.path()).unwrap();
    session.select_encoder(&availability, "h264_amf").unwrap();

    let handle = start_batch(transcoder, session.plan().unwrap());

    let mut messages = Vec::new();
    let deadline = std::time::Instant::now() + Duration::from_secs(10);
    while std::time::Instant::now() < deadline {
        if let Some(msg) = handle.try_next() {
            let done = matches!(msg, WorkerMessage::BatchFinished { .. });
            messages.push(msg);
            if done {
                break;
            }
        } else {
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    assert_eq!(messages.len(), 3, "FileStarted, Progress, BatchFinished");
    assert!(handle.try_next().is_none());
}
