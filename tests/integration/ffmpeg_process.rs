// End-to-end tests of the real Ffmpeg transcoder against fake binaries

use gpuconv::engine::{
    ConversionJob, ConversionOutcome, Ffmpeg, OutputFormat, ProbeFailure, ProbeResult,
    Transcoder, convert_all, probe, registry,
};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_binary_probes_as_not_working() {
    let _guard = crate::common::fake_ffmpeg::lock();
    let dir = TempDir::new().unwrap();
    let ffmpeg = Ffmpeg::new(dir.path().join("no-such-ffmpeg"));

    let result = ffmpeg.probe_encoder("h264_nvenc");
    assert!(matches!(result, ProbeResult::Failed(ProbeFailure::Spawn(_))));

    let availability = probe(&ffmpeg, &registry::candidates());
    assert!(availability.is_empty());
}

#[test]
fn test_missing_binary_conversion_fails_quietly() {
    let _guard = crate::common::fake_ffmpeg::lock();
    let dir = TempDir::new().unwrap();
    let ffmpeg = Ffmpeg::new(dir.path().join("no-such-ffmpeg"));
    let job = ConversionJob::new(
        dir.path().join("a.mp4"),
        &dir.path().join("converted"),
        "h264_qsv",
        OutputFormat::Mp4,
    );

    let summary = convert_all(&ffmpeg, &[job.clone(), job], |_| {});
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.failed.len(), 2);
}

#[cfg(unix)]
mod unix {
    use super::*;
    use crate::common::fake_ffmpeg::{lock, logging_script, read_calls, write_script};

    #[test]
    fn test_probe_accepts_clean_zero_exit() {
        let _guard = lock();
        let dir = TempDir::new().unwrap();
        let bin = logging_script(dir.path(), "ffmpeg", ": > \"$last\"\nexit 0");

        let result = Ffmpeg::new(bin).probe_encoder("hevc_nvenc");
        assert_eq!(result, ProbeResult::Working("hevc_nvenc".to_string()));

        let calls = read_calls(dir.path());
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("-y -f lavfi -i color=black:s=128x128:d=1 -c:v hevc_nvenc "));
        assert!(calls[0].ends_with(".mp4"));
    }

    #[test]
    fn test_probe_removes_temp_output() {
        let _guard = lock();
        let dir = TempDir::new().unwrap();
        let bin = logging_script(dir.path(), "ffmpeg", ": > \"$last\"\nexit 0");

        Ffmpeg::new(bin).probe_encoder("h264_qsv");

        let calls = read_calls(dir.path());
        let temp_output = PathBuf::from(calls[0].rsplit(' ').next().unwrap());
        assert!(!temp_output.exists(), "probe output should be deleted");
    }

    #[test]
    fn test_probe_rejects_nonzero_exit() {
        let _guard = lock();
        let dir = TempDir::new().unwrap();
        let bin = write_script(dir.path(), "ffmpeg", "exit 1");

        let result = Ffmpeg::new(bin).probe_encoder("h264_amf");
        assert!(matches!(result, ProbeResult::Failed(ProbeFailure::ExitStatus(_))));
    }

    #[test]
    fn test_probe_rejects_error_text_despite_zero_exit() {
        let _guard = lock();
        let dir = TempDir::new().unwrap();
        let bin = write_script(
            dir.path(),
            "ffmpeg",
            "echo 'Error while opening encoder for output stream #0:0' >&2\nexit 0",
        );

        let result = Ffmpeg::new(bin).probe_encoder("hevc_vaapi");
        assert!(matches!(
            result,
            ProbeResult::Failed(ProbeFailure::DiagnosticError(_))
        ));
    }

    #[test]
    fn test_probe_builds_availability_from_binary_behaviour() {
        let _guard = lock();
        let dir = TempDir::new().unwrap();
        // Only NVENC encoders and hevc_vaapi "work"
        let bin = write_script(
            dir.path(),
            "ffmpeg",
            "case \"$7\" in\n  *_nvenc|hevc_vaapi) exit 0;;\n  *) echo 'Error: no device' >&2; exit 0;;\nesac",
        );

        let availability = probe(&Ffmpeg::new(bin), &registry::candidates());
        assert_eq!(
            availability.all_encoders(),
            ["h264_nvenc", "hevc_nvenc", "av1_nvenc", "hevc_vaapi"]
        );
        let vendors: Vec<_> = availability.vendors().iter().map(|v| v.vendor.as_str()).collect();
        assert_eq!(vendors, ["NVIDIA NVENC", "VAAPI"]);
    }

    #[test]
    fn test_batch_continues_past_failing_file() {
        let _guard = lock();
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("converted");
        std::fs::create_dir_all(&out).unwrap();
        let bin = logging_script(
            dir.path(),
            "ffmpeg",
            "case \"$3\" in *broken*) exit 1;; esac\n: > \"$last\"",
        );

        let jobs: Vec<_> = ["a.mp4", "broken.mov", "c.mkv"]
            .iter()
            .map(|n| ConversionJob::new(dir.path().join(n), &out, "hevc_nvenc", OutputFormat::Mkv))
            .collect();

        let mut outcomes = Vec::new();
        let summary = convert_all(&Ffmpeg::new(bin), &jobs, |msg| {
            if let gpuconv::engine::WorkerMessage::Progress { outcome, .. } = msg {
                outcomes.push(outcome);
            }
        });

        assert_eq!(read_calls(dir.path()).len(), 3);
        assert!(outcomes[0].is_completed());
        assert!(matches!(outcomes[1], ConversionOutcome::Failed(_)));
        assert!(outcomes[2].is_completed());
        assert_eq!(summary.failed, [dir.path().join("broken.mov")]);

        assert!(out.join("a_hevc_nvenc.mkv").exists());
        assert!(!out.join("broken_hevc_nvenc.mkv").exists());
        assert!(out.join("c_hevc_nvenc.mkv").exists());
    }

    #[test]
    fn test_convert_invocation_shape() {
        let _guard = lock();
        let dir = TempDir::new().unwrap();
        let bin = logging_script(dir.path(), "ffmpeg", "exit 0");
        let job = ConversionJob::new(
            PathBuf::from("/in/clip.mov"),
            &PathBuf::from("/in/converted"),
            "hevc_nvenc",
            OutputFormat::Mkv,
        );

        assert!(Ffmpeg::new(bin).convert(&job).is_completed());
        assert_eq!(
            read_calls(dir.path()),
            ["-y -i /in/clip.mov -c:v hevc_nvenc -c:a aac -b:a 320k -map 0:v:0 -map 0:a? /in/converted/clip_hevc_nvenc.mkv"]
        );
    }

    #[test]
    fn test_convert_output_is_not_echoed() {
        let _guard = lock();
        let dir = TempDir::new().unwrap();
        // Lots of diagnostic output must neither block the child nor reach our stderr
        let bin = write_script(
            dir.path(),
            "ffmpeg",
            "i=0\nwhile [ $i -lt 2000 ]; do echo 'frame= progress line' >&2; i=$((i+1)); done\nexit 0",
        );
        let job = ConversionJob::new(
            dir.path().join("a.mp4"),
            dir.path(),
            "h264_qsv",
            OutputFormat::Mp4,
        );

        assert_eq!(Ffmpeg::new(bin).convert(&job), ConversionOutcome::Completed);
    }
}
