//! Integration tests for the assembly engine: profile-ladder behavior,
//! empty-input handling, and the resolver-to-timeline flow. Export attempts
//! run against a scripted backend, so no FFmpeg binary is required.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

use reel_assembly::{AssemblyConfig, AssetResolver, Compositor, Renderer, VideoAssembler};
use reel_assembly::ExportBackend;
use reel_media::{FfmpegCommand, MediaError, MediaResult};
use reel_models::{AssetSource, ProfileKind, RenderStatus, SegmentClip, SegmentSpec, Timeline};

/// Backend that fails the first `failures` attempts, then succeeds by
/// writing the scratch file the command points at.
struct ScriptedBackend {
    failures: usize,
    attempts: Mutex<Vec<Vec<String>>>,
}

impl ScriptedBackend {
    fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            attempts: Mutex::new(Vec::new()),
        }
    }

    fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    fn attempt_args(&self, index: usize) -> Vec<String> {
        self.attempts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl ExportBackend for &ScriptedBackend {
    async fn execute(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(cmd.build_args());
            attempts.len()
        };
        if attempt <= self.failures {
            Err(MediaError::ffmpeg_failed(
                "scripted encode failure",
                Some("Unknown encoder preset".to_string()),
                Some(1),
            ))
        } else {
            std::fs::write(cmd.output_path(), b"rendered")?;
            Ok(())
        }
    }
}

fn one_clip_timeline() -> Timeline {
    let clips = vec![SegmentClip {
        index: 0,
        duration_secs: 3.0,
        has_audio: true,
        fallback_visual: false,
        path: PathBuf::from("/scratch/segment_000.mp4"),
    }];
    Timeline {
        total_duration_secs: Timeline::clip_duration_sum(&clips),
        clips,
        music: None,
        disclaimer: None,
    }
}

#[tokio::test]
async fn primary_success_needs_no_retry() {
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("final.mp4");
    let config = AssemblyConfig::default();
    let backend = ScriptedBackend::failing_first(0);

    let result = Renderer::with_backend(&config, &backend)
        .render(&one_clip_timeline(), &output)
        .await;

    assert_eq!(result.status, RenderStatus::Success);
    assert_eq!(result.profile_used, Some(ProfileKind::Primary));
    assert_eq!(backend.attempt_count(), 1);
    assert!(output.exists());
}

#[tokio::test]
async fn primary_failure_retries_fallback_exactly_once() {
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("final.mp4");
    let config = AssemblyConfig::default();
    let backend = ScriptedBackend::failing_first(1);

    let result = Renderer::with_backend(&config, &backend)
        .render(&one_clip_timeline(), &output)
        .await;

    assert_eq!(result.status, RenderStatus::Success);
    assert_eq!(result.profile_used, Some(ProfileKind::Fallback));
    assert_eq!(result.output_path, Some(output.clone()));
    assert_eq!(backend.attempt_count(), 2);

    // The retry used the minimal parameter set.
    let first = backend.attempt_args(0);
    let second = backend.attempt_args(1);
    assert!(first.contains(&"-preset".to_string()));
    assert!(!second.contains(&"-preset".to_string()));
    assert!(!second.contains(&"-c:a".to_string()));

    assert!(output.exists());
    assert!(!out_dir.path().join("final.part.mp4").exists());
}

#[tokio::test]
async fn export_target_keeps_a_muxer_extension() {
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("final.mp4");
    let config = AssemblyConfig::default();
    let backend = ScriptedBackend::failing_first(0);

    Renderer::with_backend(&config, &backend)
        .render(&one_clip_timeline(), &output)
        .await;

    // FFmpeg picks the output muxer from the extension after the last
    // dot; the scratch export target must end in the media extension.
    let args = backend.attempt_args(0);
    let target = args.last().unwrap().clone();
    assert!(target.ends_with(".part.mp4"));
    assert_eq!(
        std::path::Path::new(&target).extension().unwrap(),
        "mp4"
    );
}

#[tokio::test]
async fn exhausted_ladder_is_terminal_and_leaves_no_scratch() {
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("final.mp4");
    let config = AssemblyConfig::default();
    let backend = ScriptedBackend::failing_first(usize::MAX);

    let result = Renderer::with_backend(&config, &backend)
        .render(&one_clip_timeline(), &output)
        .await;

    assert_eq!(result.status, RenderStatus::Failed);
    assert!(result.output_path.is_none());
    // Default ladder: primary plus exactly one retry.
    assert_eq!(backend.attempt_count(), 2);
    assert!(!output.exists());
    assert!(!out_dir.path().join("final.part.mp4").exists());
}

#[tokio::test]
async fn empty_input_fails_without_rendering() {
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("final.mp4");
    let assembler = VideoAssembler::new(AssemblyConfig::default());

    let result = assembler.assemble(&[], &output, None).await;

    assert_eq!(result.status, RenderStatus::Failed);
    assert!(result.output_path.is_none());
    assert!(!output.exists());
}

#[test]
fn degraded_segments_still_compose_to_the_expected_duration() {
    // Two segments: the first with viable narration, the second with
    // nothing usable at all. The second falls back to a solid-color field
    // and the default duration.
    let assets = TempDir::new().unwrap();
    let narration = assets.path().join("segment_0.mp3");
    std::fs::write(&narration, vec![0u8; 4_096]).unwrap();

    let config = AssemblyConfig::default();
    let resolver = AssetResolver::new(&config);

    let (audio_0, _) = resolver.resolve(&SegmentSpec {
        index: 0,
        audio: Some(narration.clone()),
        visual: None,
    });
    let (audio_1, visual_1) = resolver.resolve(&SegmentSpec {
        index: 1,
        audio: Some(assets.path().join("missing.mp3")),
        visual: Some(assets.path().join("missing.mp4")),
    });

    assert_eq!(audio_0.source, AssetSource::Footage(narration));
    assert_eq!(audio_1.source, AssetSource::Silence);
    assert_eq!(visual_1.source, AssetSource::ColorField);
    assert!(visual_1.fallback_used);

    // Clip durations follow the resolution outcome: narration length for
    // the first, the configured default for the silent second.
    let clips = vec![
        SegmentClip {
            index: 0,
            duration_secs: 3.0,
            has_audio: true,
            fallback_visual: false,
            path: PathBuf::from("/scratch/segment_000.mp4"),
        },
        SegmentClip {
            index: 1,
            duration_secs: config.default_segment_secs,
            has_audio: false,
            fallback_visual: true,
            path: PathBuf::from("/scratch/segment_001.mp4"),
        },
    ];

    let timeline = Compositor::new(&config).compose(clips, None).unwrap();
    assert!((timeline.total_duration_secs - 5.5).abs() < 1e-9);
    assert_eq!(timeline.clips[0].index, 0);
    assert_eq!(timeline.clips[1].index, 1);
}
