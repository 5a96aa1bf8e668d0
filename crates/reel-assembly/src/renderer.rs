//! Timeline export with an ordered profile ladder.
//!
//! Profiles are tried in sequence with the first success short-circuiting.
//! The default ladder is [primary, fallback]: exactly one retry with a
//! minimal, maximally-compatible parameter set before the render is
//! declared unrecoverable.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

use reel_media::{filters, FfmpegCommand, FfmpegRunner, MediaResult};
use reel_models::{EncodeProfile, RenderResult, Timeline};

use crate::config::AssemblyConfig;

/// Executes one export attempt. Production shells out to FFmpeg; tests
/// substitute a scripted backend to drive the ladder.
#[async_trait]
pub trait ExportBackend: Send + Sync {
    async fn execute(&self, cmd: &FfmpegCommand) -> MediaResult<()>;
}

/// FFmpeg-backed export.
#[derive(Debug, Clone, Default)]
pub struct FfmpegExport {
    runner: FfmpegRunner,
}

#[async_trait]
impl ExportBackend for FfmpegExport {
    async fn execute(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        self.runner.run(cmd).await
    }
}

/// Exports a composed timeline to a file.
pub struct Renderer<'a, B = FfmpegExport> {
    config: &'a AssemblyConfig,
    backend: B,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a AssemblyConfig) -> Self {
        Self {
            config,
            backend: FfmpegExport::default(),
        }
    }
}

impl<'a, B: ExportBackend> Renderer<'a, B> {
    pub fn with_backend(config: &'a AssemblyConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Export the timeline to `output_path`.
    ///
    /// Each attempt writes a scratch file beside the target and renames it
    /// into place on success; scratch artifacts are removed on every
    /// failure path. The target directory structure is never touched.
    pub async fn render(&self, timeline: &Timeline, output_path: &Path) -> RenderResult {
        let scratch = scratch_path(output_path);

        for profile in &self.config.profiles {
            info!(
                profile = ?profile.kind,
                output = %output_path.display(),
                "Starting render"
            );
            let cmd = self.export_command(timeline, &scratch, profile);

            match self.backend.execute(&cmd).await {
                Ok(()) => {
                    if let Err(e) = fs::rename(&scratch, output_path).await {
                        error!(error = %e, "Failed to move rendered file into place");
                        let _ = fs::remove_file(&scratch).await;
                        return RenderResult::failed();
                    }
                    info!(profile = ?profile.kind, output = %output_path.display(), "Render complete");
                    return RenderResult::success(output_path.to_path_buf(), profile.kind);
                }
                Err(e) => {
                    warn!(profile = ?profile.kind, error = %e, "Render attempt failed");
                    let _ = fs::remove_file(&scratch).await;
                }
            }
        }

        error!("All encode profiles failed, render is unrecoverable");
        RenderResult::failed()
    }

    /// Build one export command: every clip as an input, then the optional
    /// looped music input, then the optional disclaimer image.
    fn export_command(
        &self,
        timeline: &Timeline,
        scratch: &Path,
        profile: &EncodeProfile,
    ) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new(scratch);
        for clip in &timeline.clips {
            cmd = cmd.input_file(&clip.path);
        }

        let clip_count = timeline.clips.len();
        let mut graph = vec![filters::concat_graph(clip_count)];
        let mut video_label = "vcat";
        let mut audio_label = "acat";
        let mut next_input = clip_count;

        if let Some(music) = &timeline.music {
            cmd = cmd.input(["-stream_loop", "-1"], music.to_string_lossy());
            graph.push(filters::music_mix(next_input, self.config.music_volume));
            audio_label = "amix";
            next_input += 1;
        }

        if let Some(disclaimer) = &timeline.disclaimer {
            cmd = cmd.input_file(disclaimer);
            graph.push(filters::disclaimer_overlay(
                next_input,
                self.config.frame.width,
                self.config.disclaimer_width_frac,
                self.config.disclaimer_bottom_inset,
            ));
            video_label = "vout";
        }

        cmd.filter_complex(graph.join(";"))
            .map(format!("[{video_label}]"))
            .map(format!("[{audio_label}]"))
            .duration(timeline.total_duration_secs)
            .output_args(profile.to_output_args())
    }
}

/// Scratch export target beside the final output, so the final rename
/// stays on one filesystem and is atomic. The `.part` marker goes before
/// the media extension: FFmpeg picks the output muxer from the extension
/// after the last dot, so the scratch file must keep it.
fn scratch_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = match output.extension() {
        Some(ext) => format!("{stem}.part.{}", ext.to_string_lossy()),
        None => format!("{stem}.part"),
    };
    output.with_file_name(name)
}
