//! Per-segment clip construction.
//!
//! Each resolved segment becomes one normalized intermediate file: target
//! frame, constant fps, yuv420p, AAC audio (real narration or synthesized
//! silence). Duration is dictated by the narration track; visuals are
//! looped to cover it, never sped up or truncated mid-loop.

use std::path::Path;
use tracing::{info, warn};

use reel_media::{filters, probe, FfmpegCommand, FfmpegRunner, MediaError, MediaResult};
use reel_models::{AssetSource, ResolvedAsset, SegmentClip};

use crate::config::AssemblyConfig;

/// Pick the clip duration: narration length when present and positive,
/// the configured default otherwise.
pub fn clip_duration(audio_secs: Option<f64>, default_secs: f64) -> f64 {
    match audio_secs {
        Some(secs) if secs > 0.0 => secs,
        _ => default_secs,
    }
}

/// Builds one normalized clip per segment.
pub struct ClipBuilder<'a> {
    config: &'a AssemblyConfig,
    runner: FfmpegRunner,
}

impl<'a> ClipBuilder<'a> {
    pub fn new(config: &'a AssemblyConfig) -> Self {
        Self {
            config,
            runner: FfmpegRunner::new(),
        }
    }

    /// Build the clip for one segment into the scratch directory.
    pub async fn build(
        &self,
        audio: &ResolvedAsset,
        visual: &ResolvedAsset,
        index: usize,
        scratch: &Path,
    ) -> MediaResult<SegmentClip> {
        // An unreadable narration file degrades to a silent segment rather
        // than failing the clip.
        let mut narration = audio.source.footage_path().map(Path::to_path_buf);
        let audio_secs = match &narration {
            Some(path) => match probe::media_duration(path).await {
                Ok(secs) => Some(secs),
                Err(e) => {
                    warn!(segment = index, error = %e, "Narration unreadable, treating segment as silent");
                    narration = None;
                    None
                }
            },
            None => None,
        };
        let duration = clip_duration(audio_secs, self.config.default_segment_secs);

        let has_audio = narration.is_some();
        let interrupted = self.config.pattern_interrupt.decide();
        let out_path = scratch.join(format!("segment_{index:03}.mp4"));

        info!(
            segment = index,
            duration,
            has_audio,
            fallback_visual = visual.fallback_used,
            interrupted,
            "Building segment clip"
        );

        let cmd = self.clip_command(
            &visual.source,
            narration.as_deref(),
            duration,
            interrupted,
            &out_path,
        )?;
        self.runner.run(&cmd).await?;

        Ok(SegmentClip {
            index,
            duration_secs: duration,
            has_audio,
            fallback_visual: visual.fallback_used,
            path: out_path,
        })
    }

    /// Assemble the FFmpeg command for one clip. Input 0 is the visual,
    /// input 1 the audio; only `0:v:0` and `1:a:0` are mapped, so any
    /// native audio carried by the visual source is stripped.
    fn clip_command(
        &self,
        visual: &AssetSource,
        narration: Option<&Path>,
        duration: f64,
        interrupted: bool,
        out_path: &Path,
    ) -> MediaResult<FfmpegCommand> {
        let (width, height) = (self.config.frame.width, self.config.frame.height);
        let mut cmd = FfmpegCommand::new(out_path);
        let mut chains: Vec<String> = Vec::new();

        match visual {
            AssetSource::Footage(path) => {
                // Loop short footage to cover the full clip duration.
                cmd = cmd.input(["-stream_loop", "-1"], path.to_string_lossy());
                chains.push(filters::fit_cover(width, height));
            }
            AssetSource::Still(path) => {
                cmd = cmd.input(["-loop", "1"], path.to_string_lossy());
                chains.push(filters::fit_cover(width, height));
            }
            AssetSource::ColorField => {
                cmd = cmd.input_lavfi(filters::color_source(
                    width,
                    height,
                    self.config.fps,
                    &self.config.fallback_color,
                ));
            }
            AssetSource::Silence => {
                return Err(MediaError::InvalidMedia(
                    "silence is not a visual source".to_string(),
                ));
            }
        }

        if self.config.remove_watermark {
            chains.push(filters::watermark_zoom(
                width,
                height,
                self.config.watermark_zoom,
            ));
        }
        if interrupted {
            chains.push(filters::pattern_interrupt(width, height));
        }
        chains.push(filters::normalize_output(self.config.fps));

        cmd = match narration {
            Some(path) => cmd.input_file(path),
            None => cmd.input_lavfi(filters::SILENCE_SOURCE),
        };

        Ok(cmd
            .video_filter(chains.join(","))
            .map("0:v:0")
            .map("1:a:0")
            .duration(duration)
            // Fixed normalization encode for intermediates; the export
            // profile ladder only applies to the final render.
            .output_args([
                "-c:v", "libx264", "-preset", "ultrafast", "-crf", "23", "-c:a", "aac", "-ar",
                "44100", "-ac", "2",
            ]))
    }
}
