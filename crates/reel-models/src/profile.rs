//! Export encoding profiles and render outcomes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default export frame rate
pub const DEFAULT_FPS: u32 = 24;
/// Default video codec (H.264)
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default audio codec
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Preset used by the primary profile (single-pass, efficient)
pub const PRIMARY_PRESET: &str = "ultrafast";
/// Pixel format used by the primary profile
pub const DEFAULT_PIXEL_FORMAT: &str = "yuv420p";

/// Rung of the export ladder a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Primary,
    Fallback,
}

/// A named set of export parameters used for one render attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EncodeProfile {
    pub kind: ProfileKind,

    /// Target frame rate.
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Video codec (e.g. "libx264").
    #[serde(default = "default_video_codec")]
    pub codec: String,

    /// Encoding preset; `None` leaves the encoder default.
    #[serde(default)]
    pub preset: Option<String>,

    /// Audio codec; `None` leaves the muxer default.
    #[serde(default)]
    pub audio_codec: Option<String>,

    /// Encoder thread count; `None` leaves FFmpeg's default.
    #[serde(default)]
    pub threads: Option<u32>,

    /// Pixel format; `None` leaves the encoder default.
    #[serde(default)]
    pub pixel_format: Option<String>,

    /// Additional FFmpeg output arguments.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}
fn default_video_codec() -> String {
    DEFAULT_VIDEO_CODEC.to_string()
}

impl EncodeProfile {
    /// Primary export profile: widely-compatible codec, efficient
    /// single-pass preset, single-threaded encoding to bound resource use
    /// on constrained hosts.
    pub fn primary() -> Self {
        Self {
            kind: ProfileKind::Primary,
            fps: DEFAULT_FPS,
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: Some(PRIMARY_PRESET.to_string()),
            audio_codec: Some(DEFAULT_AUDIO_CODEC.to_string()),
            threads: Some(1),
            pixel_format: Some(DEFAULT_PIXEL_FORMAT.to_string()),
            extra_args: Vec::new(),
        }
    }

    /// Minimal retry profile: same codec and frame rate, no preset,
    /// threading, or audio-codec overrides. The parameter set most likely
    /// to succeed when the primary profile's assumptions do not hold on
    /// the host.
    pub fn fallback() -> Self {
        Self {
            kind: ProfileKind::Fallback,
            fps: DEFAULT_FPS,
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: None,
            audio_codec: None,
            threads: None,
            pixel_format: None,
            extra_args: Vec::new(),
        }
    }

    /// Default export ladder: the primary profile, then exactly one
    /// maximally-compatible retry.
    pub fn default_ladder() -> Vec<Self> {
        vec![Self::primary(), Self::fallback()]
    }

    /// Convert to FFmpeg output arguments.
    pub fn to_output_args(&self) -> Vec<String> {
        let mut args = vec![
            "-r".to_string(),
            self.fps.to_string(),
            "-c:v".to_string(),
            self.codec.clone(),
        ];

        if let Some(preset) = &self.preset {
            args.extend_from_slice(&["-preset".to_string(), preset.clone()]);
        }
        if let Some(audio_codec) = &self.audio_codec {
            args.extend_from_slice(&["-c:a".to_string(), audio_codec.clone()]);
        }
        if let Some(threads) = self.threads {
            args.extend_from_slice(&["-threads".to_string(), threads.to_string()]);
        }
        if let Some(pixel_format) = &self.pixel_format {
            args.extend_from_slice(&["-pix_fmt".to_string(), pixel_format.clone()]);
        }

        args.extend(self.extra_args.clone());

        args
    }
}

/// Terminal status of an assembly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    Success,
    Failed,
}

/// Terminal value of one assembly run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RenderResult {
    pub status: RenderStatus,
    /// Output file on success; no usable file is guaranteed on failure.
    pub output_path: Option<PathBuf>,
    /// Which rung of the export ladder produced the output.
    pub profile_used: Option<ProfileKind>,
}

impl RenderResult {
    /// Successful render via the given profile.
    pub fn success(output_path: PathBuf, profile_used: ProfileKind) -> Self {
        Self {
            status: RenderStatus::Success,
            output_path: Some(output_path),
            profile_used: Some(profile_used),
        }
    }

    /// Terminal failure; no output file exists.
    pub fn failed() -> Self {
        Self {
            status: RenderStatus::Failed,
            output_path: None,
            profile_used: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RenderStatus::Success
    }
}
