//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use reel_models::segment::{AUDIO_MIN_BYTES, VISUAL_MIN_BYTES};
use reel_models::EncodeProfile;

/// Target output frame, vertical 9:16 by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

/// Pattern-interrupt decision source.
///
/// `Random` is the production per-segment coin flip; the pinned variants
/// exist so tests can fix the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternInterrupt {
    #[default]
    Random,
    Always,
    Never,
}

impl PatternInterrupt {
    /// Decide whether one segment gets the jump-cut crop. Stateless per
    /// segment; `Random` draws a fresh coin flip every call.
    pub fn decide(self) -> bool {
        match self {
            Self::Random => rand::random::<bool>(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Configuration for one assembly engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Output frame dimensions; every clip is normalized to this frame.
    pub frame: FrameSize,
    /// Frame rate used for intermediate clips and export profiles.
    pub fps: u32,
    /// Clip length in seconds for segments with no viable narration.
    pub default_segment_secs: f64,
    /// Audio viability threshold in bytes.
    pub audio_min_bytes: u64,
    /// Visual viability threshold in bytes.
    pub visual_min_bytes: u64,
    /// Apply the watermark-obscuring zoom-crop to every clip.
    pub remove_watermark: bool,
    /// Zoom factor for the watermark crop.
    pub watermark_zoom: f64,
    /// Pattern-interrupt decision source.
    pub pattern_interrupt: PatternInterrupt,
    /// Static background substituted for missing or undersized visuals.
    pub fallback_background: Option<PathBuf>,
    /// Color of the last-resort solid field when no background is configured.
    pub fallback_color: String,
    /// Directory scanned for background-music candidates (`.mp3`).
    pub music_dir: Option<PathBuf>,
    /// Music volume multiplier, attenuated to sit under narration.
    pub music_volume: f64,
    /// Safety-disclaimer image overlaid for the full video duration.
    pub disclaimer: Option<PathBuf>,
    /// Disclaimer width as a fraction of the frame width.
    pub disclaimer_width_frac: f64,
    /// Disclaimer inset from the bottom edge, in pixels.
    pub disclaimer_bottom_inset: u32,
    /// Export profiles tried in order; the first success wins.
    pub profiles: Vec<EncodeProfile>,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            frame: FrameSize::default(),
            fps: 24,
            default_segment_secs: 2.5,
            audio_min_bytes: AUDIO_MIN_BYTES,
            visual_min_bytes: VISUAL_MIN_BYTES,
            remove_watermark: true,
            watermark_zoom: 1.1,
            pattern_interrupt: PatternInterrupt::Random,
            fallback_background: None,
            fallback_color: "black".to_string(),
            music_dir: None,
            music_volume: 0.10,
            disclaimer: None,
            disclaimer_width_frac: 0.9,
            disclaimer_bottom_inset: 50,
            profiles: EncodeProfile::default_ladder(),
        }
    }
}
