//! Built clips and the composed timeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A fully resolved, timed, effect-applied audio+visual unit, ready for
/// concatenation.
///
/// The opaque track handle is a normalized intermediate file living in the
/// run's scratch directory; it is released when the scratch directory drops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SegmentClip {
    /// Ordinal of the originating segment.
    pub index: usize,
    /// Clip duration in seconds, dictated by the narration track (or the
    /// configured default when the segment is silent).
    pub duration_secs: f64,
    /// Whether the clip carries real narration (silent clips still carry a
    /// muted audio stream so concatenation sees a uniform layout).
    pub has_audio: bool,
    /// Whether the visual came from a fallback source.
    pub fallback_visual: bool,
    /// Normalized intermediate clip file.
    pub path: PathBuf,
}

/// The ordered, composed whole-video structure prior to export.
///
/// Invariant: `total_duration_secs` equals the sum of clip durations and
/// never changes once the renderer is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Timeline {
    /// Clips in segment ordinal order.
    pub clips: Vec<SegmentClip>,
    /// Background music track, looped to the total duration at render time.
    pub music: Option<PathBuf>,
    /// Safety-disclaimer overlay image, shown for the full duration.
    pub disclaimer: Option<PathBuf>,
    /// Sum of constituent clip durations in seconds.
    pub total_duration_secs: f64,
}

impl Timeline {
    /// Sum of clip durations in seconds.
    pub fn clip_duration_sum(clips: &[SegmentClip]) -> f64 {
        clips.iter().map(|c| c.duration_secs).sum()
    }
}
