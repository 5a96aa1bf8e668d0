//! Segment descriptors and resolved asset sources.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Minimum byte size for an audio file to count as viable narration.
/// Anything smaller is treated as a placeholder and the segment is silent.
pub const AUDIO_MIN_BYTES: u64 = 2_000;

/// Minimum byte size for a visual file to count as usable footage.
pub const VISUAL_MIN_BYTES: u64 = 100_000;

/// One script beat's worth of narration and matching visual.
///
/// Produced by the upstream script/voice/footage providers; either path may
/// be absent or point at a placeholder file that never materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SegmentSpec {
    /// Ordinal position in the final video.
    pub index: usize,
    /// Narration audio file, if the voice provider produced one.
    #[serde(default)]
    pub audio: Option<PathBuf>,
    /// Stock footage file, if the footage provider produced one.
    #[serde(default)]
    pub visual: Option<PathBuf>,
}

/// Which side of a segment an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Audio,
    Visual,
}

/// Concrete source a resolved asset reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetSource {
    /// Viable media file supplied by the caller.
    Footage(PathBuf),
    /// Static fallback background image.
    Still(PathBuf),
    /// Synthetic solid-color field at the target aspect.
    ColorField,
    /// No viable audio; the segment plays silent.
    Silence,
}

impl AssetSource {
    /// Path of the caller-supplied file, when this source is one.
    pub fn footage_path(&self) -> Option<&Path> {
        match self {
            Self::Footage(p) => Some(p),
            _ => None,
        }
    }
}

/// Outcome of resolving one side of a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedAsset {
    pub kind: AssetKind,
    pub source: AssetSource,
    /// Whether the caller-supplied file was viable.
    pub present: bool,
    /// Whether a deterministic fallback was substituted. Carried for log
    /// context only; nothing downstream branches on it.
    pub fallback_used: bool,
}
