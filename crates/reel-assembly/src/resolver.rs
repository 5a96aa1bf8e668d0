//! Asset resolution with deterministic fallbacks.
//!
//! Resolution never fails: missing or undersized audio degrades to a silent
//! segment, missing or undersized visuals degrade to the configured
//! background image or a solid-color field.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use reel_models::{AssetKind, AssetSource, ResolvedAsset, SegmentSpec};

use crate::config::AssemblyConfig;

/// Validates a segment's sources and substitutes fallbacks.
pub struct AssetResolver<'a> {
    config: &'a AssemblyConfig,
}

impl<'a> AssetResolver<'a> {
    pub fn new(config: &'a AssemblyConfig) -> Self {
        Self { config }
    }

    /// Resolve both sides of a segment: (audio, visual).
    ///
    /// Idempotent; source files are only inspected, never touched.
    pub fn resolve(&self, spec: &SegmentSpec) -> (ResolvedAsset, ResolvedAsset) {
        (self.resolve_audio(spec), self.resolve_visual(spec))
    }

    fn resolve_audio(&self, spec: &SegmentSpec) -> ResolvedAsset {
        match &spec.audio {
            Some(path) if file_at_least(path, self.config.audio_min_bytes) => ResolvedAsset {
                kind: AssetKind::Audio,
                source: AssetSource::Footage(path.clone()),
                present: true,
                fallback_used: false,
            },
            _ => {
                debug!(segment = spec.index, "No viable narration, segment will be silent");
                ResolvedAsset {
                    kind: AssetKind::Audio,
                    source: AssetSource::Silence,
                    present: false,
                    fallback_used: false,
                }
            }
        }
    }

    fn resolve_visual(&self, spec: &SegmentSpec) -> ResolvedAsset {
        if let Some(path) = &spec.visual {
            if file_at_least(path, self.config.visual_min_bytes) {
                return ResolvedAsset {
                    kind: AssetKind::Visual,
                    source: AssetSource::Footage(path.clone()),
                    present: true,
                    fallback_used: false,
                };
            }
        }

        let source = match &self.config.fallback_background {
            Some(background) if background.is_file() => AssetSource::Still(background.clone()),
            _ => AssetSource::ColorField,
        };
        warn!(
            segment = spec.index,
            source = ?source,
            "Visual missing or undersized, substituting fallback"
        );
        ResolvedAsset {
            kind: AssetKind::Visual,
            source,
            present: false,
            fallback_used: true,
        }
    }
}

fn file_at_least(path: &Path, min_bytes: u64) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.len() >= min_bytes)
        .unwrap_or(false)
}
