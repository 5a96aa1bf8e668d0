//! Timeline composition: clip ordering, music selection, disclaimer.
//!
//! Music and disclaimer are additive layers; their absence never alters
//! clip count, order, or duration, and any problem selecting them degrades
//! to omission with a log note.

use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use reel_models::{SegmentClip, Timeline};

use crate::config::AssemblyConfig;

/// Joins ordered clips into a timeline with optional layers.
pub struct Compositor<'a> {
    config: &'a AssemblyConfig,
}

impl<'a> Compositor<'a> {
    pub fn new(config: &'a AssemblyConfig) -> Self {
        Self { config }
    }

    /// Compose clips (already in ordinal order) into a timeline.
    ///
    /// Returns `None` when no clips survived resolution; there is nothing
    /// to compose.
    pub fn compose(&self, clips: Vec<SegmentClip>, music_override: Option<&Path>) -> Option<Timeline> {
        if clips.is_empty() {
            warn!("No clips survived resolution, nothing to compose");
            return None;
        }

        let total_duration_secs = Timeline::clip_duration_sum(&clips);
        let music = self.select_music(music_override);
        let disclaimer = self.select_disclaimer();

        info!(
            clips = clips.len(),
            total_duration_secs,
            music = music.is_some(),
            disclaimer = disclaimer.is_some(),
            "Composed timeline"
        );

        Some(Timeline {
            clips,
            music,
            disclaimer,
            total_duration_secs,
        })
    }

    /// Music policy, in order: explicit caller track, else a random pick
    /// from the configured music directory, else none.
    fn select_music(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Some(path.to_path_buf());
            }
            warn!(
                path = %path.display(),
                "Requested background music not found, proceeding without music"
            );
            return None;
        }

        let dir = self.config.music_dir.as_ref()?;
        match pick_music_track(dir) {
            Some(track) => {
                info!(track = %track.display(), "Selected background music");
                Some(track)
            }
            None => {
                debug!(dir = %dir.display(), "No usable background music in directory");
                None
            }
        }
    }

    fn select_disclaimer(&self) -> Option<PathBuf> {
        let path = self.config.disclaimer.as_ref()?;
        if path.is_file() {
            Some(path.clone())
        } else {
            warn!(
                path = %path.display(),
                "Disclaimer asset not found, skipping overlay"
            );
            None
        }
    }
}

/// Pick one `.mp3` from the directory. The candidate list is sorted so the
/// candidate set is stable for a given directory; the index is drawn
/// uniformly.
fn pick_music_track(dir: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }
    candidates.sort();

    let index = rand::rng().random_range(0..candidates.len());
    candidates.into_iter().nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn clip(index: usize, duration_secs: f64) -> SegmentClip {
        SegmentClip {
            index,
            duration_secs,
            has_audio: index % 2 == 0,
            fallback_visual: false,
            path: PathBuf::from(format!("/scratch/segment_{index:03}.mp4")),
        }
    }

    #[test]
    fn test_empty_clips_rejected() {
        let config = AssemblyConfig::default();
        assert!(Compositor::new(&config).compose(Vec::new(), None).is_none());
    }

    #[test]
    fn test_total_duration_is_clip_sum() {
        let config = AssemblyConfig::default();
        let timeline = Compositor::new(&config)
            .compose(vec![clip(0, 3.0), clip(1, 2.5)], None)
            .unwrap();
        assert!((timeline.total_duration_secs - 5.5).abs() < 1e-9);
        assert_eq!(timeline.clips.len(), 2);
        assert_eq!(timeline.clips[0].index, 0);
        assert_eq!(timeline.clips[1].index, 1);
    }

    #[test]
    fn test_no_music_sources_yields_no_music() {
        let config = AssemblyConfig::default();
        let timeline = Compositor::new(&config)
            .compose(vec![clip(0, 1.0)], None)
            .unwrap();
        assert!(timeline.music.is_none());
    }

    #[test]
    fn test_missing_explicit_music_degrades() {
        let config = AssemblyConfig::default();
        let timeline = Compositor::new(&config)
            .compose(vec![clip(0, 1.0)], Some(Path::new("/nonexistent/music.mp3")))
            .unwrap();
        assert!(timeline.music.is_none());
    }

    #[test]
    fn test_explicit_music_wins_over_directory() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("chosen.mp3");
        fs::write(&explicit, b"mp3").unwrap();
        fs::write(dir.path().join("other.mp3"), b"mp3").unwrap();

        let config = AssemblyConfig {
            music_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let timeline = Compositor::new(&config)
            .compose(vec![clip(0, 1.0)], Some(&explicit))
            .unwrap();
        assert_eq!(timeline.music, Some(explicit));
    }

    #[test]
    fn test_directory_pick_only_considers_mp3() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("track.mp3"), b"mp3").unwrap();
        fs::write(dir.path().join("notes.txt"), b"text").unwrap();

        for _ in 0..8 {
            let track = pick_music_track(dir.path()).unwrap();
            assert_eq!(track, dir.path().join("track.mp3"));
        }
    }

    #[test]
    fn test_empty_music_directory_yields_none() {
        let dir = TempDir::new().unwrap();
        assert!(pick_music_track(dir.path()).is_none());
    }

    #[test]
    fn test_missing_disclaimer_skipped_without_failure() {
        let config = AssemblyConfig {
            disclaimer: Some(PathBuf::from("/nonexistent/disclaimer.png")),
            ..Default::default()
        };
        let timeline = Compositor::new(&config)
            .compose(vec![clip(0, 1.0)], None)
            .unwrap();
        assert!(timeline.disclaimer.is_none());
    }

    #[test]
    fn test_present_disclaimer_attached() {
        let dir = TempDir::new().unwrap();
        let disclaimer = dir.path().join("disclaimer.png");
        fs::write(&disclaimer, b"png").unwrap();

        let config = AssemblyConfig {
            disclaimer: Some(disclaimer.clone()),
            ..Default::default()
        };
        let timeline = Compositor::new(&config)
            .compose(vec![clip(0, 1.0)], None)
            .unwrap();
        assert_eq!(timeline.disclaimer, Some(disclaimer));
    }
}
