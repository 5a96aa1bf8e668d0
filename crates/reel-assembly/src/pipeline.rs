//! End-to-end assembly run.

use std::path::Path;
use tempfile::TempDir;
use tracing::{error, info, warn};

use reel_models::{RenderResult, SegmentSpec};

use crate::clip::ClipBuilder;
use crate::compositor::Compositor;
use crate::config::AssemblyConfig;
use crate::renderer::Renderer;
use crate::resolver::AssetResolver;

/// The assembly engine facade.
///
/// Failures never propagate as errors past this boundary: callers always
/// get a [`RenderResult`], either a valid output path or an explicit
/// failure value they can apply their own backup policy to.
pub struct VideoAssembler {
    config: AssemblyConfig,
}

impl VideoAssembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Assemble an ordered list of segments into one video file.
    ///
    /// Data flows strictly forward: resolve -> build clips -> compose ->
    /// render. A segment whose clip build fails is dropped with a warning;
    /// the run fails only when nothing survives or every export profile
    /// fails. All intermediate clip files live in a run-scoped scratch
    /// directory released on every exit path.
    pub async fn assemble(
        &self,
        segments: &[SegmentSpec],
        output_path: &Path,
        music: Option<&Path>,
    ) -> RenderResult {
        info!(
            segments = segments.len(),
            output = %output_path.display(),
            "Starting assembly run"
        );

        let scratch = match TempDir::new() {
            Ok(dir) => dir,
            Err(e) => {
                error!(error = %e, "Failed to create scratch directory");
                return RenderResult::failed();
            }
        };

        let resolver = AssetResolver::new(&self.config);
        let builder = ClipBuilder::new(&self.config);

        // Clips are built in segment order, so the timeline ordering equals
        // the segment ordinal ordering.
        let mut clips = Vec::with_capacity(segments.len());
        for spec in segments {
            let (audio, visual) = resolver.resolve(spec);
            match builder.build(&audio, &visual, spec.index, scratch.path()).await {
                Ok(clip) => clips.push(clip),
                Err(e) => {
                    warn!(segment = spec.index, error = %e, "Dropping segment, clip build failed");
                }
            }
        }

        let Some(timeline) = Compositor::new(&self.config).compose(clips, music) else {
            error!("Assembly failed: no segments survived resolution");
            return RenderResult::failed();
        };

        Renderer::new(&self.config).render(&timeline, output_path).await
        // `scratch` drops here, removing every intermediate clip file.
    }
}
