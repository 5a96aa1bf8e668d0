//! One-shot video assembly binary.
//!
//! Consumes a JSON manifest describing the pre-generated segment assets
//! (the hand-off format produced by the upstream script/voice/footage
//! stages), runs one assembly, and exits non-zero on terminal failure.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_assembly::{AssemblyConfig, VideoAssembler};
use reel_models::{RenderStatus, SegmentSpec};

/// Assemble a short vertical video from pre-generated segment assets.
#[derive(Debug, Parser)]
#[command(name = "reelforge", version, about)]
struct Args {
    /// Assembly manifest (JSON).
    manifest: PathBuf,

    /// Output video path (overrides the manifest).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Engine configuration file (JSON); defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Hand-off format from the upstream stages.
#[derive(Debug, Deserialize)]
struct Manifest {
    segments: Vec<ManifestSegment>,
    #[serde(default)]
    music: Option<PathBuf>,
    output: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ManifestSegment {
    #[serde(default)]
    audio: Option<PathBuf>,
    #[serde(default)]
    visual: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(args).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let manifest_text = tokio::fs::read_to_string(&args.manifest)
        .await
        .with_context(|| format!("reading manifest {}", args.manifest.display()))?;
    let manifest: Manifest =
        serde_json::from_str(&manifest_text).context("parsing assembly manifest")?;

    let config = match &args.config {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).context("parsing engine config")?
        }
        None => AssemblyConfig::default(),
    };

    let segments: Vec<SegmentSpec> = manifest
        .segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| SegmentSpec {
            index,
            audio: segment.audio,
            visual: segment.visual,
        })
        .collect();
    let output = args.output.unwrap_or(manifest.output);

    info!(
        segments = segments.len(),
        output = %output.display(),
        "Starting assembly"
    );

    let assembler = VideoAssembler::new(config);
    let result = assembler
        .assemble(&segments, &output, manifest.music.as_deref())
        .await;

    match result.status {
        RenderStatus::Success => {
            info!(
                output = %output.display(),
                profile = ?result.profile_used,
                "Assembly succeeded"
            );
            Ok(())
        }
        RenderStatus::Failed => {
            anyhow::bail!("assembly failed, no output produced")
        }
    }
}
