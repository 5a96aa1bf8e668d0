//! FFmpeg CLI plumbing for the assembly engine.
//!
//! This crate provides:
//! - Type-safe multi-input FFmpeg command building
//! - An async runner with stderr capture for diagnostics
//! - FFprobe media inspection
//! - Filter-graph builders for clip normalization and timeline compositing

pub mod command;
pub mod error;
pub mod filters;
pub mod probe;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use probe::{media_duration, probe_media, MediaInfo};
