//! Video assembly engine.
//!
//! Takes an ordered list of independently produced (audio, visual) segment
//! pairs of unknown quality and produces one coherent, correctly-timed,
//! effect-processed, safely-exported vertical video file:
//!
//! - [`resolver::AssetResolver`] validates sources and substitutes
//!   deterministic fallbacks
//! - [`clip::ClipBuilder`] turns each resolved segment into a normalized,
//!   audio-timed clip
//! - [`compositor::Compositor`] orders clips into a timeline and attaches
//!   optional music and disclaimer layers
//! - [`renderer::Renderer`] exports through an ordered profile ladder
//! - [`pipeline::VideoAssembler`] is the never-raises facade over the whole
//!   run

pub mod clip;
pub mod compositor;
pub mod config;
pub mod pipeline;
pub mod renderer;
pub mod resolver;

pub use clip::{clip_duration, ClipBuilder};
pub use compositor::Compositor;
pub use config::{AssemblyConfig, FrameSize, PatternInterrupt};
pub use pipeline::VideoAssembler;
pub use renderer::{ExportBackend, FfmpegExport, Renderer};
pub use resolver::AssetResolver;
