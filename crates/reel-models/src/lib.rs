//! Shared data models for the video assembly engine.

pub mod clip;
pub mod profile;
pub mod segment;

pub use clip::{SegmentClip, Timeline};
pub use profile::{EncodeProfile, ProfileKind, RenderResult, RenderStatus};
pub use segment::{AssetKind, AssetSource, ResolvedAsset, SegmentSpec};
