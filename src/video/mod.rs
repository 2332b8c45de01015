//! # Video Processing Module
//!
//! Handles slide loading, pan-frame rendering, and encoded output generation.

pub mod encoder;
pub mod loader;
pub mod sampler;
pub mod types;

pub use encoder::{EncodedReel, ReelEncoder, VideoSink};
pub use loader::SlideLoader;
pub use sampler::PanSampler;
pub use types::{Frame, ReelParams, Slide};
