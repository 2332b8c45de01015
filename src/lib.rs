//! # Reelsmith
//!
//! Assemble short vertical video reels from still images, with a pan effect
//! over each image and a voiceover mixed with background music underneath.
//!
//! The library prepares each image so it fully covers the output frame,
//! slides a crop window across it to fake camera motion, streams the frames
//! to an external ffmpeg encoder, and lays the mixed soundtrack under the
//! result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reelsmith::{assembly::AssemblyEngine, config::Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//!
//! let engine = AssemblyEngine::new(config);
//! engine.assemble(
//!     "media/images/",
//!     "media/voiceover.mp3",
//!     "media/music.mp3",
//!     "reel.mp4"
//! ).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`video`] - Slide loading, pan-frame rendering, and encoding
//! - [`pan`] - Pan directions, crop-window math, and direction planning
//! - [`audio`] - Audio input probing and soundtrack settings
//! - [`assembly`] - Main assembly engine
//! - [`config`] - Configuration management

pub mod assembly;
pub mod audio;
pub mod config;
pub mod error;
pub mod pan;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    assembly::AssemblyEngine,
    config::Config,
    error::{ReelError, Result},
    pan::{PanDirection, PanSelection},
    video::EncodedReel,
};
