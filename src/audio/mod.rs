//! # Audio Input Module
//!
//! Probes the voiceover and music inputs before any rendering starts, and
//! carries their mix settings through to the encoder.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use reelsmith::audio::AudioProbe;
//!
//! # fn main() -> anyhow::Result<()> {
//! let info = AudioProbe::probe("voiceover.mp3")?;
//! println!("Voiceover runs {:.1}s", info.duration_secs);
//! # Ok(())
//! # }
//! ```

pub mod probe;
pub mod types;

pub use probe::AudioProbe;
pub use types::{AudioInfo, Soundtrack};
