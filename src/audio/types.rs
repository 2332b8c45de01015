use std::path::PathBuf;

use crate::config::MixConfig;

/// Playback-relevant facts about one audio input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioInfo {
    /// Duration in seconds
    pub duration_secs: f64,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
}

/// The two audio tracks mixed under a reel, with their gain settings
#[derive(Debug, Clone)]
pub struct Soundtrack {
    /// Spoken narration, played at its configured gain
    pub voiceover: PathBuf,

    /// Background music bed
    pub music: PathBuf,

    /// Voiceover gain (1.0 = unchanged)
    pub voiceover_volume: f32,

    /// Music gain (1.0 = unchanged)
    pub music_volume: f32,

    /// Loop the music when it is shorter than the reel
    pub loop_music: bool,
}

impl Soundtrack {
    /// Pair the two inputs with the configured mix settings
    pub fn new<P: Into<PathBuf>>(voiceover: P, music: P, mix: &MixConfig) -> Self {
        Self {
            voiceover: voiceover.into(),
            music: music.into(),
            voiceover_volume: mix.voiceover_volume,
            music_volume: mix.music_volume,
            loop_music: mix.loop_music,
        }
    }
}
