use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    pan::PanSelection,
    video::ReelParams,
};

/// Main configuration for Reelsmith
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reel geometry and timing settings
    pub reel: ReelConfig,

    /// Pan effect settings
    pub pan: PanConfig,

    /// Soundtrack mixing settings
    pub audio: MixConfig,

    /// External encoder settings
    pub encoder: EncoderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reel: ReelConfig::default(),
            pan: PanConfig::default(),
            audio: MixConfig::default(),
            encoder: EncoderConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.reel.validate()?;
        self.audio.validate()?;
        self.encoder.validate()?;
        Ok(())
    }
}

/// Reel geometry and timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelConfig {
    /// Output frame geometry and timing
    pub params: ReelParams,

    /// Maximum number of images used for one reel
    pub max_slides: usize,

    /// Number of parallel frame-rendering threads
    pub processing_threads: usize,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            params: ReelParams::default(),
            max_slides: 4,
            processing_threads: num_cpus::get(),
        }
    }
}

impl ReelConfig {
    fn validate(&self) -> Result<()> {
        let params = &self.params;

        if params.width == 0 || params.height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "reel.params.resolution".to_string(),
                value: format!("{}x{}", params.width, params.height)
            }.into());
        }

        // yuv420p output needs even dimensions on both axes
        if params.width % 2 != 0 || params.height % 2 != 0 {
            return Err(ConfigError::InvalidValue {
                key: "reel.params.resolution".to_string(),
                value: format!("{}x{}", params.width, params.height)
            }.into());
        }

        if params.fps == 0 || params.fps > 120 {
            return Err(ConfigError::InvalidValue {
                key: "reel.params.fps".to_string(),
                value: params.fps.to_string()
            }.into());
        }

        if params.duration_secs <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "reel.params.duration_secs".to_string(),
                value: params.duration_secs.to_string()
            }.into());
        }

        if self.max_slides == 0 {
            return Err(ConfigError::InvalidValue {
                key: "reel.max_slides".to_string(),
                value: self.max_slides.to_string()
            }.into());
        }

        if self.processing_threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "reel.processing_threads".to_string(),
                value: self.processing_threads.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Pan effect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanConfig {
    /// Direction choice applied to every slide
    pub mode: PanSelection,

    /// Allow vertical pans when choosing directions at random
    pub allow_vertical: bool,

    /// Seed for reproducible random direction choices
    pub seed: Option<u64>,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            mode: PanSelection::Auto,
            allow_vertical: false,
            seed: None,
        }
    }
}

/// Soundtrack mixing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixConfig {
    /// Voiceover gain (1.0 = unchanged)
    pub voiceover_volume: f32,

    /// Background music gain (1.0 = unchanged)
    pub music_volume: f32,

    /// Loop the music when it is shorter than the reel
    pub loop_music: bool,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            voiceover_volume: 1.0,
            music_volume: 0.1,
            loop_music: false,
        }
    }
}

impl MixConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.voiceover_volume) {
            return Err(ConfigError::InvalidValue {
                key: "audio.voiceover_volume".to_string(),
                value: self.voiceover_volume.to_string()
            }.into());
        }

        if !(0.0..=2.0).contains(&self.music_volume) {
            return Err(ConfigError::InvalidValue {
                key: "audio.music_volume".to_string(),
                value: self.music_volume.to_string()
            }.into());
        }

        Ok(())
    }
}

/// External encoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Video codec handed to ffmpeg
    pub video_codec: String,

    /// Audio codec handed to ffmpeg
    pub audio_codec: String,

    /// Output quality (0-100, mapped to CRF)
    pub quality: u8,

    /// Move the moov atom to the front for streaming playback
    pub faststart: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            quality: 85,
            faststart: true,
        }
    }
}

impl EncoderConfig {
    fn validate(&self) -> Result<()> {
        if self.video_codec.is_empty() {
            return Err(ConfigError::MissingKey {
                key: "encoder.video_codec".to_string()
            }.into());
        }

        if self.audio_codec.is_empty() {
            return Err(ConfigError::MissingKey {
                key: "encoder.audio_codec".to_string()
            }.into());
        }

        if self.quality > 100 {
            return Err(ConfigError::InvalidValue {
                key: "encoder.quality".to_string(),
                value: self.quality.to_string()
            }.into());
        }

        Ok(())
    }
}
