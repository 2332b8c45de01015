use thiserror::Error;

/// Main error type for the Reelsmith library
#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),

    #[error("Audio processing error: {0}")]
    Audio(#[from] AudioError),

    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Image-specific errors
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to load image file: {path}")]
    LoadFailed { path: String },

    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    #[error("No images found in directory: {path}")]
    NoImagesFound { path: String },

    #[error("Invalid image dimensions for {path}: {width}x{height}")]
    InvalidDimensions { path: String, width: u32, height: u32 },
}

/// Audio-specific errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio file: {path}")]
    LoadFailed { path: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Invalid audio parameters: {details}")]
    InvalidParameters { details: String },
}

/// Assembly-specific errors
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Nothing to assemble: {reason}")]
    EmptyPlan { reason: String },

    #[error("Output generation failed: {reason}")]
    OutputFailed { reason: String },

    #[error("Invalid assembly parameters: {details}")]
    InvalidParameters { details: String },
}

/// Encoder-specific errors
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("ffmpeg not found on PATH")]
    FfmpegMissing,

    #[error("Failed to spawn ffmpeg: {reason}")]
    SpawnFailed { reason: String },

    #[error("Video encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Soundtrack mixing failed: {reason}")]
    MixFailed { reason: String },

    #[error("Frame size mismatch: got {got} bytes, expected {expected}")]
    FrameMismatch { got: usize, expected: usize },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using ReelError
pub type Result<T> = std::result::Result<T, ReelError>;

impl ReelError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO errors might be temporary
            Self::Io(_) => true,
            // Image/audio loading might work on retry
            Self::Image(ImageError::LoadFailed { .. }) => true,
            Self::Audio(AudioError::LoadFailed { .. }) => true,
            // Most other errors are permanent
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Image(ImageError::NoImagesFound { path }) => {
                format!("No usable images in '{}'. Supported formats: png, jpg, jpeg, webp.", path)
            }
            Self::Image(ImageError::LoadFailed { path }) => {
                format!("Could not load image file '{}'. Please check the file exists and is a supported format.", path)
            }
            Self::Audio(AudioError::LoadFailed { path }) => {
                format!("Could not load audio file '{}'. Please check the file exists and is a supported format.", path)
            }
            Self::Encode(EncodeError::FfmpegMissing) => {
                "ffmpeg was not found on PATH. Install ffmpeg and make sure it is reachable from your shell.".to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_missing_images() {
        let error: ReelError = ImageError::NoImagesFound {
            path: "media/images".to_string(),
        }
        .into();

        let message = error.user_message();
        assert!(message.contains("media/images"));
        assert!(message.contains("png"));
    }

    #[test]
    fn test_recoverability() {
        let loading: ReelError = AudioError::LoadFailed {
            path: "voice.mp3".to_string(),
        }
        .into();
        assert!(loading.is_recoverable());

        let missing: ReelError = EncodeError::FfmpegMissing.into();
        assert!(!missing.is_recoverable());

        assert!(!ReelError::generic("bad state").is_recoverable());
    }
}
