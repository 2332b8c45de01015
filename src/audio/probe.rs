use std::fs::File;
use std::path::Path;

use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::audio::types::AudioInfo;
use crate::error::{AudioError, Result};

/// Inspects audio inputs before any encoding starts
///
/// Probing catches missing or broken files early and yields the durations
/// the engine uses for its length warnings.
pub struct AudioProbe;

impl AudioProbe {
    /// Read duration, sample rate and channel count from an audio file
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<AudioInfo> {
        let path = path.as_ref();
        let extension = Self::detect_format(path).unwrap_or_default();

        match extension.as_str() {
            "wav" => Self::probe_wav(path),
            "mp3" | "flac" | "ogg" | "m4a" | "aac" => Self::probe_compressed(path),
            _ => Err(AudioError::UnsupportedFormat {
                format: extension
            }.into()),
        }
    }

    /// Probe WAV files using the hound crate (most reliable for WAV)
    fn probe_wav(path: &Path) -> Result<AudioInfo> {
        let reader = hound::WavReader::open(path)
            .map_err(|_| AudioError::LoadFailed {
                path: path.display().to_string()
            })?;

        let spec = reader.spec();
        // duration() counts samples per channel
        let frames = reader.duration();

        Ok(AudioInfo {
            duration_secs: frames as f64 / spec.sample_rate as f64,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        })
    }

    /// Probe compressed formats using Symphonia
    fn probe_compressed(path: &Path) -> Result<AudioInfo> {
        let file = File::open(path)
            .map_err(|_| AudioError::LoadFailed {
                path: path.display().to_string()
            })?;

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create a probe hint using the file extension
        let mut hint = Hint::new();
        if let Some(extension) = path.extension() {
            if let Some(extension_str) = extension.to_str() {
                hint.with_extension(extension_str);
            }
        }

        let meta_opts: MetadataOptions = Default::default();
        let fmt_opts: FormatOptions = Default::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &fmt_opts, &meta_opts)
            .map_err(|_| AudioError::LoadFailed {
                path: path.display().to_string()
            })?;

        let mut format = probed.format;

        // Find the first audio track with a known (decodable) codec
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::LoadFailed {
                path: path.display().to_string()
            })?;

        let track_id = track.id;

        let sample_rate = track.codec_params.sample_rate
            .ok_or_else(|| AudioError::InvalidParameters {
                details: "No sample rate found".to_string()
            })?;

        let channels = track.codec_params.channels
            .ok_or_else(|| AudioError::InvalidParameters {
                details: "No channel information found".to_string()
            })?
            .count() as u16;

        // Containers usually carry the exact frame count up front
        if let Some(n_frames) = track.codec_params.n_frames {
            return Ok(AudioInfo {
                duration_secs: n_frames as f64 / sample_rate as f64,
                sample_rate,
                channels,
            });
        }

        debug!("No frame count in container metadata, decoding {:?}", path);

        let dec_opts: DecoderOptions = Default::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &dec_opts)
            .map_err(|_| AudioError::LoadFailed {
                path: path.display().to_string()
            })?;

        // Count decoded frames across the whole stream
        let mut total_frames: u64 = 0;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(SymphoniaError::IoError(_)) => break, // End of stream
                Err(_) => break,
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => total_frames += decoded.frames() as u64,
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(_) => break,
            }
        }

        if total_frames == 0 {
            return Err(AudioError::LoadFailed {
                path: path.display().to_string()
            }.into());
        }

        Ok(AudioInfo {
            duration_secs: total_frames as f64 / sample_rate as f64,
            sample_rate,
            channels,
        })
    }

    /// Detect audio format from file extension
    pub fn detect_format<P: AsRef<Path>>(path: P) -> Option<String> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Check if a file format is supported
    pub fn is_format_supported(extension: &str) -> bool {
        matches!(
            extension.to_lowercase().as_str(),
            "wav" | "mp3" | "flac" | "ogg" | "m4a" | "aac"
        )
    }
}
