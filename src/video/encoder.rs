use std::fs::create_dir_all;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use tracing::{debug, info, warn};

use crate::audio::Soundtrack;
use crate::config::EncoderConfig;
use crate::error::{EncodeError, Result};
use crate::video::types::{Frame, ReelParams};

/// Represents an encoded reel on disk
#[derive(Debug, Clone)]
pub struct EncodedReel {
    pub path: PathBuf,
    pub duration: f64,
    pub frame_count: usize,
    pub file_size: u64,
}

/// Drives external ffmpeg commands: one pass streaming raw frames into a
/// video-only MP4, then one pass mixing the soundtrack over it
pub struct ReelEncoder {
    params: ReelParams,
    settings: EncoderConfig,
    temp_dir: Option<PathBuf>,
}

impl ReelEncoder {
    pub fn new(params: ReelParams, settings: EncoderConfig) -> Self {
        Self {
            params,
            settings,
            temp_dir: None,
        }
    }

    pub fn check_ffmpeg_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn ensure_temp_dir(&mut self) -> Result<PathBuf> {
        if let Some(ref temp_dir) = self.temp_dir {
            return Ok(temp_dir.clone());
        }

        let temp_dir = std::env::temp_dir().join(format!("reelsmith_{}", std::process::id()));
        create_dir_all(&temp_dir)?;
        self.temp_dir = Some(temp_dir.clone());
        Ok(temp_dir)
    }

    /// Spawn the video pass; frames are streamed through the returned sink
    pub fn start_video(&mut self) -> Result<VideoSink> {
        if !Self::check_ffmpeg_available() {
            return Err(EncodeError::FfmpegMissing.into());
        }

        let temp_dir = self.ensure_temp_dir()?;
        let video_path = temp_dir.join("video_only.mp4");
        let args = video_pass_args(&self.params, &self.settings, &video_path);
        debug!("ffmpeg video pass args: {:?}", args);

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EncodeError::SpawnFailed { reason: e.to_string() })?;

        let stdin = child.stdin.take().ok_or_else(|| EncodeError::SpawnFailed {
            reason: "ffmpeg stdin was not captured".to_string(),
        })?;

        info!("Started video pass -> {:?}", video_path);

        Ok(VideoSink {
            child,
            stdin: Some(stdin),
            path: video_path,
            width: self.params.width,
            height: self.params.height,
            frames_written: 0,
        })
    }

    /// Lay the mixed soundtrack under `video` and write the final reel
    pub fn mix_soundtrack(&self, video: &Path, soundtrack: &Soundtrack, output: &Path) -> Result<()> {
        ensure_parent_dir(output)?;

        let args = mix_pass_args(&self.params, &self.settings, video, soundtrack, output);
        debug!("ffmpeg mix pass args: {:?}", args);

        let result = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| EncodeError::SpawnFailed { reason: e.to_string() })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(EncodeError::MixFailed {
                reason: stderr.trim().to_string(),
            }.into());
        }

        Ok(())
    }

    /// Stat the finished file and summarize the result
    pub fn finalize(&self, output: &Path, frame_count: usize) -> Result<EncodedReel> {
        let metadata = std::fs::metadata(output)?;

        Ok(EncodedReel {
            path: output.to_path_buf(),
            duration: self.params.duration_secs,
            frame_count,
            file_size: metadata.len(),
        })
    }

    pub fn cleanup(&mut self) -> Result<()> {
        if let Some(temp_dir) = &self.temp_dir {
            if let Err(e) = std::fs::remove_dir_all(temp_dir) {
                warn!("Failed to remove temporary directory: {}", e);
            }
            self.temp_dir = None;
        }
        Ok(())
    }
}

impl Drop for ReelEncoder {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Write side of the running video pass
///
/// Frames go straight down ffmpeg's stdin as packed RGB; `finish` closes the
/// pipe and waits for the encoder to drain.
pub struct VideoSink {
    child: Child,
    stdin: Option<ChildStdin>,
    path: PathBuf,
    width: u32,
    height: u32,
    frames_written: usize,
}

impl VideoSink {
    /// Stream one frame into the encoder
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let expected = self.width as usize * self.height as usize * 3;
        let bytes = frame.raw_bytes();
        if bytes.len() != expected {
            return Err(EncodeError::FrameMismatch {
                got: bytes.len(),
                expected,
            }.into());
        }

        let stdin = self.stdin.as_mut().ok_or_else(|| EncodeError::EncodingFailed {
            reason: "video sink already finished".to_string(),
        })?;

        stdin.write_all(bytes).map_err(|e| EncodeError::EncodingFailed {
            reason: format!("writing frame to ffmpeg stdin: {}", e),
        })?;

        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Close the pipe, wait for ffmpeg, and hand back the video-only file
    pub fn finish(mut self) -> Result<(PathBuf, usize)> {
        // Closing stdin signals end of stream
        drop(self.stdin.take());

        let output = self.child.wait_with_output().map_err(|e| EncodeError::EncodingFailed {
            reason: format!("waiting for ffmpeg: {}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EncodeError::EncodingFailed {
                reason: format!("ffmpeg exited with {}: {}", output.status, stderr.trim()),
            }.into());
        }

        Ok((self.path, self.frames_written))
    }
}

fn video_pass_args(params: &ReelParams, settings: &EncoderConfig, output: &Path) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    args.extend(["-hide_banner", "-loglevel", "error", "-y"].map(String::from));
    // Raw RGB frames arrive on stdin
    args.extend(["-f", "rawvideo", "-pix_fmt", "rgb24"].map(String::from));
    args.extend(["-s".to_string(), format!("{}x{}", params.width, params.height)]);
    args.extend(["-r".to_string(), params.fps.to_string()]);
    args.extend(["-i", "pipe:0", "-an"].map(String::from));
    args.extend(["-c:v".to_string(), settings.video_codec.clone()]);
    args.extend(["-pix_fmt", "yuv420p"].map(String::from));
    args.extend(["-crf".to_string(), quality_to_crf(settings.quality).to_string()]);
    args.push(output.display().to_string());
    args
}

fn mix_pass_args(
    params: &ReelParams,
    settings: &EncoderConfig,
    video: &Path,
    soundtrack: &Soundtrack,
    output: &Path,
) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    args.extend(["-hide_banner", "-loglevel", "error", "-y"].map(String::from));
    args.extend(["-i".to_string(), video.display().to_string()]);
    args.extend(["-i".to_string(), soundtrack.voiceover.display().to_string()]);
    if soundtrack.loop_music {
        // -stream_loop applies to the next input only
        args.extend(["-stream_loop", "-1"].map(String::from));
    }
    args.extend(["-i".to_string(), soundtrack.music.display().to_string()]);
    args.extend([
        "-filter_complex".to_string(),
        build_mix_filter(soundtrack.voiceover_volume, soundtrack.music_volume),
    ]);
    args.extend(["-map", "0:v:0", "-map", "[mix]", "-c:v", "copy"].map(String::from));
    args.extend(["-c:a".to_string(), settings.audio_codec.clone()]);
    args.extend(["-t".to_string(), format!("{:.3}", params.duration_secs)]);
    if settings.faststart {
        args.extend(["-movflags", "+faststart"].map(String::from));
    }
    args.push(output.display().to_string());
    args
}

// Gain both inputs, then mix without renormalizing so the configured
// volumes survive the amix stage.
fn build_mix_filter(voiceover_volume: f32, music_volume: f32) -> String {
    format!(
        "[1:a]volume={}[vo];[2:a]volume={}[bg];[vo][bg]amix=inputs=2:duration=longest:normalize=0[mix]",
        voiceover_volume, music_volume
    )
}

fn quality_to_crf(quality: u8) -> u8 {
    (51 - ((quality as f32 / 100.0) * 51.0) as u8).clamp(0, 51)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MixConfig;

    fn soundtrack(loop_music: bool) -> Soundtrack {
        Soundtrack::new(
            "voice.mp3",
            "music.mp3",
            &MixConfig {
                voiceover_volume: 1.0,
                music_volume: 0.1,
                loop_music,
            },
        )
    }

    #[test]
    fn test_quality_maps_to_crf() {
        assert_eq!(quality_to_crf(100), 0);
        assert_eq!(quality_to_crf(85), 8);
        assert_eq!(quality_to_crf(0), 51);
    }

    #[test]
    fn test_mix_filter_shape() {
        let filter = build_mix_filter(1.0, 0.1);
        assert_eq!(
            filter,
            "[1:a]volume=1[vo];[2:a]volume=0.1[bg];[vo][bg]amix=inputs=2:duration=longest:normalize=0[mix]"
        );
    }

    #[test]
    fn test_video_pass_args() {
        let params = ReelParams::default();
        let settings = EncoderConfig::default();
        let args = video_pass_args(&params, &settings, Path::new("video_only.mp4"));

        assert!(args.contains(&"rawvideo".to_string()));
        assert!(args.contains(&"rgb24".to_string()));
        assert!(args.contains(&"1080x1920".to_string()));
        assert!(args.contains(&"pipe:0".to_string()));
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"yuv420p".to_string()));
        assert_eq!(args.last(), Some(&"video_only.mp4".to_string()));
    }

    #[test]
    fn test_mix_pass_args_without_looping() {
        let params = ReelParams::default();
        let settings = EncoderConfig::default();
        let args = mix_pass_args(
            &params,
            &settings,
            Path::new("video_only.mp4"),
            &soundtrack(false),
            Path::new("reel.mp4"),
        );

        assert!(!args.contains(&"-stream_loop".to_string()));
        assert!(args.contains(&"-t".to_string()));
        assert!(args.contains(&"15.000".to_string()));
        assert!(args.contains(&"+faststart".to_string()));
        assert_eq!(args.last(), Some(&"reel.mp4".to_string()));
    }

    #[test]
    fn test_mix_pass_args_loops_only_the_music_input() {
        let params = ReelParams::default();
        let settings = EncoderConfig::default();
        let args = mix_pass_args(
            &params,
            &settings,
            Path::new("video_only.mp4"),
            &soundtrack(true),
            Path::new("reel.mp4"),
        );

        let loop_at = args.iter().position(|a| a == "-stream_loop").unwrap();
        assert_eq!(args[loop_at + 1], "-1");
        // The flag must sit immediately before the music input
        assert_eq!(args[loop_at + 2], "-i");
        assert_eq!(args[loop_at + 3], "music.mp3");
    }

    #[test]
    fn test_faststart_is_optional() {
        let params = ReelParams::default();
        let settings = EncoderConfig {
            faststart: false,
            ..EncoderConfig::default()
        };
        let args = mix_pass_args(
            &params,
            &settings,
            Path::new("video_only.mp4"),
            &soundtrack(false),
            Path::new("reel.mp4"),
        );

        assert!(!args.contains(&"-movflags".to_string()));
    }
}
