use image::{imageops, ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Represents a single video frame
///
/// This is a simple wrapper around an RGB image buffer that provides
/// convenient methods for cropping and raw byte access used by the
/// pan sampler and the encoder pipe.
#[derive(Clone, Debug)]
pub struct Frame {
    buffer: RgbImage,
}

impl Frame {
    /// Create a new frame from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| {
            Rgb(color)
        });
        Self { buffer }
    }

    /// Get the width of the frame
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Get the height of the frame
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let pixel = self.buffer.get_pixel(x, y);
        [pixel[0], pixel[1], pixel[2]]
    }

    /// Set a pixel at the given coordinates
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        self.buffer.put_pixel(x, y, Rgb(color));
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Raw packed RGB bytes, row-major, as the rawvideo pipe expects them
    pub fn raw_bytes(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Copy a `width` x `height` window with its top-left corner at (x, y)
    ///
    /// The window must lie fully inside the frame.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Frame {
        Frame::new(imageops::crop_imm(&self.buffer, x, y, width, height).to_image())
    }
}

/// Represents one source still image with metadata
#[derive(Debug, Clone)]
pub struct Slide {
    /// Path to the image file
    pub path: PathBuf,

    /// Position in the reel (from the sorted directory listing)
    pub index: usize,

    /// Name/identifier for the slide
    pub name: String,
}

impl Slide {
    /// Create a new slide, deriving the name from the file stem
    pub fn new<P: Into<PathBuf>>(path: P, index: usize) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("slide")
            .to_string();

        Self { path, index, name }
    }
}

/// Output geometry and timing for a reel
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReelParams {
    /// Output frame width in pixels
    pub width: u32,

    /// Output frame height in pixels
    pub height: u32,

    /// Target frame rate for output
    pub fps: u32,

    /// Total reel length in seconds
    pub duration_secs: f64,
}

impl Default for ReelParams {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
            duration_secs: 15.0,
        }
    }
}

impl ReelParams {
    /// Total number of frames in the reel
    pub fn frame_count(&self) -> usize {
        (self.duration_secs * self.fps as f64).round() as usize
    }

    /// Length of a single frame in seconds
    pub fn frame_duration(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Target resolution (width, height)
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
