use std::path::Path;

use image::imageops::{self, FilterType};
use tracing::{debug, info};

use crate::error::{ImageError, Result};
use crate::video::types::{Frame, ReelParams, Slide};

/// Finds still images and prepares them for panning
pub struct SlideLoader;

impl SlideLoader {
    /// Scan `directory` for supported images, sorted by filename
    ///
    /// Hidden files are skipped. At most `max_slides` paths survive; the
    /// lexicographic ordering decides which ones.
    pub fn discover<P: AsRef<Path>>(directory: P, max_slides: usize) -> Result<Vec<Slide>> {
        let directory = directory.as_ref();

        if !directory.exists() || !directory.is_dir() {
            return Err(ImageError::NoImagesFound {
                path: directory.display().to_string(),
            }.into());
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let path = entry?.path();

            if path.is_file() && !Self::is_hidden_file(&path) && Self::is_supported(&path) {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(ImageError::NoImagesFound {
                path: directory.display().to_string(),
            }.into());
        }

        // Directory listing order is filesystem-dependent; sort for stable reels
        paths.sort();

        if paths.len() > max_slides {
            debug!("Found {} images, keeping the first {}", paths.len(), max_slides);
            paths.truncate(max_slides);
        }

        let slides: Vec<Slide> = paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| Slide::new(path, index))
            .collect();

        info!("Discovered {} slide(s)", slides.len());
        Ok(slides)
    }

    /// Decode a slide and resize it to cover the output frame
    ///
    /// The result is never smaller than the frame on either axis, so a pan
    /// window always fits.
    pub fn load_cover(slide: &Slide, params: &ReelParams) -> Result<Frame> {
        let decoded = image::open(&slide.path).map_err(|_| ImageError::LoadFailed {
            path: slide.path.display().to_string(),
        })?;

        let source = decoded.to_rgb8();
        let (source_width, source_height) = source.dimensions();
        if source_width == 0 || source_height == 0 {
            return Err(ImageError::InvalidDimensions {
                path: slide.path.display().to_string(),
                width: source_width,
                height: source_height,
            }.into());
        }

        let scale = f64::max(
            params.width as f64 / source_width as f64,
            params.height as f64 / source_height as f64,
        );
        // Rounding can land one pixel short of the frame; the max() picks it back up
        let target_width = ((source_width as f64 * scale).round() as u32).max(params.width);
        let target_height = ((source_height as f64 * scale).round() as u32).max(params.height);

        let resized = if (target_width, target_height) == (source_width, source_height) {
            source
        } else {
            imageops::resize(&source, target_width, target_height, FilterType::Lanczos3)
        };

        debug!(
            "Prepared slide {}: {}x{} -> {}x{}",
            slide.name, source_width, source_height, target_width, target_height
        );

        Ok(Frame::new(resized))
    }

    pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) => matches!(
                ext.to_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "webp"
            ),
            None => false,
        }
    }

    fn is_hidden_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbImage::new(width, height).save(path).unwrap();
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"jpg").unwrap();
        std::fs::write(dir.path().join("a.png"), b"png").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"text").unwrap();
        std::fs::write(dir.path().join(".hidden.png"), b"png").unwrap();

        let slides = SlideLoader::discover(dir.path(), 4).unwrap();
        let names: Vec<&str> = slides.iter().map(|slide| slide.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(slides[0].index, 0);
        assert_eq!(slides[1].index, 1);
    }

    #[test]
    fn test_discover_caps_slide_count() {
        let dir = tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png", "d.png", "e.png"] {
            std::fs::write(dir.path().join(name), b"png").unwrap();
        }

        let slides = SlideLoader::discover(dir.path(), 4).unwrap();
        assert_eq!(slides.len(), 4);
        assert_eq!(slides.last().unwrap().name, "d");
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();
        let result = SlideLoader::discover(dir.path(), 4);
        assert!(result.is_err());
    }

    #[test]
    fn test_supported_extensions() {
        assert!(SlideLoader::is_supported("photo.PNG"));
        assert!(SlideLoader::is_supported("photo.webp"));
        assert!(!SlideLoader::is_supported("clip.mp4"));
        assert!(!SlideLoader::is_supported("no_extension"));
    }

    #[test]
    fn test_load_cover_upscales_to_cover_the_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.png");
        write_png(&path, 4, 3);

        let params = ReelParams { width: 6, height: 10, fps: 30, duration_secs: 1.0 };
        let frame = SlideLoader::load_cover(&Slide::new(path, 0), &params).unwrap();

        // Height is the binding axis: 3 -> 10 scales width 4 -> 13
        assert_eq!((frame.width(), frame.height()), (13, 10));
        assert!(frame.width() >= params.width);
        assert!(frame.height() >= params.height);
    }

    #[test]
    fn test_load_cover_keeps_exact_fit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exact.png");
        write_png(&path, 6, 10);

        let params = ReelParams { width: 6, height: 10, fps: 30, duration_secs: 1.0 };
        let frame = SlideLoader::load_cover(&Slide::new(path, 0), &params).unwrap();
        assert_eq!((frame.width(), frame.height()), (6, 10));
    }

    #[test]
    fn test_load_cover_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let result = SlideLoader::load_cover(&Slide::new(path, 0), &ReelParams::default());
        assert!(result.is_err());
    }
}
