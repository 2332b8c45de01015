use std::ops::Range;

use rayon::prelude::*;

use crate::pan::PanWindow;
use crate::video::types::Frame;

/// Renders the frames of one slide by sliding a crop window across it
///
/// Frame `k` of an `n`-frame clip uses progress `k / n`, so the window
/// covers `[0, 1)` and the final origin of one slide never repeats as the
/// first origin of the next.
pub struct PanSampler<'a> {
    image: &'a Frame,
    window: PanWindow,
    frame_count: usize,
}

impl<'a> PanSampler<'a> {
    pub fn new(image: &'a Frame, window: PanWindow, frame_count: usize) -> Self {
        Self { image, window, frame_count }
    }

    /// Number of frames this sampler produces
    pub fn len(&self) -> usize {
        self.frame_count
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Render frame `index` of the clip
    pub fn frame_at(&self, index: usize) -> Frame {
        let progress = index as f64 / self.frame_count.max(1) as f64;
        let (x, y) = self.window.origin_at(progress);
        self.image.crop(x, y, self.window.view_width(), self.window.view_height())
    }

    /// Render a chunk of frames in parallel, returned in clip order
    pub fn render_range(&self, range: Range<usize>) -> Vec<Frame> {
        range
            .into_par_iter()
            .map(|index| self.frame_at(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pan::PanDirection;

    // 8x4 image whose pixels encode their own x coordinate, so crops reveal
    // exactly where the window sat.
    fn gradient_image() -> Frame {
        let mut frame = Frame::new_filled(8, 4, [0, 0, 0]);
        for y in 0..4 {
            for x in 0..8 {
                frame.set_pixel(x, y, [x as u8, 0, 0]);
            }
        }
        frame
    }

    #[test]
    fn test_left_to_right_sweep() {
        let image = gradient_image();
        let window = PanWindow::new(8, 4, 4, 4, PanDirection::LeftToRight);
        let sampler = PanSampler::new(&image, window, 4);

        // max_x = 4; progress k/4 gives origins 0, 1, 2, 3
        assert_eq!(sampler.frame_at(0).get_pixel(0, 0), [0, 0, 0]);
        assert_eq!(sampler.frame_at(1).get_pixel(0, 0), [1, 0, 0]);
        assert_eq!(sampler.frame_at(2).get_pixel(0, 0), [2, 0, 0]);
        assert_eq!(sampler.frame_at(3).get_pixel(0, 0), [3, 0, 0]);
    }

    #[test]
    fn test_right_to_left_sweep_starts_at_the_far_edge() {
        let image = gradient_image();
        let window = PanWindow::new(8, 4, 4, 4, PanDirection::RightToLeft);
        let sampler = PanSampler::new(&image, window, 4);

        assert_eq!(sampler.frame_at(0).get_pixel(0, 0), [4, 0, 0]);
        assert_eq!(sampler.frame_at(3).get_pixel(0, 0), [1, 0, 0]);
    }

    #[test]
    fn test_output_frames_match_the_view() {
        let image = gradient_image();
        let window = PanWindow::new(8, 4, 4, 4, PanDirection::LeftToRight);
        let sampler = PanSampler::new(&image, window, 10);

        let frame = sampler.frame_at(5);
        assert_eq!((frame.width(), frame.height()), (4, 4));
    }

    #[test]
    fn test_render_range_preserves_order() {
        let image = gradient_image();
        let window = PanWindow::new(8, 4, 4, 4, PanDirection::LeftToRight);
        let sampler = PanSampler::new(&image, window, 4);

        let frames = sampler.render_range(0..4);
        assert_eq!(frames.len(), 4);
        for (index, frame) in frames.iter().enumerate() {
            assert_eq!(frame.get_pixel(0, 0), [index as u8, 0, 0]);
        }
    }

    #[test]
    fn test_single_frame_clip_is_static() {
        let image = gradient_image();
        let window = PanWindow::new(8, 4, 4, 4, PanDirection::RightToLeft);
        let sampler = PanSampler::new(&image, window, 1);

        // progress 0 for the only frame; right-to-left starts at max_x
        assert_eq!(sampler.frame_at(0).get_pixel(0, 0), [4, 0, 0]);
        assert_eq!(sampler.len(), 1);
        assert!(!sampler.is_empty());
    }
}
