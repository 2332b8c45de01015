use crate::pan::PanDirection;

/// Fixed-size crop window that slides across a source image
///
/// Progress 0.0 places the window at the start of its travel and 1.0 at the
/// end. The off-axis coordinate stays centered over the slack the source
/// leaves on that axis. Origins are clamped so the window never leaves the
/// image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanWindow {
    view_width: u32,
    view_height: u32,
    max_x: u32,
    max_y: u32,
    direction: PanDirection,
}

impl PanWindow {
    /// Create a window over an `image_width` x `image_height` source
    ///
    /// The source is expected to be at least as large as the view on both
    /// axes; the travel range saturates to zero when it is not.
    pub fn new(
        image_width: u32,
        image_height: u32,
        view_width: u32,
        view_height: u32,
        direction: PanDirection,
    ) -> Self {
        Self {
            view_width,
            view_height,
            max_x: image_width.saturating_sub(view_width),
            max_y: image_height.saturating_sub(view_height),
            direction,
        }
    }

    pub fn direction(&self) -> PanDirection {
        self.direction
    }

    pub fn view_width(&self) -> u32 {
        self.view_width
    }

    pub fn view_height(&self) -> u32 {
        self.view_height
    }

    /// Top-left corner of the window at `progress`
    ///
    /// Progress outside 0.0..=1.0 clamps to the ends of the travel range.
    pub fn origin_at(&self, progress: f64) -> (u32, u32) {
        match self.direction {
            PanDirection::LeftToRight => (travel(self.max_x, progress), self.max_y / 2),
            PanDirection::RightToLeft => (travel(self.max_x, 1.0 - progress), self.max_y / 2),
            PanDirection::TopToBottom => (self.max_x / 2, travel(self.max_y, progress)),
            PanDirection::BottomToTop => (self.max_x / 2, travel(self.max_y, 1.0 - progress)),
        }
    }
}

// Linear travel along one axis, truncated and clamped to 0..=span. Negative
// progress saturates to zero through the cast.
fn travel(span: u32, progress: f64) -> u32 {
    ((progress * span as f64) as u32).min(span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_to_right_travel() {
        let window = PanWindow::new(2000, 1920, 1080, 1920, PanDirection::LeftToRight);
        assert_eq!(window.origin_at(0.0), (0, 0));
        assert_eq!(window.origin_at(0.5), (460, 0));
        assert_eq!(window.origin_at(1.0), (920, 0));
    }

    #[test]
    fn test_right_to_left_mirrors_travel() {
        let window = PanWindow::new(2000, 1920, 1080, 1920, PanDirection::RightToLeft);
        assert_eq!(window.origin_at(0.0), (920, 0));
        assert_eq!(window.origin_at(0.5), (460, 0));
        assert_eq!(window.origin_at(1.0), (0, 0));
    }

    #[test]
    fn test_vertical_travel_keeps_x_centered() {
        let window = PanWindow::new(1080, 3000, 1080, 1920, PanDirection::TopToBottom);
        assert_eq!(window.origin_at(0.0), (0, 0));
        assert_eq!(window.origin_at(0.5), (0, 540));
        assert_eq!(window.origin_at(1.0), (0, 1080));
    }

    #[test]
    fn test_off_axis_is_centered() {
        let window = PanWindow::new(2000, 2000, 1080, 1920, PanDirection::LeftToRight);
        assert_eq!(window.origin_at(0.0), (0, 40));
        assert_eq!(window.origin_at(1.0), (920, 40));
    }

    #[test]
    fn test_exact_fit_never_moves() {
        let window = PanWindow::new(1080, 1920, 1080, 1920, PanDirection::LeftToRight);
        assert_eq!(window.origin_at(0.0), (0, 0));
        assert_eq!(window.origin_at(0.5), (0, 0));
        assert_eq!(window.origin_at(1.0), (0, 0));
    }

    #[test]
    fn test_out_of_range_progress_clamps() {
        let window = PanWindow::new(2000, 1920, 1080, 1920, PanDirection::LeftToRight);
        assert_eq!(window.origin_at(1.5), (920, 0));
        assert_eq!(window.origin_at(-0.5), (0, 0));
    }

    #[test]
    fn test_travel_is_monotonic() {
        let window = PanWindow::new(3000, 1920, 1080, 1920, PanDirection::LeftToRight);
        let mut last = 0;
        for step in 0..=100 {
            let (x, _) = window.origin_at(step as f64 / 100.0);
            assert!(x >= last);
            last = x;
        }
    }
}
