//! # Pan Effect System
//!
//! Gives each still image the illusion of motion by sliding a fixed-size
//! crop window across it over the lifetime of its clip.
//!
//! ## Directions
//!
//! - **LeftToRight / RightToLeft**: horizontal sweep, vertical axis centered
//! - **TopToBottom / BottomToTop**: vertical sweep, horizontal axis centered
//!
//! ## Usage
//!
//! ```rust
//! use reelsmith::pan::{PanDirection, PanWindow};
//!
//! let window = PanWindow::new(2560, 1920, 1080, 1920, PanDirection::LeftToRight);
//! assert_eq!(window.origin_at(0.0), (0, 0));
//! assert_eq!(window.origin_at(0.5), (740, 0));
//! ```

pub mod direction;
pub mod planner;
pub mod window;

// Re-exports for convenience
pub use direction::{PanDirection, PanSelection};
pub use planner::PanPlanner;
pub use window::PanWindow;
