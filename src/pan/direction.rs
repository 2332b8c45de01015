use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Direction the crop window travels across a still image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanDirection {
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl PanDirection {
    /// The horizontal directions, the default pool for random choices
    pub const HORIZONTAL: [PanDirection; 2] =
        [PanDirection::LeftToRight, PanDirection::RightToLeft];

    /// Every direction, used when vertical pans are allowed
    pub const ALL: [PanDirection; 4] = [
        PanDirection::LeftToRight,
        PanDirection::RightToLeft,
        PanDirection::TopToBottom,
        PanDirection::BottomToTop,
    ];

    /// Whether the window travels along the horizontal axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, PanDirection::LeftToRight | PanDirection::RightToLeft)
    }
}

impl fmt::Display for PanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PanDirection::LeftToRight => "left-to-right",
            PanDirection::RightToLeft => "right-to-left",
            PanDirection::TopToBottom => "top-to-bottom",
            PanDirection::BottomToTop => "bottom-to-top",
        };
        write!(f, "{}", name)
    }
}

/// Operator-facing pan choice: a fixed direction, or a fresh random pick per slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PanSelection {
    /// Choose a direction at random for every slide
    Auto,
    /// Always pan left to right
    LeftToRight,
    /// Always pan right to left
    RightToLeft,
    /// Always pan top to bottom
    TopToBottom,
    /// Always pan bottom to top
    BottomToTop,
}

impl PanSelection {
    /// The fixed direction this selection pins, if any
    pub fn fixed_direction(&self) -> Option<PanDirection> {
        match self {
            PanSelection::Auto => None,
            PanSelection::LeftToRight => Some(PanDirection::LeftToRight),
            PanSelection::RightToLeft => Some(PanDirection::RightToLeft),
            PanSelection::TopToBottom => Some(PanDirection::TopToBottom),
            PanSelection::BottomToTop => Some(PanDirection::BottomToTop),
        }
    }
}
