//! Visual style of the markers: area colors, size tiers and icon geometry.

mod area;
mod catalog;
mod geometry;

pub use area::Area;
pub use catalog::{Icon, IconCatalog};
pub use geometry::IconGeometry;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Marker color. Names follow the `leaflet-color-markers` icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    /// Blue.
    Blue,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Orange.
    Orange,
    /// Yellow.
    Yellow,
    /// Violet.
    Violet,
    /// Grey, used for everything without a known area.
    #[serde(alias = "gray")]
    Grey,
}

impl MarkerColor {
    /// Color used when the area is not known.
    pub const FALLBACK: MarkerColor = MarkerColor::Grey;

    /// Name of the color as used in icon file names.
    pub fn name(&self) -> &'static str {
        match self {
            MarkerColor::Blue => "blue",
            MarkerColor::Red => "red",
            MarkerColor::Green => "green",
            MarkerColor::Orange => "orange",
            MarkerColor::Yellow => "yellow",
            MarkerColor::Violet => "violet",
            MarkerColor::Grey => "grey",
        }
    }

    /// RGB value matching the marker image, for drawing lines in the same color.
    pub const fn to_color(&self) -> Color {
        match self {
            MarkerColor::Blue => Color::from_hex("#2A81CB"),
            MarkerColor::Red => Color::from_hex("#CB2B3E"),
            MarkerColor::Green => Color::from_hex("#2AAD27"),
            MarkerColor::Orange => Color::from_hex("#CB8427"),
            MarkerColor::Yellow => Color::from_hex("#CAC428"),
            MarkerColor::Violet => Color::from_hex("#9C2BCB"),
            MarkerColor::Grey => Color::from_hex("#7B7B7B"),
        }
    }
}

/// Size of a marker icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeTier {
    /// Full size, used for emphasized (most recent) entities.
    Full,
    /// Half size, used for everything else.
    Reduced,
}

impl SizeTier {
    /// Tier for the given emphasis flag.
    pub fn for_emphasis(emphasis: bool) -> Self {
        if emphasis {
            SizeTier::Full
        } else {
            SizeTier::Reduced
        }
    }

    /// Factor applied to all icon dimensions.
    pub fn scale(&self) -> f64 {
        match self {
            SizeTier::Full => 1.0,
            SizeTier::Reduced => 0.5,
        }
    }
}

/// Resolved look of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    /// Marker color.
    pub color: MarkerColor,
    /// Marker size.
    pub size: SizeTier,
}
