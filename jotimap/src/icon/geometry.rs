use serde::{Deserialize, Serialize};

/// Pixel dimensions of a marker icon and its shadow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconGeometry {
    /// Icon width and height.
    pub icon_size: [f64; 2],
    /// Point of the icon placed at the marker position, from the top-left corner.
    pub icon_anchor: [f64; 2],
    /// Point from which popups open, relative to the icon anchor.
    pub popup_anchor: [f64; 2],
    /// Shadow width and height.
    pub shadow_size: [f64; 2],
}

impl IconGeometry {
    /// Geometry of the full size pin image.
    pub const BASE: IconGeometry = IconGeometry {
        icon_size: [25.0, 41.0],
        icon_anchor: [12.0, 41.0],
        popup_anchor: [1.0, -34.0],
        shadow_size: [41.0, 41.0],
    };

    /// Returns the geometry with every dimension multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |[x, y]: [f64; 2]| [x * factor, y * factor];
        Self {
            icon_size: scale(self.icon_size),
            icon_anchor: scale(self.icon_anchor),
            popup_anchor: scale(self.popup_anchor),
            shadow_size: scale(self.shadow_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_is_uniform() {
        let half = IconGeometry::BASE.scaled(0.5);
        assert_eq!(half.icon_size, [12.5, 20.5]);
        assert_eq!(half.icon_anchor, [6.0, 20.5]);
        assert_eq!(half.popup_anchor, [0.5, -17.0]);
        assert_eq!(half.shadow_size, [20.5, 20.5]);

        assert_eq!(IconGeometry::BASE.scaled(1.0), IconGeometry::BASE);
    }
}
