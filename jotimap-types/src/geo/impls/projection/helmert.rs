use nalgebra::{Matrix3, Vector3};

const ARC_SECOND: f64 = std::f64::consts::PI / 180.0 / 3600.0;

/// Seven-parameter similarity transformation between two earth-centered cartesian frames
/// (position vector convention, as used by `towgs84` definitions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelmertTransform {
    translation: Vector3<f64>,
    rotation: Matrix3<f64>,
    inverse_rotation: Matrix3<f64>,
    scale: f64,
}

impl HelmertTransform {
    /// Creates the transform. Translation is in metres, rotations in arc-seconds and the scale
    /// difference in parts per million.
    pub fn new(translation: [f64; 3], rotation: [f64; 3], scale_ppm: f64) -> Self {
        // Small angle rotation: identity plus the skew matrix of the angles.
        let angles = Vector3::from(rotation.map(|r| r * ARC_SECOND));
        let rotation = Matrix3::identity() + angles.cross_matrix();
        let inverse_rotation = rotation
            .try_inverse()
            .unwrap_or_else(|| rotation.transpose());

        Self {
            translation: Vector3::from(translation),
            rotation,
            inverse_rotation,
            scale: 1.0 + scale_ppm * 1e-6,
        }
    }

    /// Transforms a point from the source frame into the target frame.
    pub fn forward(&self, xyz: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * xyz * self.scale + self.translation
    }

    /// Transforms a point from the target frame back into the source frame.
    pub fn inverse(&self, xyz: &Vector3<f64>) -> Vector3<f64> {
        self.inverse_rotation * ((xyz - self.translation) / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn translation_only() {
        let transform = HelmertTransform::new([10.0, -5.0, 2.5], [0.0; 3], 0.0);
        let shifted = transform.forward(&Vector3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(shifted, Vector3::new(11.0, -3.0, 5.5), epsilon = 1e-12);
    }

    #[test]
    fn inverse_undoes_forward() {
        let transform = HelmertTransform::new(
            [565.417, 50.3319, 465.552],
            [-0.398957, 0.343988, -1.8774],
            4.0725,
        );
        let source = Vector3::new(3_904_000.0, 368_000.0, 5_012_000.0);
        let back = transform.inverse(&transform.forward(&source));

        assert_abs_diff_eq!(back, source, epsilon = 1e-6);
    }
}
