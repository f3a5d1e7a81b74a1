/// Conversion between two coordinate systems.
///
/// `project` goes from the input system to the output one, `unproject` goes back. Both return
/// `None` if the conversion is not defined for the given point.
pub trait Projection {
    /// Point type of the source coordinate system.
    type InPoint;
    /// Point type of the target coordinate system.
    type OutPoint;

    /// Converts a point from the source system into the target one.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Converts a point from the target system back into the source one.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
