//! Projections needed to bring the local grid onto the map.
mod helmert;
mod rd_new;
mod stereographic;

pub use helmert::HelmertTransform;
pub use rd_new::RdNew;
pub use stereographic::ObliqueStereographic;
