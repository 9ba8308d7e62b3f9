// src/geo/mod.rs
//! Geographic coordinates and their planar projection

mod point;
mod projection;

pub use point::{GeoPoint, ProjectedPoint};
pub use projection::{Projection, EARTH_RADIUS};
