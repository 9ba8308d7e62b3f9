// src/geo/projection.rs
//! Spherical Mercator transforms between degrees and meters

use super::{GeoPoint, ProjectedPoint};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// WGS84 semi-major axis used as the sphere radius
pub const EARTH_RADIUS: f64 = 6378137.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Projection {
    /// Standard spherical Web Mercator (EPSG:3857)
    #[default]
    WebMercator,
    /// Mercator northing divided by π/180 a second time, as the Android
    /// survey app computed it. Northings come out 180/π times too large.
    DegreeScaled,
}

impl Projection {
    /// Project a point to planar meters.
    ///
    /// Does not validate: a latitude of ±90° yields an infinite northing.
    /// Use [`GeoPoint::validate`] first.
    pub fn project(&self, point: &GeoPoint) -> ProjectedPoint {
        let x = point.longitude * (PI / 180.0) * EARTH_RADIUS;
        let northing = ((90.0 + point.latitude) * PI / 360.0).tan().ln();
        let y = match self {
            Projection::WebMercator => northing * EARTH_RADIUS,
            Projection::DegreeScaled => northing / (PI / 180.0) * EARTH_RADIUS,
        };
        ProjectedPoint::new(x, y)
    }

    /// Inverse of [`Projection::project`]
    pub fn unproject(&self, point: &ProjectedPoint) -> GeoPoint {
        let longitude = (point.x / EARTH_RADIUS).to_degrees();
        let northing = match self {
            Projection::WebMercator => point.y / EARTH_RADIUS,
            Projection::DegreeScaled => point.y * (PI / 180.0) / EARTH_RADIUS,
        };
        let latitude = northing.exp().atan() * 360.0 / PI - 90.0;
        GeoPoint::new(latitude, longitude)
    }

    pub fn display_name(&self) -> &str {
        match self {
            Projection::WebMercator => "Web Mercator",
            Projection::DegreeScaled => "Degree-scaled Mercator",
        }
    }
}
