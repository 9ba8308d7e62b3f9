// src/geo/point.rs
//! Coordinate value types

use crate::error::{Result, SurveyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check that the point can be projected.
    ///
    /// Latitude must lie strictly within (-90, 90): at the poles the
    /// Mercator northing diverges. Longitude may be any finite value and
    /// is not wrapped.
    pub fn validate(&self) -> Result<()> {
        if self.latitude.is_nan() || self.latitude.abs() >= 90.0 {
            return Err(SurveyError::InvalidLatitude {
                index: None,
                latitude: self.latitude,
            });
        }
        if !self.longitude.is_finite() {
            return Err(SurveyError::InvalidLongitude {
                index: None,
                longitude: self.longitude,
            });
        }
        Ok(())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°, {:.6}°", self.latitude, self.longitude)
    }
}

/// Planar coordinates in meters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// z component of the cross product with `other`, one shoelace term
    pub fn cross(&self, other: &ProjectedPoint) -> f64 {
        self.x * other.y - other.x * self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_regular_points() {
        assert!(GeoPoint::new(26.905734, 75.733757).validate().is_ok());
        assert!(GeoPoint::new(-89.999, 540.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_poles() {
        for lat in [90.0, -90.0, 91.5, f64::NAN, f64::INFINITY] {
            let err = GeoPoint::new(lat, 0.0).validate().unwrap_err();
            assert!(matches!(err, SurveyError::InvalidLatitude { index: None, .. }));
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_longitude() {
        let err = GeoPoint::new(10.0, f64::NEG_INFINITY).validate().unwrap_err();
        assert!(matches!(err, SurveyError::InvalidLongitude { .. }));
    }

    #[test]
    fn test_cross() {
        let a = ProjectedPoint::new(1.0, 2.0);
        let b = ProjectedPoint::new(3.0, 4.0);
        assert_eq!(a.cross(&b), -2.0);
        assert_eq!(b.cross(&a), 2.0);
    }
}
