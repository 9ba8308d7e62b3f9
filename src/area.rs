// src/area.rs
//! Planar polygon area estimation for geographic vertex traces
//!
//! Vertices are projected with a spherical Mercator transform and summed
//! with the shoelace formula. Mercator is conformal, not equal-area, so
//! results overstate ground area by roughly `1 / cos²(latitude)`.

use crate::error::{Result, SurveyError};
use crate::geo::{GeoPoint, ProjectedPoint, Projection};
use serde::{Deserialize, Serialize};

/// Minimum vertex count of a proper polygon
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Whether the shoelace sum includes the edge from the last vertex back
/// to the first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RingClosure {
    /// Treat the trace as an open path, leaving the closing edge out.
    /// Matches the Android survey app, whose result is not a true
    /// polygon area unless the first vertex lies on a projection axis.
    Open,
    /// Close the ring for the proper shoelace area
    #[default]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum VertexValidation {
    /// Accept any vertex count; fewer than three points give 0.0
    #[default]
    Lenient,
    /// Reject traces with fewer than three vertices
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolygonAreaEstimator {
    pub closure: RingClosure,
    pub projection: Projection,
    pub validation: VertexValidation,
}

impl PolygonAreaEstimator {
    pub fn new(closure: RingClosure, projection: Projection, validation: VertexValidation) -> Self {
        Self {
            closure,
            projection,
            validation,
        }
    }

    /// Estimator reproducing the Android survey app exactly: open path,
    /// degree-scaled northing, no vertex count check
    pub fn source_compatible() -> Self {
        Self::new(RingClosure::Open, Projection::DegreeScaled, VertexValidation::Lenient)
    }

    pub fn with_closure(mut self, closure: RingClosure) -> Self {
        self.closure = closure;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_validation(mut self, validation: VertexValidation) -> Self {
        self.validation = validation;
        self
    }

    /// Estimate the unsigned area in square meters enclosed by `points`.
    ///
    /// Fails with `InvalidLatitude` when any vertex sits on or beyond a
    /// pole, with `InsufficientVertices` under strict validation, and with
    /// `AreaOverflow` when longitudes are so large the sum leaves f64 range.
    pub fn estimate_area(&self, points: &[GeoPoint]) -> Result<f64> {
        for (i, point) in points.iter().enumerate() {
            point.validate().map_err(|e| e.at_vertex(i))?;
        }

        if self.validation == VertexValidation::Strict && points.len() < MIN_POLYGON_VERTICES {
            return Err(SurveyError::InsufficientVertices {
                count: points.len(),
                required: MIN_POLYGON_VERTICES,
            });
        }

        let projected: Vec<ProjectedPoint> =
            points.iter().map(|p| self.projection.project(p)).collect();

        let area = self.shoelace(&projected);
        if !area.is_finite() {
            return Err(SurveyError::AreaOverflow {
                vertices: points.len(),
            });
        }

        Ok(area.abs())
    }

    /// Signed shoelace area; positive for counter-clockwise rings
    fn shoelace(&self, vertices: &[ProjectedPoint]) -> f64 {
        // Rings of one or two vertices enclose nothing, however large the coordinates
        if vertices.len() < 2 || (self.closure == RingClosure::Closed && vertices.len() < 3) {
            return 0.0;
        }

        let mut sum: f64 = vertices.windows(2).map(|w| w[0].cross(&w[1])).sum();

        if self.closure == RingClosure::Closed {
            if let (Some(last), Some(first)) = (vertices.last(), vertices.first()) {
                sum += last.cross(first);
            }
        }

        sum / 2.0
    }
}

/// Estimate area with the default estimator (closed ring, Web Mercator).
///
/// This is not the Android app's literal formula, whose northing carries an
/// extra 180/π factor; use [`PolygonAreaEstimator::source_compatible`] for that.
pub fn estimate_area(points: &[GeoPoint]) -> Result<f64> {
    PolygonAreaEstimator::default().estimate_area(points)
}
