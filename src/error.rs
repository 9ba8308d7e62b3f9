// src/error.rs
//! Error types for survey plotting and area estimation

use std::fmt;

pub type Result<T> = std::result::Result<T, SurveyError>;

#[derive(Debug)]
pub enum SurveyError {
    /// Latitude outside the open interval (-90, 90), where the projection is undefined
    InvalidLatitude { index: Option<usize>, latitude: f64 },
    InvalidLongitude { index: Option<usize>, longitude: f64 },
    InsufficientVertices { count: usize, required: usize },
    /// Projected coordinates too large for the shoelace sum to stay finite
    AreaOverflow { vertices: usize },
    Io(std::io::Error),
    Json(serde_json::Error),
    Parse(String),
    Export(String),
    Other(String),
}

impl SurveyError {
    /// Attach the offending vertex position to a coordinate error
    pub fn at_vertex(self, vertex: usize) -> Self {
        match self {
            SurveyError::InvalidLatitude { latitude, .. } => SurveyError::InvalidLatitude {
                index: Some(vertex),
                latitude,
            },
            SurveyError::InvalidLongitude { longitude, .. } => SurveyError::InvalidLongitude {
                index: Some(vertex),
                longitude,
            },
            other => other,
        }
    }
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyError::InvalidLatitude { index: Some(i), latitude } => {
                write!(f, "Invalid latitude {} at vertex {}: must lie strictly within (-90, 90)", latitude, i)
            }
            SurveyError::InvalidLatitude { index: None, latitude } => {
                write!(f, "Invalid latitude {}: must lie strictly within (-90, 90)", latitude)
            }
            SurveyError::InvalidLongitude { index: Some(i), longitude } => {
                write!(f, "Invalid longitude {} at vertex {}: must be finite", longitude, i)
            }
            SurveyError::InvalidLongitude { index: None, longitude } => {
                write!(f, "Invalid longitude {}: must be finite", longitude)
            }
            SurveyError::InsufficientVertices { count, required } => {
                write!(f, "Polygon needs at least {} vertices, got {}", required, count)
            }
            SurveyError::AreaOverflow { vertices } => {
                write!(f, "Area of {} vertices overflows: coordinates are too large", vertices)
            }
            SurveyError::Io(e) => write!(f, "IO error: {}", e),
            SurveyError::Json(e) => write!(f, "JSON error: {}", e),
            SurveyError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SurveyError::Export(msg) => write!(f, "Export error: {}", msg),
            SurveyError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for SurveyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyError::Io(e) => Some(e),
            SurveyError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SurveyError {
    fn from(error: std::io::Error) -> Self {
        SurveyError::Io(error)
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(error: serde_json::Error) -> Self {
        SurveyError::Json(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_vertex_sets_index() {
        let err = SurveyError::InvalidLatitude { index: None, latitude: 90.0 }.at_vertex(3);
        assert!(matches!(err, SurveyError::InvalidLatitude { index: Some(3), .. }));
        assert_eq!(
            err.to_string(),
            "Invalid latitude 90 at vertex 3: must lie strictly within (-90, 90)"
        );
    }

    #[test]
    fn test_at_vertex_leaves_other_errors() {
        let err = SurveyError::Parse("bad".to_string()).at_vertex(1);
        assert_eq!(err.to_string(), "Parse error: bad");
    }
}
