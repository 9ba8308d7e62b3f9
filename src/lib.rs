// src/lib.rs
//! Survey Area Library
//!
//! Polygon area estimation for traces built by dragging map markers,
//! plus survey point click resolution and trace export.

pub mod area;
pub mod config;
pub mod error;
pub mod export;
pub mod geo;
pub mod input;
pub mod logging;
pub mod report;
pub mod survey;
pub mod trace;

// Re-export main types for convenience
pub use area::{estimate_area, PolygonAreaEstimator, RingClosure, VertexValidation};
pub use error::{Result, SurveyError};
pub use geo::{GeoPoint, ProjectedPoint, Projection};
pub use report::{AreaReport, AreaSink, MemorySink, TracingSink};
pub use trace::{DragTrace, MarkerDragListener};
