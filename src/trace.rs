// src/trace.rs
//! Vertex trace built from marker drag events

use crate::{
    area::PolygonAreaEstimator,
    error::Result,
    geo::GeoPoint,
    report::{AreaReport, AreaSink, TracingSink},
};

/// Callbacks fired by the map while a marker is being dragged
pub trait MarkerDragListener {
    fn on_marker_drag_start(&mut self, _position: GeoPoint) {}

    fn on_marker_drag(&mut self, _position: GeoPoint) {}

    /// Called once the marker is released; returns the updated area
    fn on_marker_drag_end(&mut self, position: GeoPoint) -> Result<f64>;
}

/// Polygon boundary traced by dropping a marker at each vertex.
///
/// Points accumulate across drags until [`DragTrace::reset`] is called.
pub struct DragTrace<S: AreaSink = TracingSink> {
    points: Vec<GeoPoint>,
    estimator: PolygonAreaEstimator,
    sink: S,
}

impl DragTrace<TracingSink> {
    pub fn new(estimator: PolygonAreaEstimator) -> Self {
        Self::with_sink(estimator, TracingSink)
    }
}

impl Default for DragTrace<TracingSink> {
    fn default() -> Self {
        Self::new(PolygonAreaEstimator::default())
    }
}

impl<S: AreaSink> DragTrace<S> {
    pub fn with_sink(estimator: PolygonAreaEstimator, sink: S) -> Self {
        Self {
            points: Vec::new(),
            estimator,
            sink,
        }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn estimator(&self) -> &PolygonAreaEstimator {
        &self.estimator
    }

    /// Area of the current trace, without notifying the sink
    pub fn area(&self) -> Result<f64> {
        self.estimator.estimate_area(&self.points)
    }

    /// Report for the current trace, without notifying the sink
    pub fn report(&self) -> Result<AreaReport> {
        Ok(AreaReport {
            vertices: self.points.len(),
            square_meters: self.area()?,
            closure: self.estimator.closure,
        })
    }

    /// Start a new polygon, discarding every recorded vertex
    pub fn reset(&mut self) {
        tracing::debug!(discarded = self.points.len(), "Trace reset");
        self.points.clear();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: AreaSink> MarkerDragListener for DragTrace<S> {
    fn on_marker_drag_end(&mut self, position: GeoPoint) -> Result<f64> {
        // Reject before appending so the trace never holds an unprojectable vertex
        if let Err(e) = position.validate() {
            let e = e.at_vertex(self.points.len());
            tracing::warn!(%position, "Rejected dragged marker: {}", e);
            return Err(e);
        }

        self.points.push(position);
        let report = match self.report() {
            Ok(report) => report,
            Err(e) => {
                self.points.pop();
                tracing::warn!(%position, "Rejected dragged marker: {}", e);
                return Err(e);
            }
        };
        self.sink.report(&report);
        Ok(report.square_meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{area::RingClosure, error::SurveyError, report::MemorySink};
    use approx::assert_relative_eq;

    fn trace() -> DragTrace<MemorySink> {
        DragTrace::with_sink(PolygonAreaEstimator::default(), MemorySink::new())
    }

    fn triangle() -> [GeoPoint; 3] {
        [
            GeoPoint::new(26.905734, 75.733757),
            GeoPoint::new(26.905964, 75.735688),
            GeoPoint::new(26.905619, 75.742855),
        ]
    }

    #[test]
    fn test_drag_end_appends_and_reports() {
        let mut trace = trace();
        let [a, b, c] = triangle();

        assert_eq!(trace.on_marker_drag_end(a).unwrap(), 0.0);
        assert_eq!(trace.on_marker_drag_end(b).unwrap(), 0.0);
        let area = trace.on_marker_drag_end(c).unwrap();

        assert!(area > 0.0);
        assert_eq!(trace.points(), &[a, b, c]);

        let reports = trace.sink().reports();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].vertices, 3);
        assert_eq!(reports[2].closure, RingClosure::Closed);
        assert_relative_eq!(reports[2].square_meters, area);
    }

    #[test]
    fn test_drag_start_and_move_are_ignored() {
        let mut trace = trace();
        trace.on_marker_drag_start(GeoPoint::new(1.0, 1.0));
        trace.on_marker_drag(GeoPoint::new(1.5, 1.5));
        assert!(trace.is_empty());
        assert!(trace.sink().reports().is_empty());
    }

    #[test]
    fn test_trace_accumulates_until_reset() {
        let mut trace = trace();
        for point in triangle() {
            trace.on_marker_drag_end(point).unwrap();
        }
        // A second drag session keeps appending to the same trace
        trace.on_marker_drag_end(GeoPoint::new(26.90, 75.74)).unwrap();
        assert_eq!(trace.len(), 4);

        trace.reset();
        assert!(trace.is_empty());
        assert_eq!(trace.area().unwrap(), 0.0);

        trace.on_marker_drag_end(GeoPoint::new(26.90, 75.74)).unwrap();
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_invalid_position_is_not_appended() {
        let mut trace = trace();
        let [a, b, _] = triangle();
        trace.on_marker_drag_end(a).unwrap();
        trace.on_marker_drag_end(b).unwrap();

        let err = trace.on_marker_drag_end(GeoPoint::new(90.0, 75.0)).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidLatitude { index: Some(2), .. }));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.sink().reports().len(), 2);
    }

    #[test]
    fn test_overflowing_position_is_rolled_back() {
        let mut trace = trace();
        trace.on_marker_drag_end(GeoPoint::new(10.0, 1e300)).unwrap();
        trace.on_marker_drag_end(GeoPoint::new(10.1, -1e300)).unwrap();
        let err = trace.on_marker_drag_end(GeoPoint::new(10.2, 1e300)).unwrap_err();
        assert!(matches!(err, SurveyError::AreaOverflow { vertices: 3 }));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.sink().reports().len(), 2);
    }

    #[test]
    fn test_area_matches_estimator() {
        let mut trace = trace();
        for point in triangle() {
            trace.on_marker_drag_end(point).unwrap();
        }
        let expected = trace.estimator().estimate_area(&triangle()).unwrap();
        assert_eq!(trace.estimator(), &PolygonAreaEstimator::default());
        assert_eq!(trace.area().unwrap(), expected);
        assert_eq!(trace.into_sink().reports().len(), 3);
    }

    #[test]
    fn test_closure_as_sink() {
        let mut areas = Vec::new();
        {
            let mut trace = DragTrace::with_sink(
                PolygonAreaEstimator::source_compatible(),
                |r: &AreaReport| areas.push(r.square_meters),
            );
            for point in triangle() {
                trace.on_marker_drag_end(point).unwrap();
            }
        }
        assert_eq!(areas.len(), 3);
        assert_eq!(areas[0], 0.0);
    }
}
