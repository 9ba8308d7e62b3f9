// src/report.rs
//! Delivery of computed areas to whoever is interested

use crate::area::RingClosure;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaReport {
    pub vertices: usize,
    pub square_meters: f64,
    pub closure: RingClosure,
}

impl AreaReport {
    pub fn hectares(&self) -> f64 {
        self.square_meters / 10_000.0
    }

    /// Human-readable area, switching to hectares above one hectare
    pub fn format_area(&self) -> String {
        if self.square_meters >= 10_000.0 {
            format!("{:.3} ha", self.hectares())
        } else {
            format!("{:.2} m²", self.square_meters)
        }
    }
}

/// Receiver of area reports
pub trait AreaSink {
    fn report(&mut self, report: &AreaReport);
}

impl<F: FnMut(&AreaReport)> AreaSink for F {
    fn report(&mut self, report: &AreaReport) {
        self(report)
    }
}

/// Emits each report as a structured `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AreaSink for TracingSink {
    fn report(&mut self, report: &AreaReport) {
        tracing::info!(
            vertices = report.vertices,
            area_m2 = report.square_meters,
            closure = ?report.closure,
            "Area of the polygon: {}",
            report.format_area()
        );
    }
}

/// Keeps every report in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    reports: Vec<AreaReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[AreaReport] {
        &self.reports
    }

    pub fn last(&self) -> Option<&AreaReport> {
        self.reports.last()
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl AreaSink for MemorySink {
    fn report(&mut self, report: &AreaReport) {
        self.reports.push(*report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(square_meters: f64) -> AreaReport {
        AreaReport {
            vertices: 4,
            square_meters,
            closure: RingClosure::Closed,
        }
    }

    #[test]
    fn test_format_area() {
        assert_eq!(report(1234.5).format_area(), "1234.50 m²");
        assert_eq!(report(25_000.0).format_area(), "2.500 ha");
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        sink.report(&report(1.0));
        sink.report(&report(2.0));
        assert_eq!(sink.reports().len(), 2);
        assert_eq!(sink.last().map(|r| r.square_meters), Some(2.0));
        sink.clear();
        assert!(sink.last().is_none());
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |r: &AreaReport| seen.push(r.square_meters);
            sink.report(&report(3.0));
        }
        assert_eq!(seen, vec![3.0]);
    }
}
