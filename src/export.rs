// src/export.rs
//! Trace export to GPS interchange formats

use crate::{
    area::RingClosure,
    error::{Result, SurveyError},
    geo::GeoPoint,
    report::AreaReport,
};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TraceFormat {
    #[value(name = "gpx")]
    GPX,
    #[value(name = "geojson")]
    GeoJSON,
    #[value(name = "kml")]
    KML,
    #[value(name = "csv")]
    CSV,
}

impl TraceFormat {
    pub fn extension(&self) -> &str {
        match self {
            TraceFormat::GPX => "gpx",
            TraceFormat::GeoJSON => "geojson",
            TraceFormat::KML => "kml",
            TraceFormat::CSV => "csv",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            TraceFormat::GPX => "GPX (GPS Exchange)",
            TraceFormat::GeoJSON => "GeoJSON",
            TraceFormat::KML => "KML (Keyhole)",
            TraceFormat::CSV => "CSV",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "gpx" => Some(TraceFormat::GPX),
            "geojson" | "json" => Some(TraceFormat::GeoJSON),
            "kml" => Some(TraceFormat::KML),
            "csv" => Some(TraceFormat::CSV),
            _ => None,
        }
    }
}

pub struct TraceExporter<'a> {
    points: &'a [GeoPoint],
    report: AreaReport,
    generated: DateTime<Utc>,
}

impl<'a> TraceExporter<'a> {
    pub fn new(points: &'a [GeoPoint], report: AreaReport) -> Self {
        Self {
            points,
            report,
            generated: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, generated: DateTime<Utc>) -> Self {
        self.generated = generated;
        self
    }

    /// Whether the trace is written as a closed polygon rather than a path
    fn is_polygon(&self) -> bool {
        self.report.closure == RingClosure::Closed && self.points.len() >= 3
    }

    /// Vertices in output order, repeating the first one to close a polygon
    fn ring(&self) -> Vec<GeoPoint> {
        let mut ring = self.points.to_vec();
        if self.is_polygon() {
            ring.push(self.points[0]);
        }
        ring
    }

    pub fn render(&self, format: TraceFormat) -> Result<String> {
        if self.points.is_empty() {
            return Err(SurveyError::Export("No trace points to export".to_string()));
        }

        Ok(match format {
            TraceFormat::GPX => self.to_gpx(),
            TraceFormat::GeoJSON => self.to_geojson()?,
            TraceFormat::KML => self.to_kml(),
            TraceFormat::CSV => self.to_csv(),
        })
    }

    pub fn export_to_file(&self, path: &Path, format: TraceFormat) -> Result<()> {
        let content = self.render(format)?;

        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;

        tracing::info!(
            path = %path.display(),
            format = format.display_name(),
            vertices = self.points.len(),
            "Trace exported"
        );
        Ok(())
    }

    fn to_gpx(&self) -> String {
        let mut gpx = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="Survey Area" xmlns="http://www.topografix.com/GPX/1/1">
"#);

        gpx.push_str(&format!(
            "  <metadata>\n    <time>{}</time>\n  </metadata>\n",
            self.generated.to_rfc3339()
        ));
        gpx.push_str("  <trk>\n    <name>Survey trace</name>\n");
        gpx.push_str(&format!(
            "    <desc>{}</desc>\n",
            Self::escape_xml(&self.report.format_area())
        ));
        gpx.push_str("    <trkseg>\n");

        for point in self.ring() {
            gpx.push_str(&format!(
                "      <trkpt lat=\"{}\" lon=\"{}\"/>\n",
                point.latitude, point.longitude
            ));
        }

        gpx.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
        gpx
    }

    fn to_geojson(&self) -> Result<String> {
        let coordinates: Vec<serde_json::Value> = self
            .ring()
            .iter()
            .map(|p| serde_json::json!([p.longitude, p.latitude]))
            .collect();

        let geometry = if self.is_polygon() {
            serde_json::json!({ "type": "Polygon", "coordinates": [coordinates] })
        } else {
            serde_json::json!({ "type": "LineString", "coordinates": coordinates })
        };

        let feature = serde_json::json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "area_m2": self.report.square_meters,
                "vertices": self.report.vertices,
                "closure": self.report.closure,
                "generated": self.generated.to_rfc3339(),
            }
        });

        Ok(serde_json::to_string_pretty(&feature)?)
    }

    fn to_kml(&self) -> String {
        let mut kml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Survey Area Trace</name>
    <Placemark>
      <name>Survey trace</name>
"#);

        kml.push_str(&format!(
            "      <description>{}</description>\n",
            Self::escape_xml(&format!("Area: {}", self.report.format_area()))
        ));
        kml.push_str(&format!(
            "      <TimeStamp><when>{}</when></TimeStamp>\n",
            self.generated.to_rfc3339()
        ));

        let coordinates = self
            .ring()
            .iter()
            .map(|p| format!("{},{},0", p.longitude, p.latitude))
            .collect::<Vec<_>>()
            .join(" ");

        if self.is_polygon() {
            kml.push_str("      <Polygon>\n        <outerBoundaryIs>\n          <LinearRing>\n");
            kml.push_str(&format!("            <coordinates>{}</coordinates>\n", coordinates));
            kml.push_str("          </LinearRing>\n        </outerBoundaryIs>\n      </Polygon>\n");
        } else {
            kml.push_str("      <LineString>\n");
            kml.push_str(&format!("        <coordinates>{}</coordinates>\n", coordinates));
            kml.push_str("      </LineString>\n");
        }

        kml.push_str("    </Placemark>\n  </Document>\n</kml>\n");
        kml
    }

    fn to_csv(&self) -> String {
        let mut csv = String::from("index,latitude,longitude\n");

        for (i, point) in self.points.iter().enumerate() {
            csv.push_str(&format!("{},{},{}\n", i, point.latitude, point.longitude));
        }

        csv
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }
}
