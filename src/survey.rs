// src/survey.rs
//! Survey point model and click resolution for plotted points

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// One surveyed point as delivered by the field survey, all values textual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyPoint {
    pub point_id: u32,
    pub point_name: String,
    pub northing: String,
    pub easting: String,
    pub elevation: String,
    pub zone: String,
    pub latitude: String,
    pub longitude: String,
    pub color: String,
}

impl SurveyPoint {
    /// Plot position; unparsable coordinates fall back to 0.0
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(
            self.latitude.trim().parse().unwrap_or(0.0),
            self.longitude.trim().parse().unwrap_or(0.0),
        )
    }

    pub fn labelled(&self) -> LabelledPoint {
        LabelledPoint {
            point: self.position(),
            label: self.point_name.clone(),
        }
    }

    pub fn has_coordinates(&self) -> bool {
        !(self.latitude.is_empty() && self.longitude.is_empty())
    }
}

/// A plotted position with the label used to find its survey record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledPoint {
    pub point: GeoPoint,
    pub label: String,
}

/// The fixed demonstration points around Jaipur
pub fn sample_survey_points() -> Vec<SurveyPoint> {
    let point = |id: u32, lat: &str, lon: &str, color: &str| SurveyPoint {
        point_id: id,
        point_name: format!("Point{}", id),
        northing: format!("northing{}", id),
        easting: format!("easting{}", id),
        elevation: format!("elevation{}", id),
        zone: format!("zone{}", id),
        latitude: lat.to_string(),
        longitude: lon.to_string(),
        color: color.to_string(),
    };

    vec![
        point(1, "26.905734", "75.733757", "red"),
        point(2, "26.905964", "75.735688", "blue"),
        point(3, "26.905619", "75.742855", "red"),
    ]
}

/// Survey points prepared for plotting, resolving clicks back to their records
pub struct PointPlot<F: FnMut(&SurveyPoint)> {
    models: Vec<SurveyPoint>,
    points: Vec<LabelledPoint>,
    selected: Option<usize>,
    on_click: F,
}

impl<F: FnMut(&SurveyPoint)> PointPlot<F> {
    pub fn new(models: Vec<SurveyPoint>, on_click: F) -> Self {
        let points = models.iter().map(SurveyPoint::labelled).collect();
        Self {
            models,
            points,
            selected: None,
            on_click,
        }
    }

    pub fn labelled_points(&self) -> &[LabelledPoint] {
        &self.points
    }

    pub fn models(&self) -> &[SurveyPoint] {
        &self.models
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Resolve a click on the plotted point at `index`.
    ///
    /// The record is found by label. A record without any coordinates
    /// is returned filled in with the plotted position.
    pub fn click(&mut self, index: usize) -> Option<SurveyPoint> {
        let Some(plotted) = self.points.get(index) else {
            tracing::warn!(index, count = self.points.len(), "Click outside plotted points");
            return None;
        };

        let Some(model) = self.models.iter().find(|m| m.point_name == plotted.label) else {
            tracing::warn!(label = %plotted.label, "No survey record for clicked point");
            return None;
        };

        let clicked = if model.has_coordinates() {
            model.clone()
        } else {
            SurveyPoint {
                latitude: plotted.point.latitude.to_string(),
                longitude: plotted.point.longitude.to_string(),
                ..model.clone()
            }
        };

        tracing::info!(point = %clicked.point_name, "Point clicked");
        (self.on_click)(&clicked);
        self.selected = Some(index);
        Some(clicked)
    }
}
