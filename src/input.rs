// src/input.rs
//! Loading point sequences from text, JSON and CSV

use crate::{
    error::{Result, SurveyError},
    geo::GeoPoint,
    survey::SurveyPoint,
};
use std::path::Path;

/// Parse `"lat,lon; lat,lon"`.
///
/// Pairs are separated by `;` or whitespace, and a space may follow the
/// comma inside a pair (`"26.9, 75.7"`).
pub fn parse_point_list(input: &str) -> Result<Vec<GeoPoint>> {
    let mut points = Vec::new();

    for group in input.split(';').map(str::trim).filter(|g| !g.is_empty()) {
        let values: Vec<&str> = group
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|v| !v.is_empty())
            .collect();

        if values.len() % 2 != 0 || !group.contains(',') {
            return Err(SurveyError::Parse(format!(
                "Expected 'lat,lon' pairs, got '{}'",
                group
            )));
        }

        for pair in values.chunks(2) {
            points.push(GeoPoint::new(parse_coordinate(pair[0])?, parse_coordinate(pair[1])?));
        }
    }

    Ok(points)
}

fn parse_coordinate(value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|e| SurveyError::Parse(format!("Invalid coordinate '{}': {}", value.trim(), e)))
}

/// Load a trace from a `.json` array of points or a `.csv` file with a
/// `latitude,longitude` header
pub fn load_points(path: &Path) -> Result<Vec<GeoPoint>> {
    let contents = std::fs::read_to_string(path)?;

    match extension(path).as_deref() {
        Some("json") => Ok(serde_json::from_str(&contents)?),
        Some("csv") => parse_csv(&contents),
        _ => Err(SurveyError::Parse(format!(
            "Unsupported point file '{}': expected .json or .csv",
            path.display()
        ))),
    }
}

/// Load survey records from a JSON array
pub fn load_survey_points(path: &Path) -> Result<Vec<SurveyPoint>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn parse_csv(contents: &str) -> Result<Vec<GeoPoint>> {
    let mut lines = contents.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| SurveyError::Parse("Empty CSV file".to_string()))?;
    let columns: Vec<String> = header.split(',').map(|c| c.trim().to_ascii_lowercase()).collect();
    let column = |name: &str| {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| SurveyError::Parse(format!("CSV header is missing '{}'", name)))
    };
    let lat_col = column("latitude")?;
    let lon_col = column("longitude")?;

    lines
        .enumerate()
        .map(|(row, line)| {
            let fields: Vec<&str> = line.split(',').collect();
            let field = |col: usize| {
                fields.get(col).copied().ok_or_else(|| {
                    SurveyError::Parse(format!("CSV row {} has too few fields", row + 1))
                })
            };
            Ok(GeoPoint::new(
                parse_coordinate(field(lat_col)?)?,
                parse_coordinate(field(lon_col)?)?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point_list() {
        let points = parse_point_list("26.9,75.7; 26.91,75.72 -1.5,3").unwrap();
        assert_eq!(
            points,
            vec![
                GeoPoint::new(26.9, 75.7),
                GeoPoint::new(26.91, 75.72),
                GeoPoint::new(-1.5, 3.0),
            ]
        );
    }

    #[test]
    fn test_parse_point_list_space_after_comma() {
        let points = parse_point_list("26.9, 75.7; 26.91 ,75.72  -1.5, 3").unwrap();
        assert_eq!(
            points,
            vec![
                GeoPoint::new(26.9, 75.7),
                GeoPoint::new(26.91, 75.72),
                GeoPoint::new(-1.5, 3.0),
            ]
        );
    }

    #[test]
    fn test_parse_point_list_unpaired_value() {
        let err = parse_point_list("26.9,75.7; 26.91").unwrap_err();
        assert!(err.to_string().contains("Expected 'lat,lon' pairs, got '26.91'"));

        let err = parse_point_list("26.9,75.7,26.91").unwrap_err();
        assert!(matches!(err, SurveyError::Parse(_)));
    }

    #[test]
    fn test_parse_point_list_empty() {
        assert!(parse_point_list("  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_point_list_bad_number() {
        let err = parse_point_list("26.9,east").unwrap_err();
        assert!(err.to_string().contains("Invalid coordinate 'east'"));
    }

    #[test]
    fn test_parse_csv_any_column_order() {
        let csv = "name,longitude,latitude\na,75.7,26.9\n\nb,75.72,26.91\n";
        let points = parse_csv(csv).unwrap();
        assert_eq!(points, vec![GeoPoint::new(26.9, 75.7), GeoPoint::new(26.91, 75.72)]);
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let err = parse_csv("lat,lon\n1,2\n").unwrap_err();
        assert!(err.to_string().contains("missing 'latitude'"));
    }

    #[test]
    fn test_load_points_json() {
        let path = std::env::temp_dir().join(format!("survey-area-points-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"latitude": 1.0, "longitude": 2.0}]"#).unwrap();
        let points = load_points(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(points, vec![GeoPoint::new(1.0, 2.0)]);
    }

    #[test]
    fn test_load_points_unknown_extension() {
        let path = std::env::temp_dir().join(format!("survey-area-points-{}.txt", std::process::id()));
        std::fs::write(&path, "1,2").unwrap();
        let result = load_points(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SurveyError::Parse(_))));
    }
}
