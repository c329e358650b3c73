//! CSV export of a projected schedule.

use std::path::Path;

use crate::projection::ProjectionResult;
use crate::schedule::Segment;
use crate::time::{format_duration, format_pace};
use crate::units::{miles_to_km, pace_per_mile_to_per_km, DistanceUnit};
use crate::Result;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    segment: u32,
    distance: String,
    pace: String,
    segment_time: String,
    elapsed: String,
    fade_penalty: String,
}

impl CsvRow {
    fn new(segment: &Segment, unit: DistanceUnit) -> Self {
        let (distance, pace, penalty) = match unit {
            DistanceUnit::Mile => (segment.distance, segment.pace, segment.fade_penalty),
            DistanceUnit::Kilometer => (
                miles_to_km(segment.distance),
                pace_per_mile_to_per_km(segment.pace),
                pace_per_mile_to_per_km(segment.fade_penalty),
            ),
        };

        CsvRow {
            segment: segment.index,
            distance: format!("{distance:.2}"),
            pace: format_pace(pace),
            segment_time: format_duration(segment.segment_time),
            elapsed: format_duration(segment.elapsed),
            fade_penalty: format!("{penalty:.1}"),
        }
    }
}

/// Write one row per segment to `path`, replacing any existing file
///
/// Distance and pace are rendered in `unit`; times use the duration format.
pub fn write_schedule_csv(path: &Path, result: &ProjectionResult, unit: DistanceUnit) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for segment in &result.segments {
        writer.serialize(CsvRow::new(segment, unit))?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} segments to {:?}", result.segments.len(), path);
    Ok(result.segments.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{project, ProjectionRequest};
    use crate::races::RaceKey;
    use crate::Config;

    fn five_k_result() -> ProjectionResult {
        let request = ProjectionRequest {
            goal_race: RaceKey::FiveK,
            goal_seconds: 1_260.0,
            recent_race: RaceKey::FiveK,
            recent_seconds: 1_240.0,
            pacing_adjustment: -10.0,
        };
        project(&Config::default(), &request).unwrap()
    }

    #[test]
    fn test_writes_header_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("schedule.csv");

        let written = write_schedule_csv(&path, &five_k_result(), DistanceUnit::Mile).unwrap();
        assert_eq!(written, 4);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "segment,distance,pace,segment_time,elapsed,fade_penalty"
        );
        assert!(lines[1].starts_with("1,1.00,"));
        assert!(lines[4].starts_with("4,0.10,"));
    }

    #[test]
    fn test_kilometre_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schedule.csv");

        write_schedule_csv(&path, &five_k_result(), DistanceUnit::Kilometer).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let first = reader.records().next().unwrap().unwrap();
        assert_eq!(&first[1], "1.61");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schedule.csv");
        std::fs::write(&path, "stale\n").unwrap();

        write_schedule_csv(&path, &five_k_result(), DistanceUnit::Mile).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
    }
}
