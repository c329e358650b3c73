//! Persistence of the last-used input record.
//!
//! Only the raw inputs are stored (race keys, time text as typed, the
//! adjustment and preferences). Derived results are always recomputed, and
//! the saved time text is re-validated every time it is used.

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::projection::ProjectionRequest;
use crate::races::RaceKey;
use crate::time::parse_time;
use crate::units::DistanceUnit;
use crate::weather::Humidity;
use crate::{Error, Result};

/// File name of the saved record inside the data directory
pub const INPUTS_FILE: &str = "last_inputs.json";

/// Raw inputs as the runner entered them
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InputRecord {
    pub goal_race: RaceKey,
    pub goal_time: String,
    pub recent_race: RaceKey,
    pub recent_time: String,
    #[serde(default)]
    pub pacing_adjustment: f64,
    #[serde(default)]
    pub unit: DistanceUnit,
    #[serde(default)]
    pub temperature_f: Option<f64>,
    #[serde(default)]
    pub humidity: Option<Humidity>,
    pub saved_at: DateTime<Utc>,
}

impl InputRecord {
    /// Location of the record within a data directory
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(INPUTS_FILE)
    }

    /// Validate the stored time text and build a projection request
    ///
    /// # Errors
    /// Returns `Error::InvalidTime` if either saved time no longer parses.
    pub fn to_request(&self) -> Result<ProjectionRequest> {
        let goal_seconds = parse_time(&self.goal_time)?;
        let recent_seconds = parse_time(&self.recent_time)?;

        Ok(ProjectionRequest {
            goal_race: self.goal_race,
            goal_seconds: f64::from(goal_seconds),
            recent_race: self.recent_race,
            recent_seconds: f64::from(recent_seconds),
            pacing_adjustment: self.pacing_adjustment,
        })
    }

    /// Load the record with a shared lock
    ///
    /// Returns `None` if the file doesn't exist. A file that cannot be read
    /// or parsed is logged and treated as absent.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::info!("No saved inputs at {:?}", path);
            return Ok(None);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open saved inputs {:?}: {}. Ignoring.", path, e);
                return Ok(None);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock saved inputs {:?}: {}. Ignoring.", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read saved inputs {:?}: {}. Ignoring.", path, e);
            return Ok(None);
        }

        file.unlock()?;

        match serde_json::from_str::<InputRecord>(&contents) {
            Ok(record) => {
                tracing::debug!("Loaded saved inputs from {:?}", path);
                Ok(Some(record))
            }
            Err(e) => {
                tracing::warn!("Failed to parse saved inputs {:?}: {}. Ignoring.", path, e);
                Ok(None)
            }
        }
    }

    /// Save the record atomically
    ///
    /// Writes to a locked temp file in the same directory, syncs it, then
    /// renames it over the previous record.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "inputs path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved inputs to {:?}", path);
        Ok(())
    }
}
