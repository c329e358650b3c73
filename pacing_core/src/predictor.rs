//! Cross-distance time prediction and sustainable pace derivation.
//!
//! Uses the power law `T2 = T1 × (D2 / D1)^E`, with the same exponent for
//! predicting up or down in distance.

use serde::Serialize;

use crate::config::PredictorConfig;
use crate::races::RaceKey;
use crate::{Error, Result};

/// Predicted finish for one race in the distance table
#[derive(Clone, Debug, Serialize)]
pub struct RacePrediction {
    pub race: RaceKey,
    pub seconds: f64,
    pub pace_per_mile: f64,
}

impl PredictorConfig {
    /// Predict the time for `target_miles` from a known performance
    ///
    /// # Errors
    /// Returns `Error::Domain` if any input is non-positive or non-finite.
    pub fn predict(&self, known_seconds: f64, known_miles: f64, target_miles: f64) -> Result<f64> {
        for (name, value) in [
            ("known time", known_seconds),
            ("known distance", known_miles),
            ("target distance", target_miles),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Domain(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        Ok(known_seconds * (target_miles / known_miles).powf(self.exponent))
    }

    /// Per-mile pace a recent performance supports over the goal distance
    pub fn sustainable_pace(
        &self,
        recent_race: RaceKey,
        recent_seconds: f64,
        goal_race: RaceKey,
    ) -> Result<f64> {
        let goal_miles = goal_race.miles();
        let predicted = self.predict(recent_seconds, recent_race.miles(), goal_miles)?;
        let pace = predicted / goal_miles;

        tracing::debug!(
            "Sustainable pace for {} from {} in {:.0}s: {:.1}s/mi",
            goal_race,
            recent_race,
            recent_seconds,
            pace
        );
        Ok(pace)
    }

    /// Equivalent performances for every race in the distance table
    pub fn predict_all(&self, recent_race: RaceKey, recent_seconds: f64) -> Result<Vec<RacePrediction>> {
        RaceKey::ALL
            .iter()
            .map(|&race| -> Result<RacePrediction> {
                let seconds = self.predict(recent_seconds, recent_race.miles(), race.miles())?;
                Ok(RacePrediction {
                    race,
                    seconds,
                    pace_per_mile: seconds / race.miles(),
                })
            })
            .collect()
    }
}

/// Predict with the canonical fatigue exponent (1.06)
pub fn predict(known_seconds: f64, known_miles: f64, target_miles: f64) -> Result<f64> {
    PredictorConfig::default().predict(known_seconds, known_miles, target_miles)
}

/// Sustainable pace with the canonical fatigue exponent
pub fn sustainable_pace(recent_race: RaceKey, recent_seconds: f64, goal_race: RaceKey) -> Result<f64> {
    PredictorConfig::default().sustainable_pace(recent_race, recent_seconds, goal_race)
}
