//! Heat and humidity slowdown estimate.
//!
//! Applied to a finish time for display only; it never feeds back into the
//! fade model or the schedule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::WeatherConfig;
use crate::Error;

/// Humidity tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Humidity {
    #[default]
    Low,
    Moderate,
    High,
}

impl Humidity {
    pub fn multiplier(self) -> f64 {
        match self {
            Humidity::Low => 1.0,
            Humidity::Moderate => 1.1,
            Humidity::High => 1.2,
        }
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Humidity::Low => "low",
            Humidity::Moderate => "moderate",
            Humidity::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for Humidity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "dry" => Ok(Humidity::Low),
            "moderate" | "medium" | "mid" => Ok(Humidity::Moderate),
            "high" | "humid" => Ok(Humidity::High),
            other => Err(Error::InvalidInput(format!(
                "unknown humidity '{other}' (expected low, moderate or high)"
            ))),
        }
    }
}

/// Weather conditions and their effect on a finish time
#[derive(Clone, Debug, Serialize)]
pub struct WeatherAdjustment {
    pub temperature_f: f64,
    pub humidity: Humidity,
    /// Fractional slowdown, e.g. 0.03 for 3%
    pub slowdown: f64,
    pub adjusted_finish: f64,
}

impl WeatherConfig {
    /// Fractional slowdown for the given temperature (°F) and humidity
    ///
    /// Zero at or below the optimum temperature.
    pub fn slowdown(&self, temperature_f: f64, humidity: Humidity) -> f64 {
        let degrees_over = (temperature_f - self.optimum_f).max(0.0);
        degrees_over / 10.0 * self.rate_per_10f * humidity.multiplier()
    }

    pub fn adjust(&self, finish_seconds: f64, temperature_f: f64, humidity: Humidity) -> WeatherAdjustment {
        let slowdown = self.slowdown(temperature_f, humidity);
        WeatherAdjustment {
            temperature_f,
            humidity,
            slowdown,
            adjusted_finish: apply_weather(finish_seconds, slowdown),
        }
    }
}

/// Slowdown fraction with the canonical optimum (55°F) and rate (1.5% per 10°F)
pub fn weather_slowdown(temperature_f: f64, humidity: Humidity) -> f64 {
    WeatherConfig::default().slowdown(temperature_f, humidity)
}

/// Finish time scaled by a slowdown fraction
pub fn apply_weather(finish_seconds: f64, slowdown: f64) -> f64 {
    finish_seconds * (1.0 + slowdown)
}
