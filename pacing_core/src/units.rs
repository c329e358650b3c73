//! Unit conversion for display and input remapping.
//!
//! All engine values are per-mile; kilometres only appear at the edges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::time::format_pace;
use crate::Error;

/// Kilometres in one mile
pub const KM_PER_MILE: f64 = 1.60934;

/// Distance unit used for display
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "mi")]
    Mile,
    #[serde(rename = "km")]
    Kilometer,
}

impl DistanceUnit {
    /// Short suffix (`mi` / `km`)
    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Mile => "mi",
            DistanceUnit::Kilometer => "km",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for DistanceUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Mile),
            "km" | "kilometer" | "kilometre" | "kilometers" | "kilometres" => {
                Ok(DistanceUnit::Kilometer)
            }
            other => Err(Error::InvalidInput(format!("unknown distance unit '{other}'"))),
        }
    }
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

pub fn km_to_miles(km: f64) -> f64 {
    km / KM_PER_MILE
}

/// Seconds per mile to seconds per kilometre
pub fn pace_per_mile_to_per_km(seconds_per_mile: f64) -> f64 {
    seconds_per_mile / KM_PER_MILE
}

/// Seconds per kilometre to seconds per mile
pub fn pace_per_km_to_per_mile(seconds_per_km: f64) -> f64 {
    seconds_per_km * KM_PER_MILE
}

/// Fahrenheit to Celsius, rounded to the nearest whole degree
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    ((fahrenheit - 32.0) * 5.0 / 9.0).round()
}

/// Celsius to Fahrenheit, rounded to the nearest whole degree
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    (celsius * 9.0 / 5.0 + 32.0).round()
}

/// Render a per-mile pace in the requested unit with its suffix, e.g. `7:30/mi`
pub fn format_pace_in(seconds_per_mile: f64, unit: DistanceUnit) -> String {
    let pace = match unit {
        DistanceUnit::Mile => seconds_per_mile,
        DistanceUnit::Kilometer => pace_per_mile_to_per_km(seconds_per_mile),
    };
    format!("{}/{}", format_pace(pace), unit.suffix())
}

/// Render a distance given in miles in the requested unit to one decimal place
pub fn format_distance_in(miles: f64, unit: DistanceUnit) -> String {
    let value = match unit {
        DistanceUnit::Mile => miles,
        DistanceUnit::Kilometer => miles_to_km(miles),
    };
    format!("{value:.1} {}", unit.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_distance_conversion_is_invertible() {
        assert!(approx(miles_to_km(1.0), 1.60934));
        assert!(approx(km_to_miles(miles_to_km(26.2)), 26.2));
    }

    #[test]
    fn test_pace_conversion_is_invertible() {
        assert!(approx(pace_per_mile_to_per_km(482.802), 300.0));
        assert!(approx(pace_per_km_to_per_mile(pace_per_mile_to_per_km(450.0)), 450.0));
    }

    #[test]
    fn test_temperature_rounding() {
        assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
        assert_eq!(fahrenheit_to_celsius(55.0), 13.0);
        assert_eq!(celsius_to_fahrenheit(13.0), 55.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        // 70F -> 21C -> 70F, 71F -> 22C -> 72F: not guaranteed to round-trip
        assert_eq!(celsius_to_fahrenheit(fahrenheit_to_celsius(71.0)), 72.0);
    }

    #[test]
    fn test_format_pace_in_units() {
        assert_eq!(format_pace_in(480.0, DistanceUnit::Mile), "8:00/mi");
        assert_eq!(format_pace_in(482.802, DistanceUnit::Kilometer), "5:00/km");
    }

    #[test]
    fn test_format_distance_in_units() {
        assert_eq!(format_distance_in(3.1, DistanceUnit::Mile), "3.1 mi");
        assert_eq!(format_distance_in(3.1, DistanceUnit::Kilometer), "5.0 km");
        assert_eq!(format_distance_in(26.2, DistanceUnit::Kilometer), "42.2 km");
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("mi".parse::<DistanceUnit>().unwrap(), DistanceUnit::Mile);
        assert_eq!("KM".parse::<DistanceUnit>().unwrap(), DistanceUnit::Kilometer);
        assert!("furlong".parse::<DistanceUnit>().is_err());
    }
}
