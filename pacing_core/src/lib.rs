#![forbid(unsafe_code)]

//! Pace projection engine for pacefade.
//!
//! This crate provides:
//! - Time parsing and formatting
//! - Unit conversion and the race distance table
//! - Cross-distance prediction and sustainable pace
//! - Fade model, schedule generation and risk classification
//! - Projection and scenario comparison
//! - Configuration, logging, saved inputs and CSV export

pub mod error;
pub mod time;
pub mod units;
pub mod races;
pub mod config;
pub mod logging;
pub mod predictor;
pub mod fade;
pub mod schedule;
pub mod risk;
pub mod weather;
pub mod projection;
pub mod inputs;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use config::Config;
pub use time::{format_delta, format_duration, format_pace, parse_time, time_to_seconds, TimeParseError};
pub use units::DistanceUnit;
pub use races::RaceKey;
pub use predictor::{predict, sustainable_pace, RacePrediction};
pub use fade::{fade_penalty, pacing_deviation};
pub use schedule::{build_schedule, generate_segments, Schedule, Segment};
pub use risk::{classify, RiskAssessment, RiskTier};
pub use weather::{apply_weather, weather_slowdown, Humidity, WeatherAdjustment};
pub use projection::{compare, project, ProjectionRequest, ProjectionResult, ScenarioComparison};
pub use inputs::InputRecord;
pub use export::write_schedule_csv;
