//! Configuration file support for pacefade.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pacefade/config.toml`.
//! Every model constant has a canonical default, so an absent or partial
//! file behaves exactly like the built-in model.

use crate::units::DistanceUnit;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub predictor: PredictorConfig,

    #[serde(default)]
    pub fade: FadeConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub comparison: ComparisonConfig,

    #[serde(default)]
    pub weather: WeatherConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Output preferences
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub unit: DistanceUnit,
}

/// Cross-distance prediction parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Fatigue exponent applied to the distance ratio
    #[serde(default = "default_exponent")]
    pub exponent: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            exponent: default_exponent(),
        }
    }
}

/// Late-race fade parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FadeConfig {
    /// Race fraction after which fade starts to apply
    #[serde(default = "default_fade_onset")]
    pub onset: f64,

    #[serde(default = "default_aggression_multiplier")]
    pub aggression_multiplier: f64,

    /// Upper bound on the penalty, seconds per mile
    #[serde(default = "default_max_penalty")]
    pub max_penalty: f64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            onset: default_fade_onset(),
            aggression_multiplier: default_aggression_multiplier(),
            max_penalty: default_max_penalty(),
        }
    }
}

/// Upper bounds (inclusive) of the low, moderate and high risk bands
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default = "default_risk_low")]
    pub low: f64,

    #[serde(default = "default_risk_moderate")]
    pub moderate: f64,

    #[serde(default = "default_risk_high")]
    pub high: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            low: default_risk_low(),
            moderate: default_risk_moderate(),
            high: default_risk_high(),
        }
    }
}

/// Comparison mode parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Offset in seconds per mile applied each way for side-by-side scenarios
    #[serde(default = "default_comparison_delta")]
    pub delta: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            delta: default_comparison_delta(),
        }
    }
}

/// Heat slowdown parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_optimum_f")]
    pub optimum_f: f64,

    /// Fractional slowdown per 10°F above the optimum
    #[serde(default = "default_rate_per_10f")]
    pub rate_per_10f: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            optimum_f: default_optimum_f(),
            rate_per_10f: default_rate_per_10f(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("pacefade")
}

fn default_exponent() -> f64 {
    1.06
}

fn default_fade_onset() -> f64 {
    0.5
}

fn default_aggression_multiplier() -> f64 {
    2.0
}

fn default_max_penalty() -> f64 {
    30.0
}

fn default_risk_low() -> f64 {
    5.0
}

fn default_risk_moderate() -> f64 {
    15.0
}

fn default_risk_high() -> f64 {
    25.0
}

fn default_comparison_delta() -> f64 {
    10.0
}

fn default_optimum_f() -> f64 {
    55.0
}

fn default_rate_per_10f() -> f64 {
    0.015
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("pacefade").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Validate model parameters
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.predictor.exponent.is_finite() && self.predictor.exponent > 0.0) {
            errors.push(format!(
                "predictor.exponent must be positive, got {}",
                self.predictor.exponent
            ));
        }

        if !(0.0..1.0).contains(&self.fade.onset) {
            errors.push(format!(
                "fade.onset must be in [0, 1), got {}",
                self.fade.onset
            ));
        }
        if !(self.fade.aggression_multiplier >= 0.0) {
            errors.push(format!(
                "fade.aggression_multiplier must be non-negative, got {}",
                self.fade.aggression_multiplier
            ));
        }
        if !(self.fade.max_penalty >= 0.0) {
            errors.push(format!(
                "fade.max_penalty must be non-negative, got {}",
                self.fade.max_penalty
            ));
        }

        let RiskConfig {
            low,
            moderate,
            high,
        } = self.risk;
        if !(low > 0.0 && low < moderate && moderate < high) {
            errors.push(format!(
                "risk thresholds must be positive and strictly ascending, got {} / {} / {}",
                low, moderate, high
            ));
        }

        if !(self.comparison.delta > 0.0) {
            errors.push(format!(
                "comparison.delta must be positive, got {}",
                self.comparison.delta
            ));
        }

        if !self.weather.optimum_f.is_finite() {
            errors.push("weather.optimum_f must be a finite temperature".to_string());
        }
        if !(self.weather.rate_per_10f >= 0.0) {
            errors.push(format!(
                "weather.rate_per_10f must be non-negative, got {}",
                self.weather.rate_per_10f
            ));
        }

        errors
    }
}
