//! Distance table of canonical race distances.
//!
//! Built once and shared; the table is never mutated.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// One of the supported race distances
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceKey {
    #[serde(rename = "5k")]
    FiveK,
    #[serde(rename = "10k")]
    TenK,
    #[serde(rename = "half")]
    HalfMarathon,
    Marathon,
}

/// Reference distances for a race
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaceDistance {
    pub miles: f64,
    pub km: f64,
}

/// Accepted spellings for each race, keyed by lowercase alias
static RACE_ALIASES: Lazy<HashMap<&'static str, RaceKey>> = Lazy::new(|| {
    let mut aliases = HashMap::new();
    for alias in ["5k", "5km", "5000m"] {
        aliases.insert(alias, RaceKey::FiveK);
    }
    for alias in ["10k", "10km", "10000m"] {
        aliases.insert(alias, RaceKey::TenK);
    }
    for alias in ["half", "half-marathon", "half_marathon", "halfmarathon", "hm", "21k"] {
        aliases.insert(alias, RaceKey::HalfMarathon);
    }
    for alias in ["marathon", "full", "full-marathon", "42k"] {
        aliases.insert(alias, RaceKey::Marathon);
    }
    aliases
});

impl RaceKey {
    /// Every race in the table, shortest first
    pub const ALL: [RaceKey; 4] = [
        RaceKey::FiveK,
        RaceKey::TenK,
        RaceKey::HalfMarathon,
        RaceKey::Marathon,
    ];

    pub fn distance(self) -> RaceDistance {
        match self {
            RaceKey::FiveK => RaceDistance { miles: 3.1, km: 5.0 },
            RaceKey::TenK => RaceDistance { miles: 6.2, km: 10.0 },
            RaceKey::HalfMarathon => RaceDistance {
                miles: 13.1,
                km: 21.0975,
            },
            RaceKey::Marathon => RaceDistance {
                miles: 26.2,
                km: 42.195,
            },
        }
    }

    pub fn miles(self) -> f64 {
        self.distance().miles
    }

    pub fn km(self) -> f64 {
        self.distance().km
    }

    /// Canonical key used on the command line and in saved inputs
    pub fn key(self) -> &'static str {
        match self {
            RaceKey::FiveK => "5k",
            RaceKey::TenK => "10k",
            RaceKey::HalfMarathon => "half",
            RaceKey::Marathon => "marathon",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            RaceKey::FiveK => "5K",
            RaceKey::TenK => "10K",
            RaceKey::HalfMarathon => "Half Marathon",
            RaceKey::Marathon => "Marathon",
        }
    }
}

impl fmt::Display for RaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RaceKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        RACE_ALIASES
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| Error::UnknownRace(s.trim().to_string()))
    }
}
