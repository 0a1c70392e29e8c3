use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HumError;

/// Weather over the town.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    /// Clear skies.
    Clear,
    /// Grey and still.
    Overcast,
    /// Sea fog rolling in.
    Fog,
    /// Rain.
    Rain,
    /// Storm off the coast.
    Storm,
}

impl Weather {
    /// Every weather kind.
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Overcast,
        Weather::Fog,
        Weather::Rain,
        Weather::Storm,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Overcast => "overcast",
            Self::Fog => "fog",
            Self::Rain => "rain",
            Self::Storm => "storm",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength of a tremor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TremorIntensity {
    /// Rattles the windows.
    Light,
    /// Cracks plaster.
    Medium,
    /// Brings the town into the street.
    Heavy,
}

impl TremorIntensity {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        }
    }
}

impl fmt::Display for TremorIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TremorIntensity {
    type Err = HumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "heavy" => Ok(Self::Heavy),
            _ => Err(HumError::invalid("tremor intensity", s)),
        }
    }
}

/// Physical surroundings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentState {
    /// Current weather.
    pub weather: Weather,
    /// Loudness of the hum at the player's location, >= 0.
    pub hum_intensity: f64,
    /// When the last tremor hit.
    pub last_tremor: Option<DateTime<Utc>>,
    /// Tremors so far.
    pub tremor_count: u32,
}

impl Default for EnvironmentState {
    fn default() -> Self {
        Self {
            weather: Weather::Overcast,
            hum_intensity: 0.23,
            last_tremor: None,
            tremor_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_intensity() {
        assert_eq!(
            "Heavy".parse::<TremorIntensity>().unwrap(),
            TremorIntensity::Heavy
        );
        assert!("catastrophic".parse::<TremorIntensity>().is_err());
    }

    #[test]
    fn weather_wire_names() {
        for w in Weather::ALL {
            let json = serde_json::to_string(&w).unwrap();
            assert_eq!(json, format!("\"{}\"", w.as_str()));
        }
    }
}
