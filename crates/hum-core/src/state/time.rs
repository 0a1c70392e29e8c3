use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HumError;

/// Coarse period of the day, derived from the hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 05:00 to 11:59.
    Morning,
    /// 12:00 to 16:59.
    Afternoon,
    /// 17:00 to 19:59.
    Dusk,
    /// 20:00 to 04:59.
    Night,
}

impl TimeOfDay {
    /// The period containing `hour` (taken modulo 24).
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=19 => Self::Dusk,
            _ => Self::Night,
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Dusk => "dusk",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = HumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "dusk" | "evening" => Ok(Self::Dusk),
            "night" => Ok(Self::Night),
            _ => Err(HumError::invalid("time of day", s)),
        }
    }
}

/// In-game clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeState {
    /// Day number, starting at 1.
    pub day: u32,
    /// Hour of the day, 0-23.
    pub hour: u32,
    /// Always `TimeOfDay::from_hour(hour)`.
    pub time_of_day: TimeOfDay,
}

impl TimeState {
    /// Clock at `day`, `hour`.
    pub fn at(day: u32, hour: u32) -> Self {
        let hour = hour % 24;
        Self {
            day: day.max(1),
            hour,
            time_of_day: TimeOfDay::from_hour(hour),
        }
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::at(1, 8)
    }
}
