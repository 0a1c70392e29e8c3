use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cast::BOARDING_HOUSE;
use crate::error::HumError;

/// One of the four inner voices whose balance decides the ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Voice {
    /// Cold analysis.
    Logic,
    /// Gut reaction.
    Instinct,
    /// Care for others.
    Empathy,
    /// The pull from below.
    Ghost,
}

impl Voice {
    /// All voices in tie-break order.
    pub const ALL: [Voice; 4] = [Voice::Logic, Voice::Instinct, Voice::Empathy, Voice::Ghost];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logic => "LOGIC",
            Self::Instinct => "INSTINCT",
            Self::Empathy => "EMPATHY",
            Self::Ghost => "GHOST",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = HumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOGIC" => Ok(Self::Logic),
            "INSTINCT" => Ok(Self::Instinct),
            "EMPATHY" => Ok(Self::Empathy),
            "GHOST" => Ok(Self::Ghost),
            _ => Err(HumError::invalid("voice", s)),
        }
    }
}

/// Accumulated, unbounded voice scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct VoiceScores {
    /// LOGIC score.
    pub logic: i32,
    /// INSTINCT score.
    pub instinct: i32,
    /// EMPATHY score.
    pub empathy: i32,
    /// GHOST score.
    pub ghost: i32,
}

impl VoiceScores {
    /// Score of one voice.
    pub fn get(&self, voice: Voice) -> i32 {
        match voice {
            Voice::Logic => self.logic,
            Voice::Instinct => self.instinct,
            Voice::Empathy => self.empathy,
            Voice::Ghost => self.ghost,
        }
    }

    /// Add `delta` to one voice and return the new score.
    pub fn add(&mut self, voice: Voice, delta: i32) -> i32 {
        let slot = match voice {
            Voice::Logic => &mut self.logic,
            Voice::Instinct => &mut self.instinct,
            Voice::Empathy => &mut self.empathy,
            Voice::Ghost => &mut self.ghost,
        };
        *slot = slot.saturating_add(delta);
        *slot
    }

    /// Voices sorted by score, highest first. Equal scores keep
    /// [`Voice::ALL`] order.
    pub fn ranked(&self) -> [(Voice, i32); 4] {
        let mut ranked = Voice::ALL.map(|v| (v, self.get(v)));
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current location id.
    pub location: String,
    /// Location before the last move.
    pub previous_location: Option<String>,
    /// Accumulated voice scores.
    pub voice_scores: VoiceScores,
    /// The voice picked at character creation, if any.
    pub initial_tone: Option<Voice>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            location: BOARDING_HOUSE.to_string(),
            previous_location: None,
            voice_scores: VoiceScores::default(),
            initial_tone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_is_descending_and_stable() {
        let scores = VoiceScores {
            logic: 3,
            instinct: 7,
            empathy: 7,
            ghost: -2,
        };
        let ranked = scores.ranked();
        assert_eq!(ranked[0], (Voice::Instinct, 7));
        assert_eq!(ranked[1], (Voice::Empathy, 7));
        assert_eq!(ranked[2], (Voice::Logic, 3));
        assert_eq!(ranked[3], (Voice::Ghost, -2));
    }

    #[test]
    fn add_accumulates_unbounded() {
        let mut scores = VoiceScores::default();
        scores.add(Voice::Ghost, 150);
        assert_eq!(scores.add(Voice::Ghost, -20), 130);
        assert_eq!(scores.add(Voice::Logic, -5), -5);
    }

    #[test]
    fn voice_wire_names() {
        let json = serde_json::to_string(&VoiceScores {
            logic: 1,
            ..Default::default()
        })
        .unwrap();
        assert!(json.contains(r#""LOGIC":1"#));
        assert_eq!("ghost".parse::<Voice>().unwrap(), Voice::Ghost);
        assert!("whisper".parse::<Voice>().is_err());
    }
}
