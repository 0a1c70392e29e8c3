//! Dominant voice and the ending it leads to.

use std::fmt;

use serde::{Deserialize, Serialize};

use hum_core::{EndingPath, Voice, VoiceScores};

use crate::config::VoiceThresholds;

/// Which way the player leans: one voice, or none clearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceLean {
    /// Cold reasoning.
    Logic,
    /// Gut reaction.
    Instinct,
    /// Care for the townsfolk.
    Empathy,
    /// The pull of the thing under the town.
    Ghost,
    /// No voice leads by enough.
    Balanced,
}

impl VoiceLean {
    /// The leading voice, or `None` when balanced.
    pub fn voice(self) -> Option<Voice> {
        match self {
            Self::Logic => Some(Voice::Logic),
            Self::Instinct => Some(Voice::Instinct),
            Self::Empathy => Some(Voice::Empathy),
            Self::Ghost => Some(Voice::Ghost),
            Self::Balanced => None,
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self.voice() {
            Some(voice) => voice.as_str(),
            None => "BALANCED",
        }
    }
}

impl From<Voice> for VoiceLean {
    fn from(voice: Voice) -> Self {
        match voice {
            Voice::Logic => Self::Logic,
            Voice::Instinct => Self::Instinct,
            Voice::Empathy => Self::Empathy,
            Voice::Ghost => Self::Ghost,
        }
    }
}

impl fmt::Display for VoiceLean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far the leading voice is ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Within the balanced gap.
    Low,
    /// Ahead, but not by much.
    Medium,
    /// Clearly ahead.
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// Result of ranking the voice scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominantVoice {
    /// Leading voice, or balanced.
    pub voice: VoiceLean,
    /// How clear the lead is.
    pub confidence: Confidence,
    /// Score difference between first and second place.
    pub gap: i32,
}

/// Rank the scores and classify the lead.
///
/// Ties keep `LOGIC, INSTINCT, EMPATHY, GHOST` order, so an exact tie is
/// always balanced anyway.
pub fn dominant_voice(scores: &VoiceScores, thresholds: VoiceThresholds) -> DominantVoice {
    let ranked = scores.ranked();
    let (top, top_score) = ranked[0];
    let gap = top_score.saturating_sub(ranked[1].1);

    if gap < thresholds.balanced_gap {
        return DominantVoice {
            voice: VoiceLean::Balanced,
            confidence: Confidence::Low,
            gap,
        };
    }

    let confidence = if gap > thresholds.high_gap {
        Confidence::High
    } else {
        Confidence::Medium
    };
    DominantVoice {
        voice: top.into(),
        confidence,
        gap,
    }
}

/// The ending a lean leads to.
pub fn ending_for(lean: VoiceLean) -> EndingPath {
    match lean {
        VoiceLean::Logic => EndingPath::Stability,
        VoiceLean::Instinct => EndingPath::Escalation,
        VoiceLean::Empathy => EndingPath::Humanized,
        VoiceLean::Ghost => EndingPath::Transcendence,
        VoiceLean::Balanced => EndingPath::Balanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(logic: i32, instinct: i32, empathy: i32, ghost: i32) -> VoiceScores {
        VoiceScores {
            logic,
            instinct,
            empathy,
            ghost,
        }
    }

    #[test]
    fn narrow_lead_is_balanced() {
        let d = dominant_voice(&scores(10, 8, 0, 0), VoiceThresholds::default());
        assert_eq!(d.voice, VoiceLean::Balanced);
        assert_eq!(d.confidence, Confidence::Low);
        assert_eq!(d.gap, 2);
    }

    #[test]
    fn wide_lead_is_high() {
        let d = dominant_voice(&scores(20, 0, 0, 0), VoiceThresholds::default());
        assert_eq!(d.voice, VoiceLean::Logic);
        assert_eq!(d.confidence, Confidence::High);
    }

    #[test]
    fn threshold_edges() {
        let t = VoiceThresholds::default();
        assert_eq!(dominant_voice(&scores(0, 5, 0, 0), t).confidence, Confidence::Medium);
        assert_eq!(dominant_voice(&scores(0, 0, 15, 0), t).confidence, Confidence::Medium);
        assert_eq!(dominant_voice(&scores(0, 0, 0, 16), t).confidence, Confidence::High);
        assert_eq!(dominant_voice(&scores(0, 0, 0, 16), t).voice, VoiceLean::Ghost);
    }

    #[test]
    fn all_zero_is_balanced() {
        let d = dominant_voice(&VoiceScores::default(), VoiceThresholds::default());
        assert_eq!(d.voice, VoiceLean::Balanced);
        assert_eq!(ending_for(d.voice), EndingPath::Balanced);
    }

    #[test]
    fn ending_map() {
        assert_eq!(ending_for(VoiceLean::Logic), EndingPath::Stability);
        assert_eq!(ending_for(VoiceLean::Instinct), EndingPath::Escalation);
        assert_eq!(ending_for(VoiceLean::Empathy), EndingPath::Humanized);
        assert_eq!(ending_for(VoiceLean::Ghost), EndingPath::Transcendence);
    }

    #[test]
    fn custom_thresholds() {
        let t = VoiceThresholds {
            balanced_gap: 10,
            high_gap: 25,
        };
        assert_eq!(dominant_voice(&scores(30, 22, 0, 0), t).voice, VoiceLean::Balanced);
        assert_eq!(dominant_voice(&scores(30, 12, 0, 0), t).confidence, Confidence::Medium);
    }

    #[test]
    fn lean_wire_names() {
        assert_eq!(serde_json::to_string(&VoiceLean::Balanced).unwrap(), r#""BALANCED""#);
        assert_eq!(VoiceLean::from(Voice::Empathy).to_string(), "EMPATHY");
    }
}
