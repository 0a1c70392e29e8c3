//! Versioned save snapshots.
//!
//! A save is `{ "meta": { version, saved_at, play_time }, "state": GameState }`.
//! Loading refuses a save from another major version and accepts older
//! minor versions by letting serde default the fields they lack.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use hum_core::GameState;

use crate::error::{SaveError, SaveResult};

/// Version written into new saves.
pub const SAVE_VERSION: &str = "1.1.0";

const SAVE_MAJOR: u64 = 1;
const SAVE_MINOR: u64 = 1;

/// Header of a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMeta {
    /// `major.minor.patch` of the format.
    pub version: String,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// Total seconds played up to the save.
    #[serde(default)]
    pub play_time: u64,
}

/// A complete snapshot of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    /// Header.
    pub meta: SaveMeta,
    /// The state tree.
    pub state: GameState,
}

impl SaveGame {
    /// Wrap a state in a save stamped with the current version and time.
    pub fn new(state: GameState, play_time: u64) -> Self {
        Self {
            meta: SaveMeta {
                version: SAVE_VERSION.to_string(),
                saved_at: Utc::now(),
                play_time,
            },
            state,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> SaveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a save, checking the version before the state schema.
    pub fn from_json(json: &str) -> SaveResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        let version = value
            .pointer("/meta/version")
            .and_then(Value::as_str)
            .ok_or(SaveError::MissingVersion)?;
        check_version(version)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Check that this engine can load the save.
    pub fn check_version(&self) -> SaveResult<()> {
        check_version(&self.meta.version)
    }
}

/// Split `major.minor.patch` into numbers.
pub fn parse_version(version: &str) -> SaveResult<(u64, u64, u64)> {
    let invalid = || SaveError::InvalidVersion(version.to_string());
    let mut parts = version.trim().split('.');
    let mut next = || -> SaveResult<u64> {
        parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)
    };
    let parsed = (next()?, next()?, next()?);
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(parsed)
}

fn check_version(version: &str) -> SaveResult<()> {
    let (major, minor, _) = parse_version(version)?;
    if major != SAVE_MAJOR {
        warn!(version, expected = SAVE_MAJOR, "incompatible save version");
        return Err(SaveError::IncompatibleVersion {
            found: version.to_string(),
            expected: SAVE_MAJOR,
        });
    }
    if minor < SAVE_MINOR {
        info!(version, current = SAVE_VERSION, "migrating older save");
    } else if minor > SAVE_MINOR {
        warn!(
            version,
            current = SAVE_VERSION,
            "save is newer than this engine; unknown fields are ignored"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parsing() {
        assert_eq!(parse_version("1.1.0").unwrap(), (1, 1, 0));
        assert!(matches!(parse_version("1.x.0"), Err(SaveError::InvalidVersion(_))));
        assert!(matches!(parse_version("1.1"), Err(SaveError::InvalidVersion(_))));
        assert!(matches!(parse_version("1.1.0.4"), Err(SaveError::InvalidVersion(_))));
    }

    #[test]
    fn json_round_trip() {
        let save = SaveGame::new(GameState::new(), 42);
        let json = save.to_json().unwrap();
        assert!(json.contains("\"version\": \"1.1.0\""));
        let back = SaveGame::from_json(&json).unwrap();
        assert_eq!(back, save);
    }

    #[test]
    fn rejects_other_major_version() {
        let mut save = SaveGame::new(GameState::new(), 0);
        save.meta.version = "2.0.0".into();
        let json = save.to_json().unwrap();
        let err = SaveGame::from_json(&json).unwrap_err();
        assert!(matches!(err, SaveError::IncompatibleVersion { expected: 1, .. }));
    }

    #[test]
    fn rejects_missing_version_and_garbage() {
        assert!(matches!(
            SaveGame::from_json(r#"{"meta":{},"state":{}}"#),
            Err(SaveError::MissingVersion)
        ));
        assert!(matches!(SaveGame::from_json("not json"), Err(SaveError::Json(_))));
    }

    #[test]
    fn older_minor_version_defaults_missing_fields() {
        let mut value = serde_json::to_value(SaveGame::new(GameState::new(), 7)).unwrap();
        value["meta"]["version"] = "1.0.0".into();
        let state = value["state"].as_object_mut().unwrap();
        state.remove("event_log");
        state["quests"].as_object_mut().unwrap().remove("fired_triggers");
        value["meta"].as_object_mut().unwrap().remove("play_time");

        let save = SaveGame::from_json(&value.to_string()).unwrap();
        assert!(save.state.event_log.is_empty());
        assert!(save.state.quests.fired_triggers.is_empty());
        assert_eq!(save.meta.play_time, 0);
    }
}
