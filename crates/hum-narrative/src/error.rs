//! Error types for the narrative crate.

use thiserror::Error;

/// Result type for save/load operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while loading or writing a save.
///
/// Engine mutators never fail; loading is the only fallible operation.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The save was written by an incompatible major version.
    #[error("incompatible save version {found} (engine supports {expected}.x)")]
    IncompatibleVersion {
        /// Version found in the save.
        found: String,
        /// Major version this engine reads.
        expected: u64,
    },

    /// The version string is not `major.minor.patch`.
    #[error("invalid save version: \"{0}\"")]
    InvalidVersion(String),

    /// The save has no `meta.version` field.
    #[error("save has no version")]
    MissingVersion,

    /// The save is not valid JSON or does not match the state schema.
    #[error("malformed save: {0}")]
    Json(#[from] serde_json::Error),
}
