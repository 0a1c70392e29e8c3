/// Alias for `Result<T, HumError>`.
pub type HumResult<T> = Result<T, HumError>;

/// Errors raised while interpreting external input against the state model.
///
/// Mutators never return these: an unknown id passed to the engine is a
/// logged no-op. They surface only where text is parsed into typed values
/// (CLI arguments, dialogue-service payloads).
#[derive(Debug, thiserror::Error)]
pub enum HumError {
    /// The NPC id is not part of the cast.
    #[error("unknown npc: \"{0}\"")]
    UnknownNpc(String),

    /// The location id is not on the map.
    #[error("unknown location: \"{0}\"")]
    UnknownLocation(String),

    /// A string could not be parsed into the named value kind.
    #[error("invalid {kind}: \"{value}\"")]
    InvalidValue {
        /// The kind of value being parsed (e.g. "voice").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl HumError {
    pub(crate) fn invalid(kind: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            kind,
            value: value.to_string(),
        }
    }
}
