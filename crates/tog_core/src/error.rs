use thiserror::Error;

/// Errors raised at the edges of the engine (parsing, config, JSON API).
///
/// Match transitions themselves never fail: invalid transitions are ignored
/// and reported through the log instead.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Unknown position label: {0}")]
    UnknownPosition(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            TrackerError::Deserialization(err.to_string())
        } else {
            TrackerError::Serialization(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for TrackerError {
    fn from(err: serde_yaml::Error) -> Self {
        TrackerError::Deserialization(err.to_string())
    }
}

impl TrackerError {
    /// Errors caused by the caller's input rather than the engine.
    pub fn is_input_error(&self) -> bool {
        match self {
            TrackerError::UnknownPosition(_) => true,
            TrackerError::SchemaVersion { .. } => true,
            TrackerError::Deserialization(_) => true,
            TrackerError::InvalidConfig(_) => true,
            TrackerError::Serialization(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
