//! Error types for clause-security

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedactionError>;

#[derive(Error, Debug, Clone)]
pub enum RedactionError {
    /// The entity recognizer could not run. The document must not be
    /// processed any further.
    #[error("Entity recognition unavailable: {0}")]
    RecognitionUnavailable(String),

    #[error("Invalid pattern '{name}': {message}")]
    InvalidPattern { name: String, message: String },

    #[error("Unknown entity type '{0}'")]
    UnknownEntityType(String),
}
