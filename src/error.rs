use thiserror::Error;

use crate::notation::ParseError;

/// A malformed instrument bundle.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("bundle has no `notes`")]
    MissingNotes,
    #[error("bundle `notes` must be a mapping of part names to note strings, found {found}")]
    NotesNotMapping { found: &'static str },
    #[error("part '{part}' is invalid: {reason}")]
    InvalidPart { part: String, reason: String },
    #[error("invalid operation in `{field}`: {reason}")]
    InvalidOp { field: &'static str, reason: String },
    #[error("bundle is not valid JSON: {0}")]
    Json(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for ConfigurationError {
    fn from(err: serde_json::Error) -> Self {
        ConfigurationError::Json(Box::new(err))
    }
}

/// Everything that can go wrong while loading an instrument.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
