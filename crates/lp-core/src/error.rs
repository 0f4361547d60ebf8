//! Error types for lunch-picker

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lunch-picker
#[derive(Debug, Error)]
pub enum LunchPickerError {
    /// A required request field was empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Comment content is longer than allowed
    #[error("Comment must be at most {max} characters (got {actual})")]
    ContentTooLong { max: usize, actual: usize },

    /// Comment content contains a link
    #[error("Comments containing links are not allowed")]
    LinkNotAllowed,

    /// Admin secret did not match
    #[error("Admin authorization failed")]
    Authorization,

    /// Radius is not one of the configured options
    #[error("Radius {radius}m is not allowed (options: {options:?})")]
    InvalidRadius { radius: u64, options: Vec<u64> },

    /// Spreadsheet response could not be decoded
    #[error("Invalid sheet response: {0}")]
    InvalidSheet(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<LunchPickerError>,
    },
}

impl LunchPickerError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        LunchPickerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the caller sent something the content or auth policy rejects.
    ///
    /// These map to "bad request" style responses; everything else is an
    /// internal failure.
    pub fn is_client_error(&self) -> bool {
        match self {
            LunchPickerError::MissingField(_)
            | LunchPickerError::ContentTooLong { .. }
            | LunchPickerError::LinkNotAllowed
            | LunchPickerError::Authorization
            | LunchPickerError::InvalidRadius { .. } => true,
            LunchPickerError::WithContext { source, .. } => source.is_client_error(),
            _ => false,
        }
    }
}

impl From<toml::de::Error> for LunchPickerError {
    fn from(err: toml::de::Error) -> Self {
        LunchPickerError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for LunchPickerError {
    fn from(err: toml::ser::Error) -> Self {
        LunchPickerError::Toml(err.to_string())
    }
}

/// Result type alias for lunch-picker
pub type Result<T> = std::result::Result<T, LunchPickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LunchPickerError::ContentTooLong {
            max: 200,
            actual: 201,
        };
        assert_eq!(
            err.to_string(),
            "Comment must be at most 200 characters (got 201)"
        );
        assert_eq!(
            LunchPickerError::MissingField("nickname").to_string(),
            "Missing required field: nickname"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = LunchPickerError::LinkNotAllowed.with_context("Failed to add comment");
        assert!(err.to_string().contains("Failed to add comment"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(LunchPickerError::Authorization.is_client_error());
        assert!(!LunchPickerError::InvalidSheet("x".into()).is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LunchPickerError = io_err.into();
        assert!(matches!(err, LunchPickerError::Io(_)));
    }
}
