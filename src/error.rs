use std::path::PathBuf;
use thiserror::Error;

use crate::models::ConfigError;

/// Main error type for junitgen
#[derive(Error, Debug)]
pub enum JunitGenError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Input file must be a Java source file (.java): {0}")]
    NotJavaSource(PathBuf),
}

/// Errors raised while locating testable units in source text.
///
/// These are the only errors that abort a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No class, enum or record declaration found")]
    NoTypeDeclaration,

    #[error("No testable methods found in {0}")]
    NoTestableMethods(String),
}

/// Errors related to the generative backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Stream error: {0}")]
    StreamError(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout(0)
        } else if err.is_connect() {
            BackendError::ConnectionRefused(err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::HttpError {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            BackendError::RequestFailed(err.to_string())
        }
    }
}

/// Errors raised when a backend reply cannot be turned into a test method
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizationError {
    #[error("Backend reply was empty")]
    EmptyReply,

    #[error("No @Test annotation found in backend reply")]
    MissingTestAnnotation,

    #[error("No method body follows the @Test annotation")]
    MissingBody,

    #[error("Unbalanced braces in test method")]
    UnbalancedBraces,
}

/// Why a scenario was rendered from the fallback template instead of the backend
#[derive(Error, Debug)]
pub enum GenerationFailure {
    #[error("{0}")]
    Backend(#[from] BackendError),

    #[error("{0}")]
    Sanitization(#[from] SanitizationError),
}

pub type Result<T> = std::result::Result<T, JunitGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_display() {
        let err = ExtractionError::NoTestableMethods("Calculator".to_string());
        assert_eq!(err.to_string(), "No testable methods found in Calculator");

        let wrapped: JunitGenError = ExtractionError::NoTypeDeclaration.into();
        assert!(wrapped.to_string().starts_with("Extraction error:"));
    }

    #[test]
    fn test_generation_failure_from_backend() {
        let failure: GenerationFailure = BackendError::Timeout(30).into();
        assert_eq!(failure.to_string(), "Request timeout after 30 seconds");
    }

    #[test]
    fn test_generation_failure_from_sanitization() {
        let failure: GenerationFailure = SanitizationError::UnbalancedBraces.into();
        assert!(matches!(failure, GenerationFailure::Sanitization(_)));
        assert_eq!(failure.to_string(), "Unbalanced braces in test method");
    }

    #[test]
    fn test_http_error_display() {
        let err = BackendError::HttpError {
            status: 429,
            message: "Too Many Requests".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 429 - Too Many Requests");
    }
}
