//! Common error types and handling for Teamline

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Teamline application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the error code for audit/log tagging
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Conflict(_) => "CONFLICT",
            Error::Persistence(_) => "PERSISTENCE_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller can recover by correcting input and retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::Validation("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            Error::NotFound("test".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(Error::Conflict("test".to_string()).error_code(), "CONFLICT");
        assert_eq!(
            Error::Persistence("test".to_string()).error_code(),
            "PERSISTENCE_ERROR"
        );
        assert_eq!(
            Error::Internal("test".to_string()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display_includes_message() {
        let err = Error::Validation("missing invitee".to_string());
        assert_eq!(err.to_string(), "Validation error: missing invitee");
    }

    #[test]
    fn test_unexpected_wraps_anyhow() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert_eq!(err.error_code(), "UNEXPECTED_ERROR");
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::Validation("x".to_string()).is_recoverable());
        assert!(Error::NotFound("x".to_string()).is_recoverable());
        assert!(!Error::Persistence("x".to_string()).is_recoverable());
        assert!(!Error::Internal("x".to_string()).is_recoverable());
    }
}
