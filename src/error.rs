//! Error types for Octopi operations.

use thiserror::Error;

use crate::traits::PathKind;
use crate::validate::Shape;

/// Errors that can occur during Octopi operations.
#[derive(Debug, Error)]
pub enum OctopiError {
    /// Configuration is missing or incomplete.
    #[error("Octopi configuration required: {0}")]
    ConfigMissing(String),

    /// A caller-supplied argument failed its shape contract.
    #[error("Invalid argument '{argument}': {reason}")]
    Validation {
        argument: String,
        shape: Option<Shape>,
        reason: String,
    },

    /// A path template references a placeholder with no supplied value.
    #[error("Path template '{template}' has no value for ':{placeholder}'")]
    Template {
        template: String,
        placeholder: String,
    },

    /// A resource declaration lacks the requested path template.
    #[error("Resource '{resource}' declares no {kind} path")]
    MissingPath {
        resource: &'static str,
        kind: PathKind,
    },

    /// Entity not found.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// The operation needs a write-capable session.
    #[error("Authentication required: {0}")]
    AuthenticationRequired(String),

    /// API request failed.
    #[error("API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// The response did not have the expected shape.
    #[error("Malformed response from '{path}': {reason}")]
    MalformedResponse { path: String, reason: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl OctopiError {
    /// Build a validation error for `argument` failing `shape`.
    pub(crate) fn invalid(argument: &str, shape: Option<Shape>, reason: impl Into<String>) -> Self {
        Self::Validation {
            argument: argument.to_string(),
            shape,
            reason: reason.into(),
        }
    }

    /// True for failures surfaced from the transport collaborator.
    ///
    /// These are never retried by the library; retry policy belongs to the
    /// caller or the transport.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. }
                | Self::MalformedResponse { .. }
                | Self::HttpError(_)
                | Self::ParseError(_)
                | Self::UrlError(_)
                | Self::RateLimited { .. }
        )
    }

    /// The HTTP status code, if the service answered with one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => *status_code,
            Self::RateLimited { .. } => Some(429),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Octopi operations.
pub type Result<T> = core::result::Result<T, OctopiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_argument() {
        let err = OctopiError::invalid("fo o", Some(Shape::User), "fo o is an invalid username");
        let msg = err.to_string();
        assert!(msg.contains("fo o"));
        assert!(msg.contains("invalid username"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_classification() {
        let err = OctopiError::ApiError {
            message: "boom".to_string(),
            status_code: Some(502),
        };
        assert!(err.is_transport());
        assert_eq!(err.status_code(), Some(502));

        let err = OctopiError::NotFound {
            resource: "user",
            id: "ghost".to_string(),
        };
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "user 'ghost' not found");
    }
}
