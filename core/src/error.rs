//! Error types for the partner API client.
//!
//! # Design
//! Three kinds of failure reach the caller. Configuration errors (an
//! operation or parameter missing from the route table) are defects in the
//! build, not conditions to recover from. Validation errors are raised before
//! any request is built. Everything that happens on the wire lands in a
//! single `Request` variant, told apart only by HTTP status and the service
//! error code when the body carries one.

use serde::Deserialize;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = PartnerError> = std::result::Result<T, E>;

/// Errors returned by the client and the operations types.
#[derive(Debug, Error)]
pub enum PartnerError {
    /// A required argument was blank or absent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The route table has no entry for the requested operation.
    #[error("unknown API operation: {0}")]
    UnknownOperation(String),

    /// The route exists but does not declare the logical parameter.
    #[error("API operation {operation} has no parameter named {parameter}")]
    UnknownParameter { operation: String, parameter: String },

    /// The route table could not be loaded or a template is malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request failed on the wire, at the server, or while decoding.
    #[error(transparent)]
    Request(#[from] RequestFailure),
}

impl PartnerError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// HTTP status of a request failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(failure) => failure.status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// A failed request/response exchange.
///
/// `status` is `None` when no HTTP response was received (connection
/// refused, timeout) or when the request could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_failure(.status, .code, .message))]
pub struct RequestFailure {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub message: String,
}

impl RequestFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::transport(format!("request encoding failed: {}", message.into()))
    }

    pub fn decoding(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code: None,
            message: format!("response decoding failed: {}", message.into()),
        }
    }

    /// Build a failure from a non-success response, lifting the service's
    /// `code` / `description` fields out of the body when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ServiceErrorBody>(body) {
            Ok(parsed) if parsed.code.is_some() || parsed.description.is_some() => Self {
                status: Some(status),
                code: parsed.code.map(|c| c.into_string()),
                message: parsed.description.unwrap_or_else(|| body.to_string()),
            },
            _ => Self {
                status: Some(status),
                code: None,
                message: body.to_string(),
            },
        }
    }
}

fn render_failure(status: &Option<u16>, code: &Option<String>, message: &str) -> String {
    match (status, code) {
        (Some(status), Some(code)) => format!("HTTP {status} ({code}): {message}"),
        (Some(status), None) => format!("HTTP {status}: {message}"),
        (None, _) => format!("request failed: {message}"),
    }
}

/// Error envelope returned by the partner API. The code is numeric on some
/// endpoints and a string on others.
#[derive(Deserialize)]
struct ServiceErrorBody {
    code: Option<ErrorCode>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorCode {
    Number(i64),
    Text(String),
}

impl ErrorCode {
    fn into_string(self) -> String {
        match self {
            ErrorCode::Number(n) => n.to_string(),
            ErrorCode::Text(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_body_is_lifted() {
        let failure = RequestFailure::from_status(
            400,
            r#"{"code":600008,"description":"The customer was not found."}"#,
        );
        assert_eq!(failure.status, Some(400));
        assert_eq!(failure.code.as_deref(), Some("600008"));
        assert_eq!(failure.message, "The customer was not found.");
        assert_eq!(failure.to_string(), "HTTP 400 (600008): The customer was not found.");
    }

    #[test]
    fn plain_body_is_kept_verbatim() {
        let failure = RequestFailure::from_status(500, "internal error");
        assert_eq!(failure.code, None);
        assert_eq!(failure.message, "internal error");
        assert_eq!(failure.to_string(), "HTTP 500: internal error");
    }

    #[test]
    fn string_codes_are_accepted() {
        let failure = RequestFailure::from_status(409, r#"{"code":"Conflict"}"#);
        assert_eq!(failure.code.as_deref(), Some("Conflict"));
        assert_eq!(failure.message, r#"{"code":"Conflict"}"#);
    }

    #[test]
    fn status_helpers() {
        let err = PartnerError::from(RequestFailure::from_status(404, ""));
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));

        let err = PartnerError::from(RequestFailure::transport("connection refused"));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "request failed: connection refused");
        assert!(!PartnerError::invalid_argument("x").is_not_found());
    }
}
