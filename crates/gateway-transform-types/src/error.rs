// Error type — single flat error for the adapter and its types.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discriminator covering translation failures, wire validation failures,
/// and HTTP/transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    // Translation errors — raised before any network call.
    UnsupportedContentPart,
    UnsupportedRole,
    UnsupportedMode,

    // Wire decode errors.
    Validation,
    NoChoice,

    // Gateway errors (from HTTP responses).
    Authentication,
    AccessDenied,
    NotFound,
    InvalidRequest,
    RateLimit,
    Server,

    // Client-side errors.
    RequestTimeout,
    Network,
    Stream,
    Configuration,
}

impl ErrorKind {
    /// Returns `true` for errors raised while translating the request,
    /// i.e. before any I/O happened. These are never retryable: the same
    /// input will fail the same way.
    pub fn is_translation_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedContentPart | Self::UnsupportedRole | Self::UnsupportedMode
        )
    }
}

/// The single error type for the adapter.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    // Gateway error fields
    pub provider: Option<String>,
    pub status_code: Option<u16>,
    pub error_code: Option<String>,
    pub retry_after: Option<Duration>,
    pub raw: Option<serde_json::Value>,
}

impl Error {
    fn simple(kind: ErrorKind, message: String, retryable: bool) -> Self {
        Self {
            kind,
            message,
            retryable,
            source: None,
            provider: None,
            status_code: None,
            error_code: None,
            retry_after: None,
            raw: None,
        }
    }

    /// Construct from an HTTP status code returned by the gateway.
    pub fn from_http_status(
        status: u16,
        message: String,
        provider: &str,
        raw: Option<serde_json::Value>,
        retry_after: Option<Duration>,
    ) -> Self {
        let (kind, retryable) = match status {
            400 | 422 => (ErrorKind::InvalidRequest, false),
            401 => (ErrorKind::Authentication, false),
            403 => (ErrorKind::AccessDenied, false),
            404 => (ErrorKind::NotFound, false),
            408 => (ErrorKind::RequestTimeout, true),
            429 => (ErrorKind::RateLimit, true),
            500..=599 => (ErrorKind::Server, true),
            _ => (ErrorKind::Server, true), // Unknown defaults to retryable
        };

        // Message-based reclassification for gateways that return the wrong
        // status (e.g. 400 for a bad consumer id).
        let kind = Self::classify_by_message(&message, kind);
        let retryable = match kind {
            ErrorKind::Authentication
            | ErrorKind::AccessDenied
            | ErrorKind::NotFound
            | ErrorKind::InvalidRequest => false,
            _ => retryable,
        };

        Self {
            kind,
            message,
            retryable,
            source: None,
            provider: Some(provider.to_string()),
            status_code: Some(status),
            error_code: None,
            retry_after,
            raw,
        }
    }

    /// Convenience: a content part kind that cannot be translated for a role.
    pub fn unsupported_content_part(role: &str, kind: &str) -> Self {
        Self::simple(
            ErrorKind::UnsupportedContentPart,
            format!("Unsupported content part kind '{kind}' in '{role}' message"),
            false,
        )
    }

    /// Convenience: a message role the gateway has no representation for.
    pub fn unsupported_role(role: &str) -> Self {
        Self::simple(
            ErrorKind::UnsupportedRole,
            format!("Unsupported message role '{role}'"),
            false,
        )
    }

    /// Convenience: a generation mode the gateway does not implement.
    pub fn unsupported_mode(mode: &str) -> Self {
        Self::simple(
            ErrorKind::UnsupportedMode,
            format!("Unsupported generation mode '{mode}'"),
            false,
        )
    }

    /// Convenience: a wire payload that failed schema validation.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::simple(ErrorKind::Validation, message.into(), false)
    }

    /// Convenience: gateway response carried an empty choice list.
    pub fn no_choice() -> Self {
        Self::simple(ErrorKind::NoChoice, "No choice in response".into(), false)
    }

    /// Convenience: configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::simple(ErrorKind::Configuration, message.into(), false)
    }

    /// Convenience: network error with source.
    pub fn network(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let mut err = Self::simple(ErrorKind::Network, message.into(), true);
        err.source = Some(Box::new(source));
        err
    }

    /// Convenience: stream error with source.
    pub fn stream(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let mut err = Self::simple(ErrorKind::Stream, message.into(), true);
        err.source = Some(Box::new(source));
        err
    }

    fn classify_by_message(message: &str, default: ErrorKind) -> ErrorKind {
        let lower = message.to_lowercase();
        if lower.contains("not found") || lower.contains("does not exist") {
            ErrorKind::NotFound
        } else if lower.contains("unauthorized")
            || lower.contains("invalid consumer")
            || lower.contains("signature")
        {
            ErrorKind::Authentication
        } else {
            default
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_errors_not_retryable() {
        for err in [
            Error::unsupported_content_part("user", "tool_call"),
            Error::unsupported_role("developer"),
            Error::unsupported_mode("json"),
        ] {
            assert!(err.kind.is_translation_error());
            assert!(!err.retryable);
            assert!(err.status_code.is_none());
        }
    }

    #[test]
    fn test_unsupported_content_part_message_names_role_and_kind() {
        let err = Error::unsupported_content_part("assistant", "image");
        assert!(err.message.contains("image"));
        assert!(err.message.contains("assistant"));
    }

    #[test]
    fn test_no_choice_message() {
        let err = Error::no_choice();
        assert_eq!(err.kind, ErrorKind::NoChoice);
        assert_eq!(err.message, "No choice in response");
        assert!(!err.retryable);
    }

    #[test]
    fn test_validation_not_retryable() {
        let err = Error::validation("missing field `choices`");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(!err.retryable);
    }

    #[test]
    fn test_from_http_status_mapping() {
        let cases = vec![
            (400, ErrorKind::InvalidRequest, false),
            (401, ErrorKind::Authentication, false),
            (403, ErrorKind::AccessDenied, false),
            (404, ErrorKind::NotFound, false),
            (408, ErrorKind::RequestTimeout, true),
            (422, ErrorKind::InvalidRequest, false),
            (429, ErrorKind::RateLimit, true),
            (500, ErrorKind::Server, true),
            (503, ErrorKind::Server, true),
        ];
        for (status, expected_kind, expected_retryable) in cases {
            let err = Error::from_http_status(status, "test".into(), "gateway-transform", None, None);
            assert_eq!(err.kind, expected_kind, "status {status}");
            assert_eq!(err.retryable, expected_retryable, "status {status}");
            assert_eq!(err.status_code, Some(status));
            assert_eq!(err.provider, Some("gateway-transform".to_string()));
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_retryable_server() {
        let err = Error::from_http_status(999, "weird".into(), "gateway-transform", None, None);
        assert_eq!(err.kind, ErrorKind::Server);
        assert!(err.retryable);
    }

    #[test]
    fn test_message_reclassification_signature() {
        // The gateway reports a bad signature as 400; reclassify to Authentication.
        let err = Error::from_http_status(
            400,
            "auth signature verification failed".into(),
            "gateway-transform",
            None,
            None,
        );
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(!err.retryable);
    }

    #[test]
    fn test_from_http_status_with_retry_after_and_raw() {
        let raw = serde_json::json!({"error": {"message": "slow down", "type": "rate_limit"}});
        let err = Error::from_http_status(
            429,
            "slow down".into(),
            "gateway-transform",
            Some(raw.clone()),
            Some(Duration::from_secs(7)),
        );
        assert_eq!(err.retry_after, Some(Duration::from_secs(7)));
        assert_eq!(err.raw, Some(raw));
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = Error::no_choice();
        let display = format!("{err}");
        assert!(display.contains("NoChoice"));
        assert!(display.contains("No choice in response"));
    }

    #[test]
    fn test_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::network("connection failed", inner);
        assert!(std::error::Error::source(&err).is_some());
    }
}
