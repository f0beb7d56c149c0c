//! Error types for paypal-rest-client.
//!
//! Every failure of a call object is described by one [`ErrorInfo`]. Call
//! objects never return these from `call()`; they store the latest one and
//! publish it through a `Failed` event.

use std::sync::Arc;

/// Result type alias for fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, ErrorInfo>;

/// A value describing one failure.
///
/// Immutable once built: the `with_*` methods consume the value and return a
/// new one. Messages copied from server replies should go through
/// [`ErrorInfo::sanitized`] first.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ErrorInfo {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Human readable message.
    pub message: String,
    /// Whether the operation was aborted or only warned about.
    pub severity: Severity,
    /// Raw server detail, if the server sent one.
    pub detail: Option<String>,
    /// Name of the call object that recorded the error.
    pub source_object_name: String,
    /// Optional source error.
    #[source]
    pub source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl ErrorInfo {
    /// Create a new critical error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            severity: Severity::Critical,
            detail: None,
            source_object_name: String::new(),
            source: None,
        }
    }

    /// Create a new error with the given kind, message and source.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Arc::new(source)),
            ..Self::new(kind, message)
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InputError, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutputError, message)
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestError, message)
    }

    /// Build an error whose message comes from a server reply.
    ///
    /// Credentials are redacted and long bodies truncated.
    pub fn sanitized(kind: ErrorKind, message: &str) -> Self {
        Self::new(kind, sanitize_error_message(message))
    }

    /// Attach the raw server detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Record which call object produced the error.
    pub fn with_source_object(mut self, name: impl Into<String>) -> Self {
        self.source_object_name = name.into();
        self
    }

    /// Returns true if this error aborted the operation.
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }

    /// Returns true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::RequestError && self.message == TIMED_OUT
    }
}

/// Message recorded when the timeout fires before the reply arrives.
pub const TIMED_OUT: &str = "timed out";

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// A precondition failed before any I/O.
    #[error("Input error")]
    InputError,

    /// The reply did not have the expected shape, or a domain postcondition
    /// failed.
    #[error("Output error")]
    OutputError,

    /// The reply body was not valid JSON.
    #[error("JSON parsing error")]
    JsonParsingError,

    /// Transport failure, HTTP error status or timeout.
    #[error("Request error")]
    RequestError,

    /// The client could not be configured.
    #[error("Configuration error")]
    ConfigError,
}

/// How serious an error is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational; the operation continued.
    Warning,
    /// The operation was aborted.
    #[default]
    Critical,
}

impl From<reqwest::Error> for ErrorInfo {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            TIMED_OUT.to_string()
        } else {
            sanitize_error_message(&err.to_string())
        };
        let kind = if err.is_builder() {
            ErrorKind::ConfigError
        } else {
            ErrorKind::RequestError
        };
        ErrorInfo::with_source(kind, message, err)
    }
}

impl From<serde_json::Error> for ErrorInfo {
    fn from(err: serde_json::Error) -> Self {
        ErrorInfo::with_source(ErrorKind::JsonParsingError, err.to_string(), err)
    }
}

impl From<url::ParseError> for ErrorInfo {
    fn from(err: url::ParseError) -> Self {
        ErrorInfo::with_source(ErrorKind::InputError, format!("Invalid URL: {}", err), err)
    }
}

impl From<serde_urlencoded::ser::Error> for ErrorInfo {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        ErrorInfo::with_source(ErrorKind::InputError, err.to_string(), err)
    }
}

/// Sanitize an error message to prevent exposing credentials.
///
/// This function:
/// - Redacts `Bearer`, `Basic` and `MAC` authorization values
/// - Redacts PayPal access tokens (`A21AA...`)
/// - Truncates messages longer than 500 characters
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    if let Ok(auth_pattern) = regex_lite::Regex::new(r"(Bearer|Basic|MAC) [A-Za-z0-9._~+/=-]+") {
        sanitized = auth_pattern
            .replace_all(&sanitized, "$1 [REDACTED]")
            .to_string();
    }

    if let Ok(token_pattern) = regex_lite::Regex::new(r"A21AA[A-Za-z0-9_-]{20,}") {
        sanitized = token_pattern
            .replace_all(&sanitized, "[REDACTED_TOKEN]")
            .to_string();
    }

    if sanitized.chars().count() > MAX_LENGTH {
        sanitized = sanitized.chars().take(MAX_LENGTH).collect();
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
