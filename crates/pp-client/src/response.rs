//! Completed HTTP replies and PayPal's error envelope.

use std::collections::HashMap;

use bytes::Bytes;
use serde::Deserialize;

use crate::error::{sanitize_error_message, ErrorInfo, ErrorKind};

/// A finished HTTP exchange.
///
/// A reply carries a transport error either when the connection failed (no
/// status) or when the server answered with an HTTP error status.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub(crate) status: Option<u16>,
    pub(crate) reason: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Bytes,
    pub(crate) transport_error: Option<String>,
}

impl Reply {
    /// Build a reply from its parts. Header names are stored lowercase.
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();
        let transport_error = (status >= 400).then(|| format!("HTTP {} {}", status, reason));
        Self {
            status: Some(status),
            reason,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
            body: body.into(),
            transport_error,
        }
    }

    /// A reply for a request that never produced a response.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            transport_error: Some(message.into()),
            ..Default::default()
        }
    }

    /// HTTP status, if a response was received.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Canonical reason phrase of the status.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// PayPal's correlation id for support requests.
    pub fn debug_id(&self) -> Option<&str> {
        self.header("paypal-debug-id")
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns true if the exchange failed at transport or HTTP level.
    pub fn is_error(&self) -> bool {
        self.transport_error.is_some()
    }

    pub fn transport_error(&self) -> Option<&str> {
        self.transport_error.as_deref()
    }

    /// Returns true for statuses whose bodies carry PayPal's error envelope:
    /// 400–404 and 500–511.
    pub fn has_error_envelope_status(&self) -> bool {
        matches!(self.status, Some(400..=404) | Some(500..=511))
    }

    /// Generic error derived from the status and reason, or from the
    /// transport failure when there is no status.
    pub fn generic_error(&self) -> ErrorInfo {
        let message = match self.status {
            Some(status) => format!("HTTP {} {}", status, self.reason).trim_end().to_string(),
            None => self
                .transport_error
                .clone()
                .unwrap_or_else(|| "Request failed".to_string()),
        };
        let err = ErrorInfo::sanitized(ErrorKind::RequestError, &message);
        if self.body.is_empty() {
            err
        } else {
            err.with_detail(sanitize_error_message(&String::from_utf8_lossy(&self.body)))
        }
    }
}

/// PayPal's JSON error body.
///
/// The payments API sends `name`/`message`/`details`; the OAuth endpoint
/// sends `error`/`error_description`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub debug_id: Option<String>,
    #[serde(default)]
    pub information_link: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ErrorEnvelope {
    /// Parse an envelope from a reply body. Returns `None` unless the body is
    /// a JSON object.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// The human readable message, if the envelope carries one.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error_description.as_deref())
            .filter(|m| !m.is_empty())
    }

    /// Render `details` for diagnostics.
    ///
    /// Strings pass through; `[{field, issue}]` arrays become
    /// `field: issue` pairs joined by `; `; anything else is compact JSON.
    /// Empty details render as `None`.
    pub fn detail(&self) -> Option<String> {
        match self.details.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) if items.is_empty() => None,
            serde_json::Value::Array(items) => {
                let issues: Vec<String> = items
                    .iter()
                    .map(|item| {
                        let field = item.get("field").and_then(|f| f.as_str());
                        let issue = item.get("issue").and_then(|i| i.as_str());
                        match (field, issue) {
                            (Some(field), Some(issue)) => format!("{}: {}", field, issue),
                            (None, Some(issue)) => issue.to_string(),
                            _ => item.to_string(),
                        }
                    })
                    .collect();
                Some(issues.join("; "))
            }
            other => Some(other.to_string()),
        }
    }

    /// Convert into an error, if a message is present.
    pub fn to_error(&self) -> Option<ErrorInfo> {
        let message = self.message()?;
        let err = ErrorInfo::sanitized(ErrorKind::RequestError, message);
        Some(match self.detail() {
            Some(detail) => err.with_detail(sanitize_error_message(&detail)),
            None => err,
        })
    }
}
