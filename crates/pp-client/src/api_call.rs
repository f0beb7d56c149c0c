//! PayPal-specific request shaping and reply interpretation.
//!
//! [`ApiCallBase`] wraps a [`RequestExecutor`] with:
//! - the `Authorization` header (Basic from client credentials, or Bearer /
//!   MAC from an OAuth token)
//! - PayPal's error envelope on failed replies
//! - a structural check of the reply body against an [`ExpectedJsonType`]

use base64::Engine;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::{ErrorInfo, ErrorKind};
use crate::events::CallEvent;
use crate::executor::RequestExecutor;
use crate::request::RequestMethod;
use crate::response::{ErrorEnvelope, Reply};
use crate::transport::HttpTransport;

/// OAuth token type as returned by the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Bearer,
    Mac,
}

impl TokenType {
    /// Parse the `token_type` field. Case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("bearer") {
            Some(TokenType::Bearer)
        } else if value.eq_ignore_ascii_case("mac") {
            Some(TokenType::Mac)
        } else {
            None
        }
    }

    /// Scheme name used in the `Authorization` header.
    pub fn scheme(&self) -> &'static str {
        match self {
            TokenType::Bearer => "Bearer",
            TokenType::Mac => "MAC",
        }
    }
}

/// Credentials a call authenticates with.
///
/// `Debug` output redacts the secret and token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Authentication {
    client_id: String,
    secret: String,
    token: Option<String>,
    token_type: Option<TokenType>,
}

impl std::fmt::Debug for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authentication")
            .field("client_id", &self.client_id)
            .field("secret", &"[REDACTED]")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .finish()
    }
}

impl Authentication {
    /// Client id / secret pair for HTTP Basic.
    pub fn client_credentials(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// An OAuth token.
    pub fn token(token: impl Into<String>, token_type: TokenType) -> Self {
        Self {
            token: Some(token.into()),
            token_type: Some(token_type),
            ..Default::default()
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn access_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn token_type(&self) -> Option<TokenType> {
        self.token_type
    }

    /// True when both the token and its type are set.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty()) && self.token_type.is_some()
    }

    pub fn has_client_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.secret.is_empty()
    }

    /// The `Authorization` header value.
    ///
    /// Token auth wins when both token and type are set; otherwise Basic from
    /// the client credentials; `None` when neither is configured.
    pub fn authorization_header(&self) -> Option<String> {
        if let (Some(token), Some(token_type)) = (self.token.as_deref(), self.token_type) {
            if !token.is_empty() {
                return Some(format!("{} {}", token_type.scheme(), token));
            }
        }

        if self.client_id.is_empty() && self.secret.is_empty() {
            return None;
        }

        let pair = format!("{}:{}", self.client_id, self.secret);
        Some(format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(pair)
        ))
    }
}

/// Declared shape of a call's reply body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpectedJsonType {
    /// No body expected; whatever arrives is ignored.
    Empty,
    Array,
    #[default]
    Object,
}

/// Executor plus PayPal conventions; concrete calls embed one.
#[derive(Debug)]
pub struct ApiCallBase {
    executor: RequestExecutor,
    authentication: Authentication,
    expected: ExpectedJsonType,
    json: Option<Value>,
}

impl ApiCallBase {
    /// Create a base for a call with the given method, path and reply shape.
    ///
    /// Sets PayPal's default headers: `Accept`, `Accept-Language` and a JSON
    /// `Content-Type`.
    pub fn new(
        object_name: impl Into<String>,
        transport: HttpTransport,
        method: RequestMethod,
        path: impl Into<String>,
        expected: ExpectedJsonType,
    ) -> Self {
        let mut executor = RequestExecutor::new(object_name, transport);
        let request = executor.request_mut();
        request.set_method(method);
        request.set_path(path);
        request.set_header("Accept", "application/json");
        request.set_header("Accept-Language", "en_US");
        request.set_header("Content-Type", "application/json");
        Self {
            executor,
            authentication: Authentication::default(),
            expected,
            json: None,
        }
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut RequestExecutor {
        &mut self.executor
    }

    pub fn authentication(&self) -> &Authentication {
        &self.authentication
    }

    pub fn set_authentication_info(&mut self, authentication: Authentication) {
        self.authentication = authentication;
    }

    pub fn expected_json_type(&self) -> ExpectedJsonType {
        self.expected
    }

    pub fn set_expected_json_type(&mut self, expected: ExpectedJsonType) {
        self.expected = expected;
    }

    /// Write the computed `Authorization` value into the request.
    pub fn set_authentication(&mut self) {
        let header = self.authentication.authorization_header();
        self.executor.request_mut().set_authorization(header);
    }

    /// Parsed reply root from the last successful `check_output`.
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Take ownership of the parsed reply root.
    pub fn take_json(&mut self) -> Option<Value> {
        self.json.take()
    }

    /// Check the raw result against the declared shape and cache the parsed
    /// root.
    pub fn check_output(&mut self) -> bool {
        self.json = None;

        if self.expected == ExpectedJsonType::Empty {
            return true;
        }

        let body = self.executor.result().clone();
        if body.iter().all(u8::is_ascii_whitespace) {
            self.executor.set_error(ErrorInfo::output(format!(
                "Expected a JSON {:?} but the reply was empty",
                self.expected
            )));
            return false;
        }

        let value: Value = match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(err) => {
                self.executor.set_error(ErrorInfo::from(err).with_detail(
                    crate::error::sanitize_error_message(&String::from_utf8_lossy(&body)),
                ));
                return false;
            }
        };

        let matches = match self.expected {
            ExpectedJsonType::Array => value.is_array(),
            ExpectedJsonType::Object => value.is_object(),
            ExpectedJsonType::Empty => true,
        };

        if !matches {
            self.executor.set_error(ErrorInfo::output(format!(
                "Expected a JSON {:?} but received {}",
                self.expected,
                json_kind(&value)
            )));
            return false;
        }

        debug!(object = %self.executor.object_name(), "Reply matched expected shape");
        self.json = Some(value);
        true
    }

    /// Classify a failed reply, preferring PayPal's error envelope.
    pub fn extract_error(&mut self, reply: &Reply) {
        let from_envelope = if reply.has_error_envelope_status() {
            ErrorEnvelope::parse(reply.body()).and_then(|envelope| envelope.to_error())
        } else {
            None
        };

        let error = from_envelope.unwrap_or_else(|| reply.generic_error());
        self.executor.set_error(error);
    }

    /// Record an output error for a domain postcondition.
    pub fn fail_output(&mut self, message: impl Into<String>) {
        self.executor.set_error(ErrorInfo::output(message));
    }

    /// Record an input error for a failed precondition.
    pub fn fail_input(&mut self, message: impl Into<String>) -> bool {
        self.executor.set_error(ErrorInfo::input(message));
        false
    }

    /// Precondition shared by calls that need an OAuth token.
    pub fn require_token(&mut self) -> bool {
        if self.authentication.has_token() {
            true
        } else {
            self.fail_input("An access token is required")
        }
    }

    /// Deserialize the cached reply root into a record.
    pub fn parse_json<T: serde::de::DeserializeOwned>(&mut self) -> Option<T> {
        let value = self.json.take()?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                self.executor.set_error(ErrorInfo::with_source(
                    ErrorKind::JsonParsingError,
                    format!("Reply did not match the expected record: {}", err),
                    err,
                ));
                None
            }
        }
    }
}

/// Accessors every concrete call exposes through its [`ApiCallBase`].
pub trait PayPalCall {
    fn base(&self) -> &ApiCallBase;

    fn base_mut(&mut self) -> &mut ApiCallBase;

    /// Error recorded by the last `call()`, if it failed.
    fn error(&self) -> Option<&ErrorInfo> {
        self.base().executor().error()
    }

    fn in_operation(&self) -> bool {
        self.base().executor().in_operation()
    }

    fn http_status(&self) -> Option<u16> {
        self.base().executor().http_status()
    }

    /// Subscribe to `Succeeded` / `Failed` events.
    fn subscribe(&self) -> broadcast::Receiver<CallEvent> {
        self.base().executor().subscribe()
    }

    fn set_authentication_info(&mut self, authentication: impl Into<Authentication>) {
        self.base_mut().set_authentication_info(authentication.into());
    }

    /// Set the timeout in seconds; `<= 0` disables it.
    fn set_timeout_seconds(&mut self, seconds: i64) {
        self.base_mut().executor_mut().set_timeout_seconds(seconds);
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
