//! HTTP transport shared by call objects.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ErrorInfo, ErrorKind, Result};
use crate::request::RequestConfig;
use crate::response::Reply;

/// Thin wrapper over a pooled `reqwest::Client`.
///
/// Cloning is cheap and shares the connection pool, so one transport can be
/// handed to any number of call objects. The transport never retries and
/// never applies its own request timeout; call objects own their timeouts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ErrorInfo::with_source(ErrorKind::ConfigError, e.to_string(), e)
            })?;

        Ok(Self { inner, config })
    }

    /// Create a new transport with default configuration.
    pub fn default_transport() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and wait for the full reply.
    ///
    /// Failures are folded into the returned [`Reply`]; this never errors.
    /// Header names that differ only in case are sent once.
    pub async fn send(&self, request: &RequestConfig) -> Reply {
        let url = match request.full_url() {
            Ok(url) => url,
            Err(err) => return Reply::failed(err.message),
        };

        let headers = match wire_headers(request) {
            Ok(headers) => headers,
            Err(message) => return Reply::failed(message),
        };
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), url.clone())
            .headers(headers);

        if !request.body.is_empty() {
            req = req
                .header("Content-Length", request.body.len().to_string())
                .body(request.body.clone());
        }

        if self.config.enable_tracing {
            debug!(
                method = ?request.method,
                url = %url,
                body_len = request.body.len(),
                "Sending request"
            );
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = ErrorInfo::from(err);
                warn!(url = %url, error = %err.message, "Request failed before a response");
                return Reply::failed(err.message);
            }
        };

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                let err = ErrorInfo::from(err);
                warn!(status, error = %err.message, "Failed to read response body");
                return Reply::failed(err.message);
            }
        };

        if self.config.enable_tracing {
            if (200..300).contains(&status) {
                debug!(status, content_length = body.len(), "Response received");
            } else {
                info!(status, content_length = body.len(), "Non-success response");
            }
        }

        Reply::new(status, headers, body)
    }
}

/// Build the header map sent on the wire.
///
/// HTTP header names are case-insensitive, so names that differ only in case
/// collapse to one header: the spelling that sorts last byte-wise wins. The
/// computed `Authorization` value replaces any header of that name.
fn wire_headers(request: &RequestConfig) -> std::result::Result<HeaderMap, String> {
    let mut entries: Vec<_> = request.headers.iter().collect();
    entries.sort();

    let mut headers = HeaderMap::with_capacity(entries.len() + 1);
    for (name, value) in entries {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| format!("Invalid header name '{}'", name))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| format!("Invalid value for header '{}'", name))?;
        headers.insert(header_name, header_value);
    }

    if let Some(authorization) = &request.authorization {
        let value = HeaderValue::from_str(authorization)
            .map_err(|_| "Invalid Authorization header value".to_string())?;
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
