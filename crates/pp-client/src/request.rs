//! Description of one HTTP call.

use std::collections::HashMap;

use bytes::Bytes;
use serde::Serialize;
use url::Url;

use crate::error::{ErrorInfo, Result};

/// HTTP request method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
            RequestMethod::Head => reqwest::Method::HEAD,
        }
    }

    /// POST and PUT must carry a body.
    pub fn requires_body(&self) -> bool {
        matches!(self, RequestMethod::Post | RequestMethod::Put)
    }
}

/// The full description of one HTTP call.
///
/// Mutated by a call object before it sends; the executor clones it for the
/// request in flight.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub(crate) base_url: String,
    pub(crate) path: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) method: RequestMethod,
    pub(crate) authorization: Option<String>,
}

impl RequestConfig {
    /// Create a request description for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }

    pub fn set_method(&mut self, method: RequestMethod) {
        self.method = method;
    }

    /// Set a header. Names are case-sensitive here; setting the same name
    /// twice replaces the value. On the wire, names that differ only in case
    /// are sent once (see [`HttpTransport::send`](crate::HttpTransport::send)).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(name)
    }

    /// Append a query parameter.
    pub fn add_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query_params.push((name.into(), value.into()));
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    pub fn clear_query(&mut self) {
        self.query_params.clear();
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Set the raw body bytes.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    /// Serialize a value as the JSON body.
    pub fn set_json_body<T: Serialize + ?Sized>(&mut self, body: &T) -> Result<()> {
        self.body = Bytes::from(serde_json::to_vec(body)?);
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(())
    }

    /// Serialize a value as a form-urlencoded body.
    pub fn set_form_body<T: Serialize + ?Sized>(&mut self, body: &T) -> Result<()> {
        self.body = Bytes::from(serde_urlencoded::to_string(body)?);
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        Ok(())
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// Set the computed `Authorization` header value.
    pub fn set_authorization(&mut self, value: Option<String>) {
        self.authorization = value;
    }

    /// Merge base URL, path and query parameters.
    ///
    /// Fails when the base URL is not an absolute http(s) URL.
    pub fn full_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)?;
        if !matches!(base.scheme(), "http" | "https") || !base.has_host() {
            return Err(ErrorInfo::input(format!(
                "Invalid base URL: {}",
                self.base_url
            )));
        }

        let mut url = base;
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        url.set_path(&joined);

        if !self.query_params.is_empty() {
            url.query_pairs_mut().extend_pairs(
                self.query_params
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }

        Ok(url)
    }
}
