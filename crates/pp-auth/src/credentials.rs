//! Client credentials and access tokens.
//!
//! Both types implement custom Debug to redact sensitive data.

use chrono::{DateTime, Duration, Utc};
use paypal_rest_client::{
    Authentication, ClientConfig, Environment, ErrorInfo, ErrorKind, Result, TokenType,
};

/// A REST app's client id and secret plus the environment it targets.
#[derive(Clone)]
pub struct PayPalCredentials {
    client_id: String,
    secret: String,
    environment: Environment,
    base_url: Option<String>,
}

impl std::fmt::Debug for PayPalCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalCredentials")
            .field("client_id", &self.client_id)
            .field("secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PayPalCredentials {
    /// Create sandbox credentials.
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
            environment: Environment::Sandbox,
            base_url: None,
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the API host, e.g. for a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// API host these credentials are used against.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// Returns true if both id and secret are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.client_id.is_empty() && !self.secret.is_empty()
    }

    /// Authentication for the token endpoint (HTTP Basic).
    pub fn authentication(&self) -> Authentication {
        Authentication::client_credentials(&self.client_id, &self.secret)
    }

    /// Client configuration pointing at [`Self::base_url`].
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::builder()
            .with_environment(self.environment)
            .with_base_url(self.base_url())
            .build()
    }

    /// Load credentials from environment variables.
    ///
    /// Required environment variables:
    /// - `PAYPAL_CLIENT_ID`
    /// - `PAYPAL_CLIENT_SECRET` or `PAYPAL_SECRET`
    ///
    /// Optional:
    /// - `PAYPAL_MODE`: `sandbox` (default) or `live`
    /// - `PAYPAL_BASE_URL`: overrides the host picked by the mode
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let client_id = lookup("PAYPAL_CLIENT_ID").ok_or_else(|| missing("PAYPAL_CLIENT_ID"))?;

        let secret = lookup("PAYPAL_CLIENT_SECRET")
            .or_else(|| lookup("PAYPAL_SECRET"))
            .ok_or_else(|| missing("PAYPAL_CLIENT_SECRET"))?;

        let environment = match lookup("PAYPAL_MODE") {
            Some(mode) => Environment::from_mode(&mode).ok_or_else(|| {
                ErrorInfo::new(
                    ErrorKind::ConfigError,
                    format!("Unknown PAYPAL_MODE '{}', expected sandbox or live", mode),
                )
            })?,
            None => Environment::Sandbox,
        };

        let mut creds = Self::new(client_id, secret).with_environment(environment);
        if let Some(base_url) = lookup("PAYPAL_BASE_URL").filter(|url| !url.is_empty()) {
            creds = creds.with_base_url(base_url);
        }

        Ok(creds)
    }
}

fn missing(name: &str) -> ErrorInfo {
    ErrorInfo::new(
        ErrorKind::ConfigError,
        format!("Environment variable {} is not set", name),
    )
}

/// An OAuth access token issued by `/v1/oauth2/token`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    token_type: TokenType,
    expires_at: Option<DateTime<Utc>>,
    scope: Option<String>,
    app_id: Option<String>,
    nonce: Option<String>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .field("app_id", &self.app_id)
            .field("nonce", &self.nonce.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AccessToken {
    pub fn new(token: impl Into<String>, token_type: TokenType) -> Self {
        Self {
            token: token.into(),
            token_type,
            expires_at: None,
            scope: None,
            app_id: None,
            nonce: None,
        }
    }

    /// Set the expiry relative to `issued_at`. An offset outside chrono's
    /// range leaves the token without an expiry.
    pub fn with_expires_in(mut self, issued_at: DateTime<Utc>, seconds: i64) -> Self {
        self.expires_at = expiry_after(issued_at, seconds);
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Space separated scopes granted to the token.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Individual scopes.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.as_deref().unwrap_or_default().split_whitespace()
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    /// Returns true if the token expires within `margin` of `now`.
    ///
    /// Tokens without an expiry never expire.
    pub fn expires_within(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at.is_some_and(|at| at - margin <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.expires_within(Utc::now(), Duration::zero())
    }

    /// Authentication for calls made with this token.
    pub fn authentication(&self) -> Authentication {
        Authentication::token(&self.token, self.token_type)
    }
}

/// `issued_at + seconds`, or `None` when either step leaves chrono's range.
pub fn expiry_after(issued_at: DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(seconds).and_then(|offset| issued_at.checked_add_signed(offset))
}

impl From<&AccessToken> for Authentication {
    fn from(token: &AccessToken) -> Self {
        token.authentication()
    }
}
