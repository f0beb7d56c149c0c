//! Client configuration.

use std::time::Duration;

/// PayPal REST host for the sandbox environment.
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.paypal.com";

/// PayPal REST host for the live environment.
pub const LIVE_BASE_URL: &str = "https://api.paypal.com";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: i64 = 60;

/// PayPal environment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    /// Base URL of the REST API for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Live => LIVE_BASE_URL,
        }
    }

    /// Parse a `PAYPAL_MODE` style value (`sandbox` / `live`).
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Some(Environment::Sandbox),
            "live" | "production" => Some(Environment::Live),
            _ => None,
        }
    }
}

/// Configuration shared by call objects.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL requests are sent to.
    pub base_url: String,
    /// Per-request timeout in seconds. `<= 0` disables the timeout.
    pub timeout_seconds: i64,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Pool idle timeout.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Environment::default().base_url().to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// The timeout as a duration, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        timeout_from_seconds(self.timeout_seconds)
    }
}

/// Convert a seconds setting into a timeout; `<= 0` means no timeout.
pub(crate) fn timeout_from_seconds(seconds: i64) -> Option<Duration> {
    u64::try_from(seconds)
        .ok()
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Target one of the PayPal environments.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.config.base_url = environment.base_url().to_string();
        self
    }

    /// Target a custom base URL (mock servers, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout in seconds; `<= 0` disables it.
    pub fn with_timeout_seconds(mut self, seconds: i64) -> Self {
        self.config.timeout_seconds = seconds;
        self
    }

    /// Disable the per-request timeout.
    pub fn without_timeout(mut self) -> Self {
        self.config.timeout_seconds = 0;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set pool idle timeout.
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
