//! # paypal-rest-client
//!
//! Request lifecycle core for PayPal's REST API.
//!
//! This crate provides:
//! - [`ErrorInfo`], the error model shared by every call object
//! - [`HttpTransport`], a shareable pooled HTTP transport
//! - [`RequestExecutor`] and the [`ApiCall`] hooks driven by [`send_request`]
//! - [`ApiCallBase`] with PayPal authentication, error envelopes and reply
//!   shape checks
//! - [`WireFormat`] for records mirroring PayPal's JSON
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Concrete calls                          │
//! │  (RequestAccessToken, CreatePayment, GetPayment, ...)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ApiCallBase                            │
//! │  - Authorization header (Basic / Bearer / MAC)              │
//! │  - PayPal error envelope                                    │
//! │  - Expected JSON shape                                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              RequestExecutor + send_request                 │
//! │  - Input checks, timeout, exactly one callback              │
//! │  - HttpTransport (reqwest, shared pool)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use paypal_rest_client::{ApiCall, RequestExecutor, send_request};
//!
//! struct Ping { executor: RequestExecutor }
//!
//! impl ApiCall for Ping {
//!     fn executor(&self) -> &RequestExecutor { &self.executor }
//!     fn executor_mut(&mut self) -> &mut RequestExecutor { &mut self.executor }
//!     fn success_callback(&mut self) { self.executor.finish_success() }
//!     fn error_callback(&mut self) { self.executor.finish_failure() }
//! }
//!
//! let mut ping = Ping { executor: RequestExecutor::with_default_transport("Ping")? };
//! send_request(&mut ping).await;
//! ```

mod api_call;
mod config;
mod error;
mod events;
mod executor;
mod request;
mod response;
mod transport;
mod wire;

pub use api_call::{ApiCallBase, Authentication, ExpectedJsonType, PayPalCall, TokenType};
pub use config::{
    ClientConfig, ClientConfigBuilder, Environment, DEFAULT_TIMEOUT_SECONDS, LIVE_BASE_URL,
    SANDBOX_BASE_URL,
};
pub use error::{sanitize_error_message, ErrorInfo, ErrorKind, Result, Severity, TIMED_OUT};
pub use events::{CallEvent, CallEvents};
pub use executor::{send_request, ApiCall, RequestExecutor};
pub use request::{RequestConfig, RequestMethod};
pub use response::{ErrorEnvelope, Reply};
pub use transport::HttpTransport;
pub use wire::WireFormat;

/// Re-exported so callers can name the event receiver type.
pub use tokio::sync::broadcast::Receiver as EventReceiver;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("paypal-rest/", env!("CARGO_PKG_VERSION"));
