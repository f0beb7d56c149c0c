//! # paypal-rest
//!
//! A PayPal REST Payments (v1) client library for Rust.
//!
//! Every API call is a small object: configure it, `call(...).await` it, then
//! read either its result or its [`ErrorInfo`](client::ErrorInfo). Outcomes
//! are also published as `Succeeded` / `Failed` events to subscribers.
//!
//! ## Security
//!
//! - Secrets and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages are sanitized before they are stored
//!
//! ## Crates
//!
//! - **paypal-rest-client** - Transport, request lifecycle, timeouts, error model
//! - **paypal-rest-auth** - Client credentials and OAuth 2.0 access tokens
//! - **paypal-rest-payments** - Payment, sale and refund records and calls
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paypal_rest::{HttpTransport, PayPalCall, PayPalCredentials, RequestAccessToken};
//! use paypal_rest::payments::{ListPayments, ListPaymentsParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = PayPalCredentials::from_env()?;
//!     let transport = HttpTransport::new(creds.client_config())?;
//!
//!     let mut token = RequestAccessToken::new(transport.clone());
//!     token.set_credentials(&creds);
//!     token.call().await;
//!     let token = token.take_access_token().ok_or("token request failed")?;
//!
//!     let mut list = ListPayments::new(transport);
//!     list.set_authentication_info(&token);
//!     list.call(ListPaymentsParams::new().with_count(5)).await;
//!
//!     for payment in list.payments().into_iter().flatten() {
//!         println!("{:?} {:?}", payment.id, payment.state);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use paypal_rest_auth as auth;
#[cfg(feature = "client")]
pub use paypal_rest_client as client;
#[cfg(feature = "payments")]
pub use paypal_rest_payments as payments;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use paypal_rest_auth::{AccessToken, PayPalCredentials, RequestAccessToken};
#[cfg(feature = "client")]
pub use paypal_rest_client::{
    CallEvent, ClientConfig, Environment, ErrorInfo, ErrorKind, HttpTransport, PayPalCall,
};
#[cfg(feature = "payments")]
pub use paypal_rest_payments::{
    CreatePayment, ExecutePayment, GetPayment, ListPayments, Payment, RefundSale,
};
