//! # paypal-rest-auth
//!
//! PayPal authentication for the REST API.
//!
//! ## Security
//!
//! - Secrets and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages copied from the server are sanitized
//!
//! ## Example
//!
//! ```rust,ignore
//! use paypal_rest_auth::{PayPalCredentials, RequestAccessToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), paypal_rest_client::ErrorInfo> {
//!     // PAYPAL_CLIENT_ID, PAYPAL_CLIENT_SECRET, PAYPAL_MODE
//!     let creds = PayPalCredentials::from_env()?;
//!
//!     let mut request = RequestAccessToken::from_credentials(&creds)?;
//!     request.call().await;
//!
//!     if let Some(token) = request.take_access_token() {
//!         // token.authentication() feeds the payment calls
//!     }
//!     Ok(())
//! }
//! ```

mod credentials;
mod token;

pub use credentials::{expiry_after, AccessToken, PayPalCredentials};
pub use token::{RequestAccessToken, TokenResponse, TOKEN_PATH};
