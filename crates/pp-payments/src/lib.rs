//! # paypal-rest-payments
//!
//! PayPal REST Payments (v1) records and calls.
//!
//! ## Features
//!
//! - **Records** - `Payment`, `Transaction`, `Sale`, `Refund` and friends,
//!   mirroring PayPal's JSON keys exactly
//! - **Validation** - payments are checked locally before they are sent
//! - **Payments** - create, fetch, list and execute
//! - **Sales and refunds** - fetch a sale, refund it, fetch a refund
//! - **Money** - [`MinorUnits`] for exact decimal arithmetic on amounts
//!
//! ## Example
//!
//! ```rust,ignore
//! use paypal_rest_auth::{PayPalCredentials, RequestAccessToken};
//! use paypal_rest_client::{HttpTransport, PayPalCall};
//! use paypal_rest_payments::{
//!     Amount, CreatePayment, ExecutePayment, Intent, Payer, Payment, PaymentExecution,
//!     RedirectUrls, Transaction,
//! };
//!
//! let creds = PayPalCredentials::from_env()?;
//! let transport = HttpTransport::new(creds.client_config())?;
//!
//! let mut token = RequestAccessToken::new(transport.clone());
//! token.set_credentials(&creds);
//! token.call().await;
//! let token = token.take_access_token().ok_or("no token")?;
//!
//! let payment = Payment::new(Intent::Sale, Payer::paypal())
//!     .with_redirect_urls(RedirectUrls::new(
//!         "https://example.com/return",
//!         "https://example.com/cancel",
//!     ))
//!     .with_transaction(Transaction::new(Amount::new("USD", "10.00")));
//!
//! let mut create = CreatePayment::new(transport.clone());
//! create.set_authentication_info(&token);
//! create.call(&payment).await;
//!
//! // Redirect the payer to the approval URL, then:
//! let mut execute = ExecutePayment::new(transport);
//! execute.set_authentication_info(&token);
//! execute.call(payment_id, &PaymentExecution::new(payer_id)).await;
//! ```

mod address;
mod amount;
mod calls;
mod item;
mod links;
mod money;
mod payer;
mod payment;
mod resources;
mod transaction;
mod validation;

// Records
pub use address::{Address, AddressStatus, ShippingAddress};
pub use amount::{Amount, Currency, Details};
pub use item::{Item, ItemList};
pub use links::{find_link, Links};
pub use payer::{
    CreditCard, CreditCardToken, CreditCardType, FundingInstrument, Payee, Payer, PayerInfo,
    PaymentMethod,
};
pub use payment::{Intent, Payment, PaymentExecution, PaymentList, PaymentState, RedirectUrls};
pub use resources::{
    Authorization, Capture, Refund, RefundRequest, RefundState, Sale, SaleState,
};
pub use transaction::{RelatedResources, Transaction};

// Money and validation
pub use money::MinorUnits;
pub use validation::{validate_amount, validate_payment, validate_transaction};

// Calls
pub use calls::{
    CreatePayment, ExecutePayment, GetPayment, GetRefund, GetSale, ListPayments,
    ListPaymentsParams, RefundSale, SortBy, SortOrder, MAX_PAGE_SIZE, PAYMENT_PATH,
    REFUND_PATH, SALE_PATH,
};
