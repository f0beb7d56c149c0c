//! Call objects for the Payments API.
//!
//! Each call owns an [`ApiCallBase`], implements the [`ApiCall`] hooks and
//! exposes `call(...)`. Outcomes are read through [`PayPalCall`]
//! (`error()`, `in_operation()`, `subscribe()`).
//!
//! [`ApiCall`]: paypal_rest_client::ApiCall
//! [`PayPalCall`]: paypal_rest_client::PayPalCall

use paypal_rest_client::ApiCallBase;
use serde::de::DeserializeOwned;

/// `PayPalCall` for a call struct with a `base: ApiCallBase` field.
macro_rules! impl_paypal_call {
    ($ty:ty) => {
        impl paypal_rest_client::PayPalCall for $ty {
            fn base(&self) -> &paypal_rest_client::ApiCallBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut paypal_rest_client::ApiCallBase {
                &mut self.base
            }
        }
    };
}

mod payment;
mod refund;
mod sale;

pub use payment::{
    CreatePayment, ExecutePayment, GetPayment, ListPayments, ListPaymentsParams, SortBy,
    SortOrder, MAX_PAGE_SIZE,
};
pub use refund::GetRefund;
pub use sale::{GetSale, RefundSale};

pub const PAYMENT_PATH: &str = "/v1/payments/payment";
pub const SALE_PATH: &str = "/v1/payments/sale";
pub const REFUND_PATH: &str = "/v1/payments/refund";

/// Point the request at `{collection}/{id}{suffix}`. Fails the input check
/// on a blank id.
pub(crate) fn set_resource_path(
    base: &mut ApiCallBase,
    collection: &str,
    id: &str,
    suffix: &str,
) -> bool {
    let id = id.trim();
    if id.is_empty() {
        return base.fail_input("A resource id is required");
    }
    let path = format!("{}/{}{}", collection, urlencoding::encode(id), suffix);
    base.executor_mut().request_mut().set_path(path);
    true
}

/// Shape check plus record parse.
pub(crate) fn hydrate<T: DeserializeOwned>(base: &mut ApiCallBase) -> Option<T> {
    if !base.check_output() {
        return None;
    }
    base.parse_json::<T>()
}

/// Serialize a request body into the call's request.
pub(crate) fn set_json_body<T: serde::Serialize>(base: &mut ApiCallBase, body: &T) -> bool {
    match base.executor_mut().request_mut().set_json_body(body) {
        Ok(()) => true,
        Err(err) => {
            base.executor_mut().set_error(err);
            false
        }
    }
}
