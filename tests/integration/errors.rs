//! Failure paths seen from the facade: input errors, server error envelopes,
//! timeouts and recovery on the same call object.

use std::time::Duration;

use super::common::{payment_json, MockPayPal, PAYMENT_ID};
use paypal_rest::client::{ErrorKind, PayPalCall, TIMED_OUT};
use paypal_rest::payments::{
    Amount, CreatePayment, GetPayment, Intent, ListPayments, ListPaymentsParams, Payer, Payment,
    RedirectUrls, Transaction,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_create_without_transactions_sends_nothing() {
    let paypal = MockPayPal::start().await;
    paypal.mount_token().await;
    Mock::given(method("POST"))
        .and(path("/v1/payments/payment"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&paypal.server)
        .await;

    let token = paypal.access_token().await;
    let payment = Payment::new(Intent::Sale, Payer::paypal()).with_redirect_urls(
        RedirectUrls::new("https://example.com/return", "https://example.com/cancel"),
    );

    let mut create = CreatePayment::new(paypal.transport.clone());
    create.set_authentication_info(&token);
    let mut events = create.subscribe();
    create.call(&payment).await;

    let err = create.error().expect("input error");
    assert_eq!(err.kind, ErrorKind::InputError);
    assert!(!create.in_operation());
    assert!(create.http_status().is_none());
    let event = events.try_recv().expect("failed event");
    assert_eq!(event.error().map(|e| e.kind), Some(ErrorKind::InputError));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_get_missing_payment() {
    let paypal = MockPayPal::start().await;
    paypal.mount_token().await;
    Mock::given(method("GET"))
        .and(path("/v1/payments/payment/PAY-123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Payment not found",
            "details": []
        })))
        .expect(1)
        .mount(&paypal.server)
        .await;

    let token = paypal.access_token().await;
    let mut get = GetPayment::new(paypal.transport.clone());
    get.set_authentication_info(&token);
    let mut events = get.subscribe();
    get.call("PAY-123").await;

    let err = get.error().expect("request error");
    assert_eq!(err.kind, ErrorKind::RequestError);
    assert_eq!(err.message, "Payment not found");
    assert!(err.detail.is_none());
    assert_eq!(get.http_status(), Some(404));
    assert!(!events.try_recv().unwrap().is_success());
}

#[tokio::test]
async fn test_validation_error_details() {
    let paypal = MockPayPal::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/payments/payment"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "name": "VALIDATION_ERROR",
            "message": "Invalid request - see details",
            "debug_id": "5c16b1e5a2b4e",
            "details": [
                { "field": "transactions[0].amount.currency", "issue": "Currency code is invalid" }
            ]
        })))
        .mount(&paypal.server)
        .await;

    let payment = Payment::new(Intent::Sale, Payer::paypal())
        .with_redirect_urls(RedirectUrls::new(
            "https://example.com/return",
            "https://example.com/cancel",
        ))
        .with_transaction(Transaction::new(Amount::new("XXX", "1.00")));

    let mut create = CreatePayment::new(paypal.transport.clone());
    create.set_authentication_info(paypal_rest::client::Authentication::token(
        "A",
        paypal_rest::client::TokenType::Bearer,
    ));
    create.call(&payment).await;

    let err = create.error().unwrap();
    assert_eq!(err.kind, ErrorKind::RequestError);
    assert_eq!(err.message, "Invalid request - see details");
    assert_eq!(
        err.detail.as_deref(),
        Some("transactions[0].amount.currency: Currency code is invalid")
    );
}

#[tokio::test]
async fn test_timeout_then_recover() {
    let paypal = MockPayPal::start().await;
    paypal.mount_token().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/payments/payment/{}", PAYMENT_ID)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(payment_json("approved"))
                .set_delay(Duration::from_secs(3)),
        )
        .up_to_n_times(1)
        .mount(&paypal.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/payments/payment/{}", PAYMENT_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json("approved")))
        .mount(&paypal.server)
        .await;

    let token = paypal.access_token().await;
    let mut get = GetPayment::new(paypal.transport.clone());
    get.set_authentication_info(&token);
    get.set_timeout_seconds(1);
    let mut events = get.subscribe();

    get.call(PAYMENT_ID).await;
    let err = get.error().expect("timeout");
    assert!(err.is_timeout());
    assert_eq!(err.message, TIMED_OUT);
    assert!(get.payment().is_none());
    assert!(!get.in_operation());

    get.call(PAYMENT_ID).await;
    assert!(get.error().is_none(), "{:?}", get.error());
    assert!(get.payment().is_some());

    // Exactly one event per call.
    assert!(!events.try_recv().unwrap().is_success());
    assert!(events.try_recv().unwrap().is_success());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_expired_token_is_reported() {
    let paypal = MockPayPal::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/payments/payment"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_token",
            "error_description": "Token signature verification failed"
        })))
        .mount(&paypal.server)
        .await;

    let mut list = ListPayments::new(paypal.transport.clone());
    list.set_authentication_info(paypal_rest::client::Authentication::token(
        "expired",
        paypal_rest::client::TokenType::Bearer,
    ));
    list.call(ListPaymentsParams::new()).await;

    let err = list.error().unwrap();
    assert_eq!(err.kind, ErrorKind::RequestError);
    assert_eq!(err.message, "Token signature verification failed");
    assert_eq!(err.source_object_name, "ListPayments");
}
