//! Live sandbox checks. Ignored unless run with `--ignored`.

use super::common::sandbox_credentials;
use paypal_rest::auth::RequestAccessToken;
use paypal_rest::client::{ErrorKind, HttpTransport, PayPalCall};
use paypal_rest::payments::{GetPayment, ListPayments, ListPaymentsParams, MAX_PAGE_SIZE};

#[tokio::test]
#[ignore]
async fn test_sandbox_token_and_list() {
    let creds = sandbox_credentials();
    let transport = HttpTransport::new(creds.client_config()).expect("transport");

    let mut request = RequestAccessToken::new(transport.clone());
    request.set_credentials(&creds);
    request.call().await;
    let token = request
        .take_access_token()
        .unwrap_or_else(|| panic!("token request failed: {:?}", request.error()));
    assert!(!token.is_expired());

    let mut list = ListPayments::new(transport);
    list.set_authentication_info(&token);
    list.call(ListPaymentsParams::new().with_count(MAX_PAGE_SIZE)).await;

    assert!(list.error().is_none(), "{:?}", list.error());
    assert!(list.payments().unwrap().len() <= MAX_PAGE_SIZE as usize);
}

#[tokio::test]
#[ignore]
async fn test_sandbox_unknown_payment() {
    let creds = sandbox_credentials();
    let transport = HttpTransport::new(creds.client_config()).expect("transport");

    let mut request = RequestAccessToken::new(transport.clone());
    request.set_credentials(&creds);
    request.call().await;
    let token = request.take_access_token().expect("token");

    let mut get = GetPayment::new(transport);
    get.set_authentication_info(&token);
    get.call("PAY-DOES-NOT-EXIST").await;

    let err = get.error().expect("lookup should fail");
    assert_eq!(err.kind, ErrorKind::RequestError);
    assert_eq!(get.http_status(), Some(404));
}
