//! Smoke test against a PayPal sandbox REST app.
//!
//! Requests an access token and lists the most recent payments. Pass
//! `--create` to also create a 1.00 USD PayPal payment and print its
//! approval URL.
//!
//! ```sh
//! export PAYPAL_CLIENT_ID=...
//! export PAYPAL_CLIENT_SECRET=...
//! RUST_LOG=paypal_rest_client=debug cargo run --bin sandbox-smoke -- --create
//! ```

use chrono::{Duration, Utc};
use paypal_rest::auth::{AccessToken, PayPalCredentials, RequestAccessToken};
use paypal_rest::client::{HttpTransport, PayPalCall};
use paypal_rest::payments::{
    Amount, CreatePayment, Intent, ListPayments, ListPaymentsParams, Payer, Payment,
    RedirectUrls, SortBy, SortOrder, Transaction,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let create = std::env::args().skip(1).any(|arg| arg == "--create");

    let creds = PayPalCredentials::from_env().unwrap_or_else(|e| {
        error!(error = %e, "Missing sandbox credentials");
        eprintln!("  Set PAYPAL_CLIENT_ID and PAYPAL_CLIENT_SECRET for a sandbox REST app.");
        eprintln!("  PAYPAL_MODE=live switches to the live host.");
        std::process::exit(1);
    });

    let transport = HttpTransport::new(creds.client_config()).unwrap_or_else(|e| {
        error!(error = %e, "Failed to build transport");
        std::process::exit(1);
    });

    info!(base_url = creds.base_url(), environment = ?creds.environment(), "Starting smoke test");

    let token = request_token(&transport, &creds).await;
    info!(expires_at = ?token.expires_at(), "Access token ok");

    list_recent(&transport, &token).await;

    if create {
        create_payment(&transport, &token).await;
    }

    info!("Smoke test complete");
}

async fn request_token(transport: &HttpTransport, creds: &PayPalCredentials) -> AccessToken {
    let mut request = RequestAccessToken::new(transport.clone());
    request.set_credentials(creds);
    request.call().await;

    request.take_access_token().unwrap_or_else(|| {
        exit_with(request.error().map(ToString::to_string));
    })
}

async fn list_recent(transport: &HttpTransport, token: &AccessToken) {
    let now = Utc::now();
    let params = ListPaymentsParams::new()
        .with_count(5)
        .with_time_range(now - Duration::days(30), now)
        .with_sort(SortBy::CreateTime, SortOrder::Desc);

    let mut list = ListPayments::new(transport.clone());
    list.set_authentication_info(token);
    list.call(params).await;

    let Some(page) = list.payments() else {
        exit_with(list.error().map(ToString::to_string));
    };
    info!(count = page.len(), "Listed recent payments");
    for payment in page {
        println!(
            "    {} {:?} {:?}",
            payment.id.as_deref().unwrap_or("-"),
            payment.intent,
            payment.state
        );
    }
}

async fn create_payment(transport: &HttpTransport, token: &AccessToken) {
    let payment = Payment::new(Intent::Sale, Payer::paypal())
        .with_redirect_urls(RedirectUrls::new(
            "https://example.com/return",
            "https://example.com/cancel",
        ))
        .with_transaction(
            Transaction::new(Amount::new("USD", "1.00")).with_description("sandbox-smoke"),
        );

    let mut call = CreatePayment::new(transport.clone());
    call.set_authentication_info(token);
    call.call(&payment).await;

    let Some(created) = call.payment() else {
        exit_with(call.error().map(ToString::to_string));
    };
    info!(payment_id = created.id.as_deref().unwrap_or("-"), "Created payment");
    if let Some(url) = created.approval_url() {
        println!("    approve at {url}");
    }
}

fn exit_with(message: Option<String>) -> ! {
    error!(
        "{}",
        message.unwrap_or_else(|| "call finished without a result".to_string())
    );
    std::process::exit(1);
}
