use paypal_rest::auth::{AccessToken, PayPalCredentials, RequestAccessToken};
use paypal_rest::client::{HttpTransport, PayPalCall};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PAYMENT_ID: &str = "PAY-1AB23456CD789012EF34GHIJ";
pub const SALE_ID: &str = "4RR959492F879224U";
pub const REFUND_ID: &str = "0P209507D6694645N";

/// Credentials and a shared transport pointed at a mock server.
pub struct MockPayPal {
    pub server: MockServer,
    pub credentials: PayPalCredentials,
    pub transport: HttpTransport,
}

impl MockPayPal {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let credentials = PayPalCredentials::new("client", "secret").with_base_url(server.uri());
        let transport =
            HttpTransport::new(credentials.client_config()).expect("transport should build");
        Self {
            server,
            credentials,
            transport,
        }
    }

    /// Mount a token endpoint that always grants token "A".
    pub async fn mount_token(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "A",
                "token_type": "Bearer",
                "expires_in": 32400,
                "scope": "https://uri.paypal.com/services/payments/payment https://uri.paypal.com/services/payments/refund",
                "app_id": "APP-80W284485P519543T"
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn access_token(&self) -> AccessToken {
        let mut request = RequestAccessToken::new(self.transport.clone());
        request.set_credentials(&self.credentials);
        request.call().await;
        assert!(request.error().is_none(), "token request failed: {:?}", request.error());
        request.take_access_token().expect("token should be present")
    }
}

pub fn payment_json(state: &str) -> Value {
    let related_resources = if state == "approved" {
        json!([{
            "sale": {
                "id": SALE_ID,
                "state": "completed",
                "amount": { "currency": "USD", "total": "30.11" },
                "payment_mode": "INSTANT_TRANSFER",
                "parent_payment": PAYMENT_ID
            }
        }])
    } else {
        json!([])
    };

    json!({
        "id": PAYMENT_ID,
        "intent": "sale",
        "state": state,
        "cart": "7DU01234XY567890A",
        "payer": {
            "payment_method": "paypal",
            "status": "VERIFIED",
            "payer_info": {
                "email": "buyer@example.com",
                "first_name": "Jane",
                "last_name": "Doe",
                "payer_id": "QYR5Z8XDVJNXQ",
                "country_code": "US",
                "shipping_address": {
                    "recipient_name": "Jane Doe",
                    "line1": "1 Main St",
                    "city": "San Jose",
                    "state": "CA",
                    "postal_code": "95131",
                    "country_code": "US"
                }
            }
        },
        "transactions": [{
            "amount": {
                "currency": "USD",
                "total": "30.11",
                "details": {
                    "subtotal": "30.00",
                    "tax": "0.07",
                    "shipping": "0.03",
                    "handling_fee": "1.00",
                    "shipping_discount": "-1.00",
                    "insurance": "0.01"
                }
            },
            "description": "The payment transaction description.",
            "invoice_number": "48787589673",
            "item_list": {
                "items": [
                    { "name": "hat", "sku": "1", "price": "3.00", "currency": "USD", "quantity": "5" },
                    { "name": "handbag", "sku": "product34", "price": "15.00", "currency": "USD", "quantity": "1" }
                ]
            },
            "related_resources": related_resources
        }],
        "links": [
            {
                "href": format!("https://api.sandbox.paypal.com/v1/payments/payment/{}", PAYMENT_ID),
                "rel": "self",
                "method": "GET"
            },
            {
                "href": "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-60385559L1062554J",
                "rel": "approval_url",
                "method": "REDIRECT"
            },
            {
                "href": format!("https://api.sandbox.paypal.com/v1/payments/payment/{}/execute", PAYMENT_ID),
                "rel": "execute",
                "method": "POST"
            }
        ]
    })
}

pub fn refund_json(total: &str) -> Value {
    json!({
        "id": REFUND_ID,
        "state": "completed",
        "amount": { "currency": "USD", "total": total },
        "sale_id": SALE_ID,
        "parent_payment": PAYMENT_ID,
        "create_time": "2024-03-01T10:00:00Z"
    })
}

/// Credentials for the ignored sandbox tests.
///
/// Panics with setup instructions when the environment is not configured.
pub fn sandbox_credentials() -> PayPalCredentials {
    PayPalCredentials::from_env().unwrap_or_else(|e| {
        panic!(
            "\n\nSandbox tests need a PayPal sandbox REST app: {e}\n\
             Export PAYPAL_CLIENT_ID and PAYPAL_CLIENT_SECRET and re-run with --ignored.\n\n"
        )
    })
}
