//! End-to-end PayPal checkout against a mock server: token, create, approve,
//! execute, then refund the resulting sale.

use super::common::{payment_json, refund_json, MockPayPal, PAYMENT_ID, REFUND_ID, SALE_ID};
use paypal_rest::client::{CallEvent, PayPalCall};
use paypal_rest::payments::{
    Amount, CreatePayment, Details, ExecutePayment, GetPayment, GetRefund, GetSale, Intent, Item,
    ItemList, MinorUnits, Payer, Payment, PaymentExecution, PaymentState, RedirectUrls,
    RefundRequest, RefundSale, SaleState, Transaction,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

fn checkout_payment() -> Payment {
    let amount = Amount::new("USD", "30.11").with_details(Details {
        subtotal: Some("30.00".into()),
        tax: Some("0.07".into()),
        shipping: Some("0.03".into()),
        handling_fee: Some("1.00".into()),
        shipping_discount: Some("-1.00".into()),
        insurance: Some("0.01".into()),
        ..Default::default()
    });
    let items = ItemList::new(vec![
        Item::new("hat", 5, "3.00", "USD").with_sku("1"),
        Item::new("handbag", 1, "15.00", "USD").with_sku("product34"),
    ]);

    Payment::new(Intent::Sale, Payer::paypal())
        .with_redirect_urls(RedirectUrls::new(
            "https://example.com/return",
            "https://example.com/cancel",
        ))
        .with_transaction(
            Transaction::new(amount)
                .with_description("The payment transaction description.")
                .with_invoice_number("48787589673")
                .with_item_list(items),
        )
}

#[tokio::test]
async fn test_checkout_flow() {
    let paypal = MockPayPal::start().await;
    paypal.mount_token().await;

    Mock::given(method("POST"))
        .and(path("/v1/payments/payment"))
        .and(header("Authorization", "Bearer A"))
        .and(header_exists("PayPal-Request-Id"))
        .respond_with(ResponseTemplate::new(201).set_body_json(payment_json("created")))
        .expect(1)
        .mount(&paypal.server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/payments/payment/{}/execute/", PAYMENT_ID)))
        .and(body_json(json!({ "payer_id": "QYR5Z8XDVJNXQ" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json("approved")))
        .expect(1)
        .mount(&paypal.server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/payments/sale/{}/refund", SALE_ID)))
        .and(body_json(json!({ "amount": { "currency": "USD", "total": "5.00" } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(refund_json("5.00")))
        .expect(1)
        .mount(&paypal.server)
        .await;

    let token = paypal.access_token().await;
    assert!(token.scopes().any(|s| s.ends_with("/refund")));

    // Create
    let mut create = CreatePayment::new(paypal.transport.clone());
    create.set_authentication_info(&token);
    let mut events = create.subscribe();
    create.call(&checkout_payment()).await;

    assert!(create.error().is_none(), "{:?}", create.error());
    assert!(matches!(events.try_recv(), Ok(CallEvent::Succeeded)));
    let mut created = create.take_payment().expect("payment should be created");
    assert_eq!(created.state, Some(PaymentState::Created));
    assert!(created.approval_url().unwrap().contains("token=EC-"));
    assert!(created.link("execute").is_some());

    let transactions = created.take_transactions();
    let total: MinorUnits = transactions
        .iter()
        .filter_map(|t| t.amount.as_ref().and_then(Amount::total_units))
        .sum();
    assert_eq!(total.to_string(), "30.11");

    // The payer approves on PayPal and comes back with a payer id.
    let payer_id = created
        .take_payer()
        .and_then(|mut payer| payer.take_payer_info())
        .and_then(|info| info.payer_id)
        .expect("payer id");

    // Execute
    let mut execute = ExecutePayment::new(paypal.transport.clone());
    execute.set_authentication_info(&token);
    execute
        .call(created.id.as_deref().unwrap(), &PaymentExecution::new(payer_id))
        .await;

    assert!(execute.error().is_none(), "{:?}", execute.error());
    let executed = execute.payment().unwrap();
    assert!(executed.is_approved());
    let sale = executed.transactions[0].sales().next().expect("sale");
    assert_eq!(sale.id.as_deref(), Some(SALE_ID));
    assert_eq!(sale.state, Some(SaleState::Completed));

    // Partial refund
    let mut refund = RefundSale::new(paypal.transport.clone());
    refund.set_authentication_info(&token);
    refund
        .call(SALE_ID, &RefundRequest::partial(Amount::new("USD", "5.00")))
        .await;

    assert!(refund.error().is_none(), "{:?}", refund.error());
    let refunded = refund.refund().unwrap();
    assert_eq!(refunded.id.as_deref(), Some(REFUND_ID));
    assert!(refunded.is_completed());
}

#[tokio::test]
async fn test_lookups_share_one_transport() {
    let paypal = MockPayPal::start().await;
    paypal.mount_token().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/payments/payment/{}", PAYMENT_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json("approved")))
        .expect(1)
        .mount(&paypal.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/payments/sale/{}", SALE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": SALE_ID,
            "state": "partially_refunded",
            "amount": { "currency": "USD", "total": "30.11" },
            "parent_payment": PAYMENT_ID
        })))
        .expect(1)
        .mount(&paypal.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/payments/refund/{}", REFUND_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(refund_json("5.00")))
        .expect(1)
        .mount(&paypal.server)
        .await;

    let token = paypal.access_token().await;

    let mut get_payment = GetPayment::new(paypal.transport.clone());
    let mut get_sale = GetSale::new(paypal.transport.clone());
    let mut get_refund = GetRefund::new(paypal.transport.clone());
    get_payment.set_authentication_info(&token);
    get_sale.set_authentication_info(&token);
    get_refund.set_authentication_info(&token);

    tokio::join!(
        get_payment.call(PAYMENT_ID),
        get_sale.call(SALE_ID),
        get_refund.call(REFUND_ID),
    );

    let mut payment = get_payment.take_payment().expect("payment");
    let shipping = payment
        .take_payer()
        .and_then(|mut payer| payer.take_payer_info())
        .and_then(|mut info| info.take_shipping_address())
        .expect("shipping address");
    assert_eq!(shipping.recipient_name.as_deref(), Some("Jane Doe"));
    assert_eq!(shipping.address.city.as_deref(), Some("San Jose"));

    assert_eq!(
        get_sale.sale().and_then(|sale| sale.state),
        Some(SaleState::PartiallyRefunded)
    );
    assert_eq!(
        get_refund.refund().and_then(|r| r.sale_id.as_deref()),
        Some(SALE_ID)
    );
}
