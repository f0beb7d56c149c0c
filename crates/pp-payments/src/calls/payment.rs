//! Create, fetch, list and execute payments.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, instrument};

use paypal_rest_client::{
    send_request, ApiCall, ApiCallBase, ClientConfig, ExpectedJsonType, HttpTransport, Reply,
    RequestExecutor, RequestMethod, Result,
};

use super::{hydrate, set_json_body, set_resource_path, PAYMENT_PATH};
use crate::payment::{Payment, PaymentExecution, PaymentList};
use crate::validation::{validate_amount, validate_payment};

/// Largest page the list endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 20;

/// Header carrying the idempotency key of a create request.
const REQUEST_ID_HEADER: &str = "PayPal-Request-Id";

/// Creates a payment.
///
/// The payment is validated locally first; nothing is sent when it is
/// incomplete. On success the created payment, including its approval
/// link, is available through [`CreatePayment::payment`].
///
/// # Example
///
/// ```rust,ignore
/// use paypal_rest_client::PayPalCall;
/// use paypal_rest_payments::{Amount, CreatePayment, Intent, Payer, Payment, RedirectUrls, Transaction};
///
/// let payment = Payment::new(Intent::Sale, Payer::paypal())
///     .with_redirect_urls(RedirectUrls::new(return_url, cancel_url))
///     .with_transaction(Transaction::new(Amount::new("USD", "10.00")));
///
/// let mut create = CreatePayment::new(transport);
/// create.set_authentication_info(&token);
/// create.call(&payment).await;
/// let approve = create.payment().and_then(Payment::approval_url);
/// ```
#[derive(Debug)]
pub struct CreatePayment {
    base: ApiCallBase,
    request_id: Option<String>,
    input: Option<Payment>,
    payment: Option<Payment>,
}

impl CreatePayment {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            base: ApiCallBase::new(
                "CreatePayment",
                transport,
                RequestMethod::Post,
                PAYMENT_PATH,
                ExpectedJsonType::Object,
            ),
            request_id: None,
            input: None,
            payment: None,
        }
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// Use a fixed idempotency key instead of a fresh one per call.
    ///
    /// Reusing the key of an earlier request makes PayPal return the
    /// original payment instead of creating another.
    pub fn set_request_id(&mut self, request_id: impl Into<String>) {
        self.request_id = Some(request_id.into());
    }

    /// Idempotency key sent with the last request.
    pub fn request_id(&self) -> Option<&str> {
        self.base.executor().request().header(REQUEST_ID_HEADER)
    }

    #[instrument(skip(self, payment), fields(intent = ?payment.intent))]
    pub async fn call(&mut self, payment: &Payment) {
        self.input = Some(payment.clone());
        self.payment = None;
        send_request(self).await;
    }

    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    pub fn take_payment(&mut self) -> Option<Payment> {
        self.payment.take()
    }
}

impl_paypal_call!(CreatePayment);

impl ApiCall for CreatePayment {
    fn executor(&self) -> &RequestExecutor {
        self.base.executor()
    }

    fn executor_mut(&mut self) -> &mut RequestExecutor {
        self.base.executor_mut()
    }

    fn check_input(&mut self) -> bool {
        if !self.base.require_token() {
            return false;
        }
        let Some(payment) = self.input.take() else {
            return self.base.fail_input("A payment is required");
        };
        if let Err(err) = validate_payment(&payment) {
            self.base.executor_mut().set_error(err);
            return false;
        }

        self.base.set_authentication();
        let request_id = self
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        self.base
            .executor_mut()
            .request_mut()
            .set_header(REQUEST_ID_HEADER, request_id);
        set_json_body(&mut self.base, &payment)
    }

    fn check_output(&mut self) -> bool {
        let Some(payment) = hydrate::<Payment>(&mut self.base) else {
            return false;
        };
        if !payment.is_created() {
            self.base.fail_output(format!(
                "Expected payment state created but got {:?}",
                payment.state
            ));
            return false;
        }
        self.payment = Some(payment);
        true
    }

    fn extract_error(&mut self, reply: &Reply) {
        self.base.extract_error(reply);
    }

    fn success_callback(&mut self) {
        if let Some(payment) = &self.payment {
            info!(
                payment_id = payment.id.as_deref().unwrap_or_default(),
                "Payment created"
            );
        }
        self.base.executor_mut().finish_success();
    }

    fn error_callback(&mut self) {
        self.base.executor_mut().finish_failure();
    }
}

/// Fetches one payment by id.
#[derive(Debug)]
pub struct GetPayment {
    base: ApiCallBase,
    payment_id: String,
    payment: Option<Payment>,
}

impl GetPayment {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            base: ApiCallBase::new(
                "GetPayment",
                transport,
                RequestMethod::Get,
                PAYMENT_PATH,
                ExpectedJsonType::Object,
            ),
            payment_id: String::new(),
            payment: None,
        }
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    #[instrument(skip(self))]
    pub async fn call(&mut self, payment_id: &str) {
        self.payment_id = payment_id.to_string();
        self.payment = None;
        send_request(self).await;
    }

    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    pub fn take_payment(&mut self) -> Option<Payment> {
        self.payment.take()
    }
}

impl_paypal_call!(GetPayment);

impl ApiCall for GetPayment {
    fn executor(&self) -> &RequestExecutor {
        self.base.executor()
    }

    fn executor_mut(&mut self) -> &mut RequestExecutor {
        self.base.executor_mut()
    }

    fn check_input(&mut self) -> bool {
        if !self.base.require_token()
            || !set_resource_path(&mut self.base, PAYMENT_PATH, &self.payment_id, "")
        {
            return false;
        }
        self.base.set_authentication();
        true
    }

    fn check_output(&mut self) -> bool {
        self.payment = hydrate(&mut self.base);
        self.payment.is_some()
    }

    fn extract_error(&mut self, reply: &Reply) {
        self.base.extract_error(reply);
    }

    fn success_callback(&mut self) {
        info!(payment_id = %self.payment_id, "Payment fetched");
        self.base.executor_mut().finish_success();
    }

    fn error_callback(&mut self) {
        self.base.executor_mut().finish_failure();
    }
}

/// Field the list endpoint sorts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    CreateTime,
    UpdateTime,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::CreateTime => "create_time",
            SortBy::UpdateTime => "update_time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters of the list endpoint. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPaymentsParams {
    pub count: Option<u32>,
    pub start_id: Option<String>,
    pub start_index: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl ListPaymentsParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page size, 1 to [`MAX_PAGE_SIZE`].
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Continue from the `next_id` of a previous page.
    pub fn with_start_id(mut self, start_id: impl Into<String>) -> Self {
        self.start_id = Some(start_id.into());
        self
    }

    pub fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = Some(start_index);
        self
    }

    pub fn with_time_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = Some(sort_by);
        self.sort_order = Some(sort_order);
        self
    }

    /// Check the parameters, returning a message for the first bad one.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(count) = self.count {
            if !(1..=MAX_PAGE_SIZE).contains(&count) {
                return Err(format!(
                    "count must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, count
                ));
            }
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err("start_time must not be after end_time".to_string());
            }
        }
        if self.start_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err("start_id must not be blank".to_string());
        }
        Ok(())
    }

    /// Set parameters as query pairs, in the order PayPal documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(count) = self.count {
            pairs.push(("count", count.to_string()));
        }
        if let Some(start_id) = &self.start_id {
            pairs.push(("start_id", start_id.clone()));
        }
        if let Some(start_index) = self.start_index {
            pairs.push(("start_index", start_index.to_string()));
        }
        if let Some(start_time) = self.start_time {
            pairs.push(("start_time", format_time(start_time)));
        }
        if let Some(end_time) = self.end_time {
            pairs.push(("end_time", format_time(end_time)));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sort_by", sort_by.as_str().to_string()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sort_order", sort_order.as_str().to_string()));
        }
        pairs
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Lists payments one page at a time.
///
/// ```rust,ignore
/// let mut list = ListPayments::new(transport);
/// list.set_authentication_info(&token);
/// list.call(ListPaymentsParams::new().with_count(10)).await;
/// while let Some(next) = list.payments().and_then(|page| page.next_id.clone()) {
///     list.call(ListPaymentsParams::new().with_count(10).with_start_id(next)).await;
/// }
/// ```
#[derive(Debug)]
pub struct ListPayments {
    base: ApiCallBase,
    params: ListPaymentsParams,
    payments: Option<PaymentList>,
}

impl ListPayments {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            base: ApiCallBase::new(
                "ListPayments",
                transport,
                RequestMethod::Get,
                PAYMENT_PATH,
                ExpectedJsonType::Object,
            ),
            params: ListPaymentsParams::default(),
            payments: None,
        }
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    #[instrument(skip(self))]
    pub async fn call(&mut self, params: ListPaymentsParams) {
        self.params = params;
        self.payments = None;
        send_request(self).await;
    }

    pub fn payments(&self) -> Option<&PaymentList> {
        self.payments.as_ref()
    }

    pub fn take_payments(&mut self) -> Option<PaymentList> {
        self.payments.take()
    }
}

impl_paypal_call!(ListPayments);

impl ApiCall for ListPayments {
    fn executor(&self) -> &RequestExecutor {
        self.base.executor()
    }

    fn executor_mut(&mut self) -> &mut RequestExecutor {
        self.base.executor_mut()
    }

    fn check_input(&mut self) -> bool {
        if !self.base.require_token() {
            return false;
        }
        if let Err(message) = self.params.validate() {
            return self.base.fail_input(message);
        }

        self.base.set_authentication();
        let pairs = self.params.query_pairs();
        let request = self.base.executor_mut().request_mut();
        request.clear_query();
        for (name, value) in pairs {
            request.add_query(name, value);
        }
        true
    }

    fn check_output(&mut self) -> bool {
        self.payments = hydrate(&mut self.base);
        self.payments.is_some()
    }

    fn extract_error(&mut self, reply: &Reply) {
        self.base.extract_error(reply);
    }

    fn success_callback(&mut self) {
        if let Some(page) = &self.payments {
            info!(count = page.len(), has_more = page.has_more(), "Payments listed");
        }
        self.base.executor_mut().finish_success();
    }

    fn error_callback(&mut self) {
        self.base.executor_mut().finish_failure();
    }
}

/// Executes a payment the payer has approved.
#[derive(Debug)]
pub struct ExecutePayment {
    base: ApiCallBase,
    payment_id: String,
    execution: Option<PaymentExecution>,
    payment: Option<Payment>,
}

impl ExecutePayment {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            base: ApiCallBase::new(
                "ExecutePayment",
                transport,
                RequestMethod::Post,
                PAYMENT_PATH,
                ExpectedJsonType::Object,
            ),
            payment_id: String::new(),
            execution: None,
            payment: None,
        }
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    #[instrument(skip(self, execution))]
    pub async fn call(&mut self, payment_id: &str, execution: &PaymentExecution) {
        self.payment_id = payment_id.to_string();
        self.execution = Some(execution.clone());
        self.payment = None;
        send_request(self).await;
    }

    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    pub fn take_payment(&mut self) -> Option<Payment> {
        self.payment.take()
    }
}

impl_paypal_call!(ExecutePayment);

impl ApiCall for ExecutePayment {
    fn executor(&self) -> &RequestExecutor {
        self.base.executor()
    }

    fn executor_mut(&mut self) -> &mut RequestExecutor {
        self.base.executor_mut()
    }

    fn check_input(&mut self) -> bool {
        if !self.base.require_token() {
            return false;
        }
        let Some(execution) = self.execution.take() else {
            return self.base.fail_input("A payment execution is required");
        };
        if execution.payer_id.trim().is_empty() {
            return self.base.fail_input("payer_id is required");
        }
        for (index, transaction) in execution.transactions.iter().enumerate() {
            if let Some(amount) = &transaction.amount {
                if let Err(err) = validate_amount(amount) {
                    return self
                        .base
                        .fail_input(format!("transactions[{}]: {}", index, err.message));
                }
            }
        }
        if !set_resource_path(&mut self.base, PAYMENT_PATH, &self.payment_id, "/execute/") {
            return false;
        }

        self.base.set_authentication();
        set_json_body(&mut self.base, &execution)
    }

    fn check_output(&mut self) -> bool {
        self.payment = hydrate(&mut self.base);
        self.payment.is_some()
    }

    fn extract_error(&mut self, reply: &Reply) {
        self.base.extract_error(reply);
    }

    fn success_callback(&mut self) {
        if let Some(payment) = &self.payment {
            info!(payment_id = %self.payment_id, state = ?payment.state, "Payment executed");
        }
        self.base.executor_mut().finish_success();
    }

    fn error_callback(&mut self) {
        self.base.executor_mut().finish_failure();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::payer::Payer;
    use crate::payment::{Intent, PaymentState, RedirectUrls};
    use crate::transaction::Transaction;
    use chrono::TimeZone;
    use paypal_rest_client::{Authentication, ErrorKind, PayPalCall, TokenType};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(server: &MockServer) -> HttpTransport {
        HttpTransport::new(ClientConfig::builder().with_base_url(server.uri()).build()).unwrap()
    }

    fn bearer() -> Authentication {
        Authentication::token("A", TokenType::Bearer)
    }

    fn sale_payment() -> Payment {
        Payment::new(Intent::Sale, Payer::paypal())
            .with_redirect_urls(RedirectUrls::new(
                "https://example.com/return",
                "https://example.com/cancel",
            ))
            .with_transaction(
                Transaction::new(Amount::new("USD", "10.00")).with_description("Hat"),
            )
    }

    fn created_reply() -> serde_json::Value {
        json!({
            "id": "PAY-1",
            "intent": "sale",
            "state": "created",
            "payer": { "payment_method": "paypal" },
            "transactions": [{ "amount": { "currency": "USD", "total": "10.00" } }],
            "links": [
                {
                    "href": "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-1",
                    "rel": "approval_url",
                    "method": "REDIRECT"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_create_payment_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payments/payment"))
            .and(header("Authorization", "Bearer A"))
            .and(header("Content-Type", "application/json"))
            .and(header_exists("PayPal-Request-Id"))
            .and(body_json(json!({
                "intent": "sale",
                "payer": { "payment_method": "paypal" },
                "transactions": [{
                    "amount": { "currency": "USD", "total": "10.00" },
                    "description": "Hat"
                }],
                "redirect_urls": {
                    "return_url": "https://example.com/return",
                    "cancel_url": "https://example.com/cancel"
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(created_reply()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut create = CreatePayment::new(transport(&mock_server));
        create.set_authentication_info(bearer());
        let mut rx = create.subscribe();
        create.call(&sale_payment()).await;

        assert!(create.error().is_none(), "{:?}", create.error());
        assert!(!create.in_operation());
        assert!(create.request_id().is_some());
        let payment = create.payment().unwrap();
        assert_eq!(payment.id.as_deref(), Some("PAY-1"));
        assert!(payment.approval_url().unwrap().contains("EC-1"));
        assert!(rx.try_recv().unwrap().is_success());
    }

    #[tokio::test]
    async fn test_create_payment_fixed_request_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("PayPal-Request-Id", "order-42"))
            .respond_with(ResponseTemplate::new(201).set_body_json(created_reply()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut create = CreatePayment::new(transport(&mock_server));
        create.set_authentication_info(bearer());
        create.set_request_id("order-42");
        create.call(&sale_payment()).await;

        assert!(create.error().is_none(), "{:?}", create.error());
        assert_eq!(create.request_id(), Some("order-42"));
    }

    #[tokio::test]
    async fn test_create_payment_without_transactions() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let payment = Payment::new(Intent::Sale, Payer::paypal()).with_redirect_urls(
            RedirectUrls::new("https://example.com/return", "https://example.com/cancel"),
        );

        let mut create = CreatePayment::new(transport(&mock_server));
        create.set_authentication_info(bearer());
        let mut rx = create.subscribe();
        create.call(&payment).await;

        let err = create.error().unwrap();
        assert_eq!(err.kind, ErrorKind::InputError);
        assert_eq!(err.source_object_name, "CreatePayment");
        assert!(!create.in_operation());
        assert!(create.payment().is_none());
        let event = rx.try_recv().unwrap();
        assert_eq!(event.error().unwrap().kind, ErrorKind::InputError);
    }

    #[tokio::test]
    async fn test_create_payment_requires_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut create = CreatePayment::new(transport(&mock_server));
        create.call(&sale_payment()).await;

        let err = create.error().unwrap();
        assert_eq!(err.kind, ErrorKind::InputError);
        assert!(err.message.contains("access token"));
    }

    #[tokio::test]
    async fn test_create_payment_unexpected_state() {
        let mock_server = MockServer::start().await;

        let mut reply = created_reply();
        reply["state"] = json!("failed");
        Mock::given(method("POST"))
            .and(path("/v1/payments/payment"))
            .respond_with(ResponseTemplate::new(201).set_body_json(reply))
            .mount(&mock_server)
            .await;

        let mut create = CreatePayment::new(transport(&mock_server));
        create.set_authentication_info(bearer());
        let mut rx = create.subscribe();
        create.call(&sale_payment()).await;

        assert_eq!(create.error().unwrap().kind, ErrorKind::OutputError);
        assert!(create.payment().is_none());
        assert!(!rx.try_recv().unwrap().is_success());
    }

    #[tokio::test]
    async fn test_get_payment_success() {
        let mock_server = MockServer::start().await;

        let mut reply = created_reply();
        reply["state"] = json!("approved");
        Mock::given(method("GET"))
            .and(path("/v1/payments/payment/PAY-1"))
            .and(header("Authorization", "Bearer A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut get = GetPayment::new(transport(&mock_server));
        get.set_authentication_info(bearer());
        get.call("PAY-1").await;

        assert!(get.error().is_none(), "{:?}", get.error());
        assert_eq!(get.http_status(), Some(200));
        let payment = get.take_payment().unwrap();
        assert_eq!(payment.state, Some(PaymentState::Approved));
        assert!(get.payment().is_none());
    }

    #[tokio::test]
    async fn test_get_payment_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/payments/payment/PAY-123"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Payment not found",
                "details": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut get = GetPayment::new(transport(&mock_server));
        get.set_authentication_info(bearer());
        let mut rx = get.subscribe();
        get.call("PAY-123").await;

        let err = get.error().unwrap();
        assert_eq!(err.kind, ErrorKind::RequestError);
        assert_eq!(err.message, "Payment not found");
        assert!(!get.in_operation());
        assert!(get.payment().is_none());
        let event = rx.try_recv().unwrap();
        assert_eq!(event.error().unwrap().message, "Payment not found");
    }

    #[tokio::test]
    async fn test_get_payment_blank_id() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut get = GetPayment::new(transport(&mock_server));
        get.set_authentication_info(bearer());
        get.call("  ").await;

        assert_eq!(get.error().unwrap().kind, ErrorKind::InputError);
    }

    #[tokio::test]
    async fn test_get_payment_array_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let mut get = GetPayment::new(transport(&mock_server));
        get.set_authentication_info(bearer());
        get.call("PAY-1").await;

        assert_eq!(get.error().unwrap().kind, ErrorKind::OutputError);
    }

    #[tokio::test]
    async fn test_list_payments_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/payments/payment"))
            .and(query_param("count", "10"))
            .and(query_param("start_time", "2024-01-01T00:00:00Z"))
            .and(query_param("end_time", "2024-01-31T23:59:59Z"))
            .and(query_param("sort_by", "create_time"))
            .and(query_param("sort_order", "desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payments": [created_reply(), created_reply()],
                "count": 2,
                "next_id": "PAY-3"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let params = ListPaymentsParams::new()
            .with_count(10)
            .with_time_range(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
            )
            .with_sort(SortBy::CreateTime, SortOrder::Desc);

        let mut list = ListPayments::new(transport(&mock_server));
        list.set_authentication_info(bearer());
        list.call(params).await;

        assert!(list.error().is_none(), "{:?}", list.error());
        let page = list.payments().unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.count, 2);
        assert!(page.has_more());
        assert_eq!(page.next_id.as_deref(), Some("PAY-3"));
    }

    #[tokio::test]
    async fn test_list_payments_omits_unset_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/payments/payment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0 })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let mut list = ListPayments::new(transport(&mock_server));
        list.set_authentication_info(bearer());
        list.call(ListPaymentsParams::new().with_start_id("PAY-3")).await;
        list.call(ListPaymentsParams::new()).await;

        assert!(list.error().is_none(), "{:?}", list.error());
        assert!(list.payments().unwrap().is_empty());

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("start_id=PAY-3"));
        assert_eq!(requests[1].url.query(), None);
    }

    #[tokio::test]
    async fn test_list_payments_count_out_of_range() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut list = ListPayments::new(transport(&mock_server));
        list.set_authentication_info(bearer());
        for count in [0, MAX_PAGE_SIZE + 1] {
            list.call(ListPaymentsParams::new().with_count(count)).await;
            assert_eq!(list.error().unwrap().kind, ErrorKind::InputError);
        }
    }

    #[test]
    fn test_params_validate() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(ListPaymentsParams::new()
            .with_time_range(start, end)
            .validate()
            .is_err());
        assert!(ListPaymentsParams::new().with_start_id(" ").validate().is_err());
        assert!(ListPaymentsParams::new().with_count(20).validate().is_ok());
        assert!(ListPaymentsParams::new().query_pairs().is_empty());
    }

    #[tokio::test]
    async fn test_execute_payment_success() {
        let mock_server = MockServer::start().await;

        let mut reply = created_reply();
        reply["state"] = json!("approved");
        Mock::given(method("POST"))
            .and(path("/v1/payments/payment/PAY-1/execute/"))
            .and(body_json(json!({
                "payer_id": "PAYER-9",
                "transactions": [{ "amount": { "currency": "USD", "total": "10.00" } }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .expect(1)
            .mount(&mock_server)
            .await;

        let execution = PaymentExecution::new("PAYER-9").with_amount(Amount::new("USD", "10.00"));
        let mut execute = ExecutePayment::new(transport(&mock_server));
        execute.set_authentication_info(bearer());
        execute.call("PAY-1", &execution).await;

        assert!(execute.error().is_none(), "{:?}", execute.error());
        assert!(execute.payment().unwrap().is_approved());
    }

    #[tokio::test]
    async fn test_execute_payment_requires_payer_id() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut execute = ExecutePayment::new(transport(&mock_server));
        execute.set_authentication_info(bearer());
        execute.call("PAY-1", &PaymentExecution::new("")).await;
        assert!(execute.error().unwrap().message.contains("payer_id"));

        execute
            .call(
                "PAY-1",
                &PaymentExecution::new("PAYER-9").with_amount(Amount::new("USD", "0.00")),
            )
            .await;
        assert!(execute.error().unwrap().message.starts_with("transactions[0]"));

        execute.call("", &PaymentExecution::new("PAYER-9")).await;
        assert_eq!(execute.error().unwrap().kind, ErrorKind::InputError);
    }
}
