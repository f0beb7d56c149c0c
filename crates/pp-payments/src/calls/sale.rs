//! Sale lookups and refunds.

use tracing::{info, instrument};

use paypal_rest_client::{
    send_request, ApiCall, ApiCallBase, ClientConfig, ExpectedJsonType, HttpTransport, Reply,
    RequestExecutor, RequestMethod, Result,
};

use super::{hydrate, set_json_body, set_resource_path, SALE_PATH};
use crate::resources::{Refund, RefundRequest, Sale};
use crate::validation::validate_amount;

/// Fetches one sale by id.
#[derive(Debug)]
pub struct GetSale {
    base: ApiCallBase,
    sale_id: String,
    sale: Option<Sale>,
}

impl GetSale {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            base: ApiCallBase::new(
                "GetSale",
                transport,
                RequestMethod::Get,
                SALE_PATH,
                ExpectedJsonType::Object,
            ),
            sale_id: String::new(),
            sale: None,
        }
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    #[instrument(skip(self))]
    pub async fn call(&mut self, sale_id: &str) {
        self.sale_id = sale_id.to_string();
        self.sale = None;
        send_request(self).await;
    }

    pub fn sale(&self) -> Option<&Sale> {
        self.sale.as_ref()
    }

    pub fn take_sale(&mut self) -> Option<Sale> {
        self.sale.take()
    }
}

impl_paypal_call!(GetSale);

impl ApiCall for GetSale {
    fn executor(&self) -> &RequestExecutor {
        self.base.executor()
    }

    fn executor_mut(&mut self) -> &mut RequestExecutor {
        self.base.executor_mut()
    }

    fn check_input(&mut self) -> bool {
        if !self.base.require_token()
            || !set_resource_path(&mut self.base, SALE_PATH, &self.sale_id, "")
        {
            return false;
        }
        self.base.set_authentication();
        true
    }

    fn check_output(&mut self) -> bool {
        self.sale = hydrate(&mut self.base);
        self.sale.is_some()
    }

    fn extract_error(&mut self, reply: &Reply) {
        self.base.extract_error(reply);
    }

    fn success_callback(&mut self) {
        if let Some(sale) = &self.sale {
            info!(sale_id = %self.sale_id, state = ?sale.state, "Sale fetched");
        }
        self.base.executor_mut().finish_success();
    }

    fn error_callback(&mut self) {
        self.base.executor_mut().finish_failure();
    }
}

/// Refunds a completed sale, fully or in part.
///
/// ```rust,ignore
/// let mut refund = RefundSale::new(transport);
/// refund.set_authentication_info(&token);
/// refund.call("4RR959492F879224U", &RefundRequest::partial(Amount::new("USD", "2.00"))).await;
/// ```
#[derive(Debug)]
pub struct RefundSale {
    base: ApiCallBase,
    sale_id: String,
    request: Option<RefundRequest>,
    refund: Option<Refund>,
}

impl RefundSale {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            base: ApiCallBase::new(
                "RefundSale",
                transport,
                RequestMethod::Post,
                SALE_PATH,
                ExpectedJsonType::Object,
            ),
            sale_id: String::new(),
            request: None,
            refund: None,
        }
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    #[instrument(skip(self, request), fields(partial = request.amount.is_some()))]
    pub async fn call(&mut self, sale_id: &str, request: &RefundRequest) {
        self.sale_id = sale_id.to_string();
        self.request = Some(request.clone());
        self.refund = None;
        send_request(self).await;
    }

    pub fn refund(&self) -> Option<&Refund> {
        self.refund.as_ref()
    }

    pub fn take_refund(&mut self) -> Option<Refund> {
        self.refund.take()
    }
}

impl_paypal_call!(RefundSale);

impl ApiCall for RefundSale {
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
        let request = self.request.take().unwrap_or_default();
        if let Some(amount) = &request.amount {
            if let Err(err) = validate_amount(amount) {
                self.base.executor_mut().set_error(err);
                return false;
            }
        }
        if !set_resource_path(&mut self.base, SALE_PATH, &self.sale_id, "/refund") {
            return false;
        }

        self.base.set_authentication();
        set_json_body(&mut self.base, &request)
    }

    fn check_output(&mut self) -> bool {
        self.refund = hydrate(&mut self.base);
        self.refund.is_some()
    }

    fn extract_error(&mut self, reply: &Reply) {
        self.base.extract_error(reply);
    }

    fn success_callback(&mut self) {
        if let Some(refund) = &self.refund {
            info!(
                sale_id = %self.sale_id,
                refund_id = refund.id.as_deref().unwrap_or_default(),
                state = ?refund.state,
                "Sale refunded"
            );
        }
        self.base.executor_mut().finish_success();
    }

    fn error_callback(&mut self) {
        self.base.executor_mut().finish_failure();
    }
}
