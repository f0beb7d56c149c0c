use tracing::{info, instrument};

use paypal_rest_client::{
    send_request, ApiCall, ApiCallBase, ClientConfig, ExpectedJsonType, HttpTransport, Reply,
    RequestExecutor, RequestMethod, Result,
};

use super::{hydrate, set_resource_path, REFUND_PATH};
use crate::resources::Refund;

/// Fetches one refund by id.
#[derive(Debug)]
pub struct GetRefund {
    base: ApiCallBase,
    refund_id: String,
    refund: Option<Refund>,
}

impl GetRefund {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            base: ApiCallBase::new(
                "GetRefund",
                transport,
                RequestMethod::Get,
                REFUND_PATH,
                ExpectedJsonType::Object,
            ),
            refund_id: String::new(),
            refund: None,
        }
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    #[instrument(skip(self))]
    pub async fn call(&mut self, refund_id: &str) {
        self.refund_id = refund_id.to_string();
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

impl_paypal_call!(GetRefund);

impl ApiCall for GetRefund {
    fn executor(&self) -> &RequestExecutor {
        self.base.executor()
    }

    fn executor_mut(&mut self) -> &mut RequestExecutor {
        self.base.executor_mut()
    }

    fn check_input(&mut self) -> bool {
        if !self.base.require_token()
            || !set_resource_path(&mut self.base, REFUND_PATH, &self.refund_id, "")
        {
            return false;
        }
        self.base.set_authentication();
        true
    }

    fn check_output(&mut self) -> bool {
        self.refund = hydrate(&mut self.base);
        self.refund.is_some()
    }

    fn extract_error(&mut self, reply: &Reply) {
        self.base.extract_error(reply);
    }

    fn success_callback(&mut self) {
        info!(refund_id = %self.refund_id, "Refund fetched");
        self.base.executor_mut().finish_success();
    }

    fn error_callback(&mut self) {
        self.base.executor_mut().finish_failure();
    }
}
