//! Single-request lifecycle.
//!
//! A call object owns one [`RequestExecutor`] and implements [`ApiCall`].
//! [`send_request`] drives the call through its hooks:
//!
//! ```text
//! begin -> check_input -> validate request -> send (timeout armed)
//!   -> transport error: extract_error -> error_callback
//!   -> timeout:         RequestError "timed out" -> error_callback
//!   -> reply:           check_output -> success_callback | error_callback
//! ```
//!
//! Exactly one of the two callbacks runs per `send_request`.

use std::time::Duration;

use bytes::Bytes;
use tokio::sync::broadcast;
use tracing::{debug, instrument, warn};

use crate::config::timeout_from_seconds;
use crate::error::{ErrorInfo, Result, TIMED_OUT};
use crate::events::{CallEvent, CallEvents};
use crate::request::RequestConfig;
use crate::response::Reply;
use crate::transport::HttpTransport;

/// Request description plus per-call state for one call object.
#[derive(Debug)]
pub struct RequestExecutor {
    object_name: String,
    transport: HttpTransport,
    request: RequestConfig,
    timeout_seconds: i64,
    in_operation: bool,
    http_status: Option<u16>,
    pub(crate) result: Bytes,
    error: Option<ErrorInfo>,
    events: CallEvents,
}

impl RequestExecutor {
    /// Create an executor on a (possibly shared) transport. Base URL and
    /// timeout come from the transport's configuration.
    pub fn new(object_name: impl Into<String>, transport: HttpTransport) -> Self {
        let config = transport.config();
        let request = RequestConfig::new(config.base_url.clone());
        let timeout_seconds = config.timeout_seconds;
        Self {
            object_name: object_name.into(),
            transport,
            request,
            timeout_seconds,
            in_operation: false,
            http_status: None,
            result: Bytes::new(),
            error: None,
            events: CallEvents::new(),
        }
    }

    /// Create an executor with its own transport.
    pub fn with_default_transport(object_name: impl Into<String>) -> Result<Self> {
        Ok(Self::new(object_name, HttpTransport::default_transport()?))
    }

    /// Name used to tag errors and log lines.
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub fn request(&self) -> &RequestConfig {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut RequestConfig {
        &mut self.request
    }

    pub fn timeout_seconds(&self) -> i64 {
        self.timeout_seconds
    }

    /// Set the timeout in seconds; `<= 0` disables it.
    pub fn set_timeout_seconds(&mut self, seconds: i64) {
        self.timeout_seconds = seconds;
    }

    pub fn timeout(&self) -> Option<Duration> {
        timeout_from_seconds(self.timeout_seconds)
    }

    pub fn in_operation(&self) -> bool {
        self.in_operation
    }

    /// Callback hooks clear this when they finish.
    pub fn set_in_operation(&mut self, in_operation: bool) {
        self.in_operation = in_operation;
    }

    /// HTTP status of the last reply, if one arrived.
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// Raw body of the last successful reply.
    pub fn result(&self) -> &Bytes {
        &self.result
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// Record an error, replacing the previous one.
    pub fn set_error(&mut self, error: ErrorInfo) {
        let error = error.with_source_object(self.object_name.clone());
        warn!(
            object = %self.object_name,
            kind = ?error.kind,
            message = %error.message,
            "Call error recorded"
        );
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Subscribe to this call object's outcome events.
    pub fn subscribe(&self) -> broadcast::Receiver<CallEvent> {
        self.events.subscribe()
    }

    /// Finish the current operation successfully.
    pub fn finish_success(&mut self) {
        self.in_operation = false;
        debug!(object = %self.object_name, "Call succeeded");
        self.events.emit(CallEvent::Succeeded);
    }

    /// Finish the current operation with the recorded error.
    pub fn finish_failure(&mut self) {
        self.in_operation = false;
        let error = match &self.error {
            Some(error) => error.clone(),
            None => {
                let error = ErrorInfo::request("Call failed")
                    .with_source_object(self.object_name.clone());
                self.error = Some(error.clone());
                error
            }
        };
        self.events.emit(CallEvent::Failed(error));
    }

    fn begin(&mut self) {
        if self.in_operation {
            warn!(
                object = %self.object_name,
                "Previous request was abandoned before completing"
            );
        }
        self.in_operation = true;
        self.error = None;
        self.result = Bytes::new();
        self.http_status = None;
    }

    /// Structural checks done before any I/O.
    fn validate_request(&self) -> Result<()> {
        self.request.full_url()?;
        if self.request.method.requires_body() && self.request.body.is_empty() {
            return Err(ErrorInfo::input(format!(
                "{:?} request requires a body",
                self.request.method
            )));
        }
        Ok(())
    }
}

/// Hooks a call object implements.
pub trait ApiCall {
    fn executor(&self) -> &RequestExecutor;

    fn executor_mut(&mut self) -> &mut RequestExecutor;

    /// Semantic validation of the call's parameters. May record a specific
    /// error; otherwise a generic input error is recorded on `false`.
    fn check_input(&mut self) -> bool {
        true
    }

    /// Validation of the raw result before `success_callback`.
    fn check_output(&mut self) -> bool {
        true
    }

    /// Classify a failed reply into an error.
    fn extract_error(&mut self, reply: &Reply) {
        let error = reply.generic_error();
        self.executor_mut().set_error(error);
    }

    /// Must clear `in_operation`.
    fn success_callback(&mut self);

    /// Must clear `in_operation`.
    fn error_callback(&mut self);
}

/// Drive one request to completion through the call's hooks.
#[instrument(skip(call), fields(object = %call.executor().object_name()))]
pub async fn send_request<C: ApiCall + ?Sized>(call: &mut C) {
    call.executor_mut().begin();

    if !call.check_input() {
        let executor = call.executor_mut();
        if executor.error.is_none() {
            executor.set_error(ErrorInfo::input("Input check failed"));
        }
        call.error_callback();
        return;
    }

    if let Err(error) = call.executor().validate_request() {
        call.executor_mut().set_error(error);
        call.error_callback();
        return;
    }

    let (transport, request, timeout) = {
        let executor = call.executor();
        (
            executor.transport.clone(),
            executor.request.clone(),
            executor.timeout(),
        )
    };

    let reply = match timeout {
        Some(limit) => match tokio::time::timeout(limit, transport.send(&request)).await {
            Ok(reply) => reply,
            Err(_) => {
                call.executor_mut().set_error(ErrorInfo::request(TIMED_OUT));
                call.error_callback();
                return;
            }
        },
        None => transport.send(&request).await,
    };

    call.executor_mut().http_status = reply.status();

    if reply.is_error() {
        call.extract_error(&reply);
        let executor = call.executor_mut();
        if executor.error.is_none() {
            executor.set_error(reply.generic_error());
        }
        call.error_callback();
        return;
    }

    call.executor_mut().result = reply.body().clone();

    if call.check_output() {
        call.success_callback();
    } else {
        let executor = call.executor_mut();
        if executor.error.is_none() {
            executor.set_error(ErrorInfo::output("Output check failed"));
        }
        call.error_callback();
    }
}
