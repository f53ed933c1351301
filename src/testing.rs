//! Test doubles for the browser-facing traits.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures_util::future::{self, FutureExt, LocalBoxFuture};
use serde_json::Value;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::services::alerts::AlertChannel;
use crate::services::cookies::MemoryCookieJar;
use crate::services::request::{ApiClient, HttpRequest, HttpResponse, Navigator, Transport};
use crate::state::Store;

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string(),
    }
}

/// Replays scripted responses in order and records what was sent.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Rc<RefCell<VecDeque<Result<HttpResponse, ApiError>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn respond(&self, response: HttpResponse) {
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub fn fail(&self, error: ApiError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>> {
        self.requests.borrow_mut().push(request);
        let next = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())));
        future::ready(next).boxed_local()
    }
}

/// Records scheduled redirects instead of navigating.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    redirects: Rc<RefCell<Vec<(String, u32)>>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<(String, u32)> {
        self.redirects.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_after(&self, route: &str, delay_ms: u32) {
        self.redirects
            .borrow_mut()
            .push((route.to_string(), delay_ms));
    }
}

/// A full context wired to in-memory backends.
pub struct Harness {
    pub transport: MockTransport,
    pub navigator: RecordingNavigator,
    pub cookies: MemoryCookieJar,
    pub store: Store,
    pub alerts: AlertChannel,
    pub client: ApiClient,
    pub context: AppContext,
}

impl Harness {
    pub fn new() -> Self {
        let transport = MockTransport::default();
        let navigator = RecordingNavigator::default();
        let cookies = MemoryCookieJar::new();
        let config = Rc::new(AppConfig {
            api_key: "test-key".to_string(),
            ..AppConfig::default()
        });
        let store = Store::default();
        let alerts = AlertChannel::new(config.alert_config.clone());
        let client = ApiClient::new(
            Rc::new(transport.clone()),
            Rc::new(navigator.clone()),
            store.clone(),
            alerts.clone(),
            Rc::new(cookies.clone()),
            config,
        );
        let context = AppContext::new(client.clone());

        Self {
            transport,
            navigator,
            cookies,
            store,
            alerts,
            client,
            context,
        }
    }
}
