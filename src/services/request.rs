// ============================================================================
// REQUEST - The single HTTP wrapper every page goes through
// ============================================================================
// Attaches auth + JSON headers, unwraps JSON, hands data to `on_success`.
// Failures never reach the caller: an expired credential clears the user,
// shows an info alert and schedules a trip home; anything else becomes one
// error alert. One attempt per call, no retry, no timeout.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use futures_util::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{ApiError, SESSION_EXPIRED_MESSAGE};
use crate::services::alerts::AlertChannel;
use crate::services::cookies::{clear_session_cookies, CookieJar};
use crate::state::{Action, Store};

pub const HOME_ROUTE: &str = "/";
const JWT_MARKER: &str = "jwt";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// What actually goes over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request. `Err` only when no HTTP response was obtained.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>>;
}

/// Client-side navigation.
pub trait Navigator {
    fn redirect_after(&self, route: &str, delay_ms: u32);
}

pub type OnSuccess = Box<dyn FnOnce(Value)>;

pub struct RequestOptions {
    pub url: String,
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub on_success: Option<OnSuccess>,
    /// Skip the session `Authorization` header (third-party hosts).
    pub anonymous: bool,
}

impl RequestOptions {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            headers: Vec::new(),
            on_success: None,
            anonymous: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, url).body(body)
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, url).body(body)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds or replaces a header (names compare case-insensitively)
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Pre-shared key for endpoints open to anonymous visitors
    pub fn weak_auth(self, api_key: &str) -> Self {
        self.header("Authorization", api_key)
    }

    /// Short-lived token for sensitive endpoints
    pub fn strong_auth(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    /// Never attach the signed-in user's credential
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Value) + 'static,
    {
        self.on_success = Some(Box::new(callback));
        self
    }
}

/// How a request ended; for logging and tests, never needed by callers.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Delivered,
    Cancelled,
    SessionExpired,
    Failed(ApiError),
}

/// Owner of an in-flight request. Dropping or cancelling it before the
/// response arrives discards `on_success` and any error alert.
#[must_use = "dropping the handle cancels the request; call detach() for fire-and-forget"]
pub struct RequestHandle {
    cancelled: Rc<Cell<bool>>,
    detached: bool,
}

impl RequestHandle {
    fn new() -> Self {
        Self {
            cancelled: Rc::new(Cell::new(false)),
            detached: false,
        }
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Lets the request run to completion without an owner
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for RequestHandle {
    fn drop(&mut self) {
        if !self.detached {
            self.cancelled.set(true);
        }
    }
}

/// A request task plus its owning handle, not yet running.
#[must_use = "a prepared request does nothing until it is run or spawned"]
pub struct PreparedRequest {
    handle: RequestHandle,
    task: LocalBoxFuture<'static, RequestOutcome>,
}

impl PreparedRequest {
    pub fn into_parts(self) -> (RequestHandle, LocalBoxFuture<'static, RequestOutcome>) {
        (self.handle, self.task)
    }

    /// Drives the request to completion, keeping the handle alive meanwhile
    pub async fn run(self) -> RequestOutcome {
        let (handle, task) = self.into_parts();
        let outcome = task.await;
        drop(handle);
        outcome
    }

    /// Spawns on the browser event loop; the returned handle owns the request
    #[cfg(target_arch = "wasm32")]
    pub fn spawn(self) -> RequestHandle {
        let (handle, task) = self.into_parts();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = task.await;
            log::debug!("🏁 [REQUEST] {:?}", outcome);
        });
        handle
    }
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    navigator: Rc<dyn Navigator>,
    store: Store,
    alerts: AlertChannel,
    cookies: Rc<dyn CookieJar>,
    config: Rc<AppConfig>,
}

impl ApiClient {
    pub fn new(
        transport: Rc<dyn Transport>,
        navigator: Rc<dyn Navigator>,
        store: Store,
        alerts: AlertChannel,
        cookies: Rc<dyn CookieJar>,
        config: Rc<AppConfig>,
    ) -> Self {
        Self {
            transport,
            navigator,
            store,
            alerts,
            cookies,
            config,
        }
    }

    pub fn cookies(&self) -> &dyn CookieJar {
        self.cookies.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn alerts(&self) -> &AlertChannel {
        &self.alerts
    }

    /// Fires the request on the browser event loop
    #[cfg(target_arch = "wasm32")]
    pub fn request(&self, options: RequestOptions) -> RequestHandle {
        self.issue(options).spawn()
    }

    /// Same as `prepare`, bundled for services that hand the request back
    pub fn issue(&self, options: RequestOptions) -> PreparedRequest {
        let (handle, task) = self.prepare(options);
        PreparedRequest { handle, task }
    }

    /// Builds the request task without spawning it. Headers are resolved now,
    /// from the session as it is when the call is issued.
    pub fn prepare(
        &self,
        options: RequestOptions,
    ) -> (RequestHandle, LocalBoxFuture<'static, RequestOutcome>) {
        let handle = RequestHandle::new();
        let cancelled = handle.cancelled.clone();
        let client = self.clone();

        let RequestOptions {
            url,
            method,
            body,
            headers,
            on_success,
            anonymous,
        } = options;
        let request = self.build_request(url, method, body, headers, anonymous);

        let task = async move {
            let request = match request {
                Ok(request) => request,
                Err(e) => return client.fail(e, &cancelled),
            };

            log::info!("🌐 [REQUEST] {} {}", request.method.as_str(), request.url);
            let response = client.transport.send(request).await;

            match response {
                Ok(response) if response.is_success() => {
                    if cancelled.get() {
                        log::debug!("🚫 [REQUEST] Response arrived after cancellation, dropped");
                        return RequestOutcome::Cancelled;
                    }
                    match parse_body(&response.body) {
                        Ok(data) => {
                            if let Some(callback) = on_success {
                                callback(data);
                            }
                            RequestOutcome::Delivered
                        }
                        Err(e) => client.fail(e, &cancelled),
                    }
                }
                Ok(response) => client.fail(error_from_response(&response), &cancelled),
                Err(e) => client.fail(e, &cancelled),
            }
        };

        (handle, task.boxed_local())
    }

    fn build_request(
        &self,
        url: String,
        method: Method,
        body: Option<Value>,
        overrides: Vec<(String, String)>,
        anonymous: bool,
    ) -> Result<HttpRequest, ApiError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if !anonymous {
            if let Some(bearer) = self.store.with_state(|s| s.user.bearer()) {
                headers.push(("Authorization".to_string(), format!("Bearer {}", bearer)));
            }
        }
        for (name, value) in overrides {
            headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        let body = body.map(|b| serde_json::to_string(&b)).transpose()?;

        Ok(HttpRequest {
            url,
            method,
            headers,
            body,
        })
    }

    /// Resolves a failure into store/alert side effects
    fn fail(&self, error: ApiError, cancelled: &Cell<bool>) -> RequestOutcome {
        if error == ApiError::SessionExpired {
            // The credential is dead for every view, owner or not.
            log::warn!("🔒 [REQUEST] Session expired, signing out");
            self.store.dispatch(Action::ClearUser);
            clear_session_cookies(self.cookies.as_ref());
            self.alerts.info(SESSION_EXPIRED_MESSAGE);
            self.navigator
                .redirect_after(HOME_ROUTE, self.config.redirect_delay_ms);
            return RequestOutcome::SessionExpired;
        }

        if cancelled.get() {
            log::debug!("🚫 [REQUEST] Failure after cancellation, not alerting: {}", error);
            return RequestOutcome::Cancelled;
        }

        log::error!("❌ [REQUEST] {}", error);
        self.alerts.error(error.user_message());
        RequestOutcome::Failed(error)
    }
}

/// Empty bodies decode to `null`
fn parse_body(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

fn is_jwt_marker(text: &str) -> bool {
    let text = text.trim();
    text == JWT_MARKER || text.starts_with("jwt ")
}

/// Maps a non-2xx response onto the error taxonomy
fn error_from_response(response: &HttpResponse) -> ApiError {
    let body: Option<Value> = serde_json::from_str(&response.body).ok();
    let field = |name: &str| {
        body.as_ref()
            .and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let message = field("message");
    let sentinel = field("error");

    if message.as_deref().is_some_and(is_jwt_marker) || sentinel.as_deref().is_some_and(is_jwt_marker)
    {
        return ApiError::SessionExpired;
    }

    ApiError::Server {
        status: response.status,
        message,
    }
}

/// gloo-net transport
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct BrowserTransport;

#[cfg(target_arch = "wasm32")]
impl Transport for BrowserTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>> {
        async move {
            use gloo_net::http::{Method as HttpMethod, RequestBuilder};

            let method = match request.method {
                Method::Get => HttpMethod::GET,
                Method::Post => HttpMethod::POST,
                Method::Put => HttpMethod::PUT,
                Method::Patch => HttpMethod::PATCH,
                Method::Delete => HttpMethod::DELETE,
            };

            let mut builder = RequestBuilder::new(&request.url).method(method);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let built = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            let response = built
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            Ok(HttpResponse { status, body })
        }
        .boxed_local()
    }
}

/// Sets `window.location` once the delay elapses
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn redirect_after(&self, route: &str, delay_ms: u32) {
        let route = route.to_string();
        gloo_timers::callback::Timeout::new(delay_ms, move || {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(&route) {
                    log::error!("❌ [NAV] Redirect to {} failed: {:?}", route, e);
                }
            }
        })
        .forget();
    }
}
