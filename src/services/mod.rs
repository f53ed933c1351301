// ============================================================================
// SERVICES - Alerts, cookies, HTTP and the flows built on them
// ============================================================================

pub mod alerts;
pub mod auth;
pub mod cookies;
pub mod countries;
pub mod request;

pub use alerts::AlertChannel;
pub use cookies::{check_cookies, get_cookie, remove_cookie, set_cookie, CookieJar, MemoryCookieJar};
pub use request::{
    ApiClient, HttpRequest, HttpResponse, Method, Navigator, PreparedRequest, RequestHandle,
    RequestOptions, RequestOutcome, Transport,
};
