// ============================================================================
// COOKIES - name=value browser cookies + cookie-consent gate
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use crate::error::ApiError;
use crate::services::alerts::AlertChannel;

/// "Remember me" flag set at login.
pub const COOKIE_REMEMBER: &str = "remember";
/// Set once the visitor accepts the cookie policy.
pub const COOKIE_CONSENT: &str = "cookiesAccepted";
/// Session liveness marker checked at startup.
pub const COOKIE_AUTH: &str = "wokeAuth";

pub const CONSENT_HOURS: i64 = 24 * 360;

pub trait CookieJar {
    /// Raw value, `None` when absent or expired
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str, expires: DateTime<Utc>) -> Result<(), ApiError>;
}

/// Writes `name=value` expiring `hours` from now
pub fn set_cookie(jar: &dyn CookieJar, name: &str, value: &str, hours: i64) -> Result<(), ApiError> {
    let expires = Utc::now() + Duration::hours(hours);
    jar.set(name, value, expires)
}

/// Raw value or an empty string when the cookie is absent
pub fn get_cookie(jar: &dyn CookieJar, name: &str) -> String {
    jar.get(name).unwrap_or_default()
}

pub fn remove_cookie(jar: &dyn CookieJar, name: &str) -> Result<(), ApiError> {
    jar.set(name, "", Utc::now() - Duration::days(1))
}

/// Drops the session markers; shared by logout and session expiry.
pub fn clear_session_cookies(jar: &dyn CookieJar) {
    for name in [COOKIE_AUTH, COOKIE_REMEMBER] {
        if let Err(e) = remove_cookie(jar, name) {
            log::warn!("⚠️ [COOKIES] Could not remove cookie {}: {}", name, e);
        }
    }
}

/// True when the consent cookie is present. Otherwise pushes `message` as an
/// error alert (if given) and returns false.
pub fn check_cookies(jar: &dyn CookieJar, alerts: &AlertChannel, message: Option<&str>) -> bool {
    if !get_cookie(jar, COOKIE_CONSENT).is_empty() {
        return true;
    }
    if let Some(message) = message {
        alerts.error(message);
    }
    false
}

/// Finds `name` in a `document.cookie` style header (`a=1; b=2`)
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Cookie jar kept in memory; honours expiry. Clones share the same jar.
#[derive(Clone, Default)]
pub struct MemoryCookieJar {
    cookies: Rc<RefCell<HashMap<String, (String, DateTime<Utc>)>>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.borrow();
        let (value, expires) = cookies.get(name)?;
        if *expires <= Utc::now() {
            return None;
        }
        Some(value.clone())
    }

    fn set(&self, name: &str, value: &str, expires: DateTime<Utc>) -> Result<(), ApiError> {
        let mut cookies = self.cookies.borrow_mut();
        if expires <= Utc::now() {
            cookies.remove(name);
        } else {
            cookies.insert(name.to_string(), (value.to_string(), expires));
        }
        Ok(())
    }
}

/// `document.cookie`
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct DocumentCookieJar;

#[cfg(target_arch = "wasm32")]
impl DocumentCookieJar {
    fn document() -> Result<web_sys::HtmlDocument, ApiError> {
        use wasm_bindgen::JsCast;
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
            .ok_or_else(|| ApiError::Storage("document is not available".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl CookieJar for DocumentCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let header = Self::document().ok()?.cookie().ok()?;
        parse_cookie(&header, name).filter(|v| !v.is_empty())
    }

    fn set(&self, name: &str, value: &str, expires: DateTime<Utc>) -> Result<(), ApiError> {
        let cookie = format!(
            "{}={};expires={};path=/",
            name,
            value,
            expires.format("%a, %d %b %Y %H:%M:%S GMT")
        );
        Self::document()?
            .set_cookie(&cookie)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }
}
