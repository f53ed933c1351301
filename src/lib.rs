// ============================================================================
// #WOKEWEEKLY WEB CLIENT CORE (RUST + WASM)
// ============================================================================
// - State: reducer store with whitelisted localStorage persistence
// - Services: HTTP wrapper, alert channel, cookies, auth/country flows
// - Validation: pure rules + one-alert presentation layer
// - Context: explicit handle passed to every page composition
// ============================================================================

pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod validation;

#[cfg(test)]
mod testing;

pub use context::AppContext;
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::CONFIG;
    use crate::context::AppContext;
    use crate::services::auth;

    thread_local! {
        static CONTEXT: RefCell<Option<AppContext>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        log::info!("🚀 #WOKEWeekly client starting ({})", CONFIG.environment);

        let context = AppContext::browser(CONFIG.clone());
        auth::check_session_liveness(&context);

        CONTEXT.with(|cell| {
            *cell.borrow_mut() = Some(context);
        });
        Ok(())
    }

    /// Handle for page compositions. `None` before start-up finished.
    pub fn app_context() -> Option<AppContext> {
        CONTEXT.with(|cell| cell.borrow().clone())
    }

    #[wasm_bindgen]
    pub fn accept_cookies() {
        match app_context() {
            Some(ctx) => auth::accept_cookies(&ctx),
            None => log::warn!("⚠️ App context not initialised"),
        }
    }

    #[wasm_bindgen]
    pub fn logout() {
        match app_context() {
            Some(ctx) => auth::logout(&ctx),
            None => log::warn!("⚠️ App context not initialised"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::app_context;
