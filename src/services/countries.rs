// ============================================================================
// COUNTRIES - Fetched once from the third-party API, memoised in the store
// ============================================================================

use crate::context::AppContext;
use crate::error::GENERIC_ERROR_MESSAGE;
use crate::models::country::RemoteCountry;
use crate::models::Country;
use crate::services::request::{PreparedRequest, RequestOptions};
use crate::state::Action;

/// Calls `on_loaded` straight away when the list is cached; otherwise returns
/// the request that fetches, stores and then delivers it.
pub fn load_countries<F>(ctx: &AppContext, on_loaded: F) -> Option<PreparedRequest>
where
    F: FnOnce(Vec<Country>) + 'static,
{
    if let Some(cached) = ctx.store().with_state(|s| s.countries.clone()) {
        log::debug!("🌍 [COUNTRIES] Using {} cached countries", cached.len());
        on_loaded(cached);
        return None;
    }

    log::info!("🌍 [COUNTRIES] Fetching country list...");
    let ctx_cb = ctx.clone();
    let options = RequestOptions::get(ctx.client().config().countries_api_url.clone())
        .anonymous()
        .on_success(move |data| {
            let remote: Vec<RemoteCountry> = match serde_json::from_value(data) {
                Ok(remote) => remote,
                Err(e) => {
                    log::error!("❌ [COUNTRIES] Unexpected response: {}", e);
                    ctx_cb.alerts().error(GENERIC_ERROR_MESSAGE);
                    return;
                }
            };

            let mut countries: Vec<Country> = remote.into_iter().map(Country::from).collect();
            countries.sort_by(|a, b| a.label.cmp(&b.label));
            log::info!("✅ [COUNTRIES] {} countries loaded", countries.len());

            ctx_cb
                .store()
                .dispatch(Action::SaveCountries(countries.clone()));
            on_loaded(countries);
        });
    Some(ctx.client().issue(options))
}
