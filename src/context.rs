// ============================================================================
// APP CONTEXT - Everything a page needs, handed around explicitly
// ============================================================================

use crate::services::alerts::AlertChannel;
use crate::services::cookies::CookieJar;
use crate::services::request::ApiClient;
use crate::state::Store;

#[derive(Clone)]
pub struct AppContext {
    client: ApiClient,
}

impl AppContext {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Wires browser backends: localStorage, document.cookie, fetch, timers
    #[cfg(target_arch = "wasm32")]
    pub fn browser(config: crate::config::AppConfig) -> Self {
        use std::rc::Rc;

        use crate::services::cookies::DocumentCookieJar;
        use crate::services::request::{BrowserNavigator, BrowserTransport};
        use crate::state::persist::{LocalStorageBackend, PersistConfig};

        let config = Rc::new(config);
        let store = Store::persisted(Rc::new(LocalStorageBackend), PersistConfig::default());
        let alerts = AlertChannel::new(config.alert_config.clone());
        let client = ApiClient::new(
            Rc::new(BrowserTransport),
            Rc::new(BrowserNavigator),
            store,
            alerts,
            Rc::new(DocumentCookieJar),
            config,
        );
        Self::new(client)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> &Store {
        self.client.store()
    }

    pub fn alerts(&self) -> &AlertChannel {
        self.client.alerts()
    }

    pub fn cookies(&self) -> &dyn CookieJar {
        self.client.cookies()
    }
}
