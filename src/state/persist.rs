// ============================================================================
// PERSIST - Whitelisted slices survive reloads (localStorage)
// ============================================================================
// The whitelisted subset is written as one JSON document under `persist:root`
// after each dispatch and read back once, before the store is handed out.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::state::app_state::AppState;

pub const PERSIST_KEY: &str = "persist:root";

/// Store slices, named by their persistence key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    User,
    Session,
    Topic,
    Blackex,
    Countries,
    Theme,
}

impl Slice {
    pub fn key(self) -> &'static str {
        match self {
            Slice::User => "user",
            Slice::Session => "session",
            Slice::Topic => "topic",
            Slice::Blackex => "blackex",
            Slice::Countries => "countries",
            Slice::Theme => "theme",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersistConfig {
    pub key: String,
    pub whitelist: Vec<Slice>,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            key: PERSIST_KEY.to_string(),
            // countries are memoised per app session only
            whitelist: vec![
                Slice::User,
                Slice::Session,
                Slice::Topic,
                Slice::Blackex,
                Slice::Theme,
            ],
        }
    }
}

/// Key/value string storage the store persists into.
pub trait PersistBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, ApiError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), ApiError>;
    fn remove_item(&self, key: &str) -> Result<(), ApiError>;
}

/// In-memory backend. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), ApiError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage` through gloo-storage.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct LocalStorageBackend;

#[cfg(target_arch = "wasm32")]
impl PersistBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, ApiError> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ApiError> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), ApiError> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::delete(key);
        Ok(())
    }
}

/// Whitelisted part of the state as a JSON object
pub fn snapshot(state: &AppState, whitelist: &[Slice]) -> Result<Map<String, Value>, ApiError> {
    let mut doc = Map::new();
    for slice in whitelist {
        let value = match slice {
            Slice::User => serde_json::to_value(&state.user)?,
            Slice::Session => serde_json::to_value(&state.session)?,
            Slice::Topic => serde_json::to_value(&state.topic)?,
            Slice::Blackex => serde_json::to_value(&state.blackex)?,
            Slice::Countries => serde_json::to_value(&state.countries)?,
            Slice::Theme => serde_json::to_value(state.theme)?,
        };
        doc.insert(slice.key().to_string(), value);
    }
    Ok(doc)
}

pub fn persist(
    backend: &dyn PersistBackend,
    config: &PersistConfig,
    state: &AppState,
) -> Result<(), ApiError> {
    let doc = snapshot(state, &config.whitelist)?;
    let json = serde_json::to_string(&Value::Object(doc))?;
    backend.set_item(&config.key, &json)
}

/// Restores whitelisted slices; anything missing or unreadable keeps its default.
pub fn rehydrate(backend: &dyn PersistBackend, config: &PersistConfig) -> AppState {
    let mut state = AppState::default();

    let raw = match backend.get_item(&config.key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::info!("ℹ️ [PERSIST] No persisted state, starting fresh");
            return state;
        }
        Err(e) => {
            log::warn!("⚠️ [PERSIST] Could not read persisted state: {}", e);
            return state;
        }
    };

    let doc: Map<String, Value> = match serde_json::from_str(&raw) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("⚠️ [PERSIST] Persisted state is corrupt, discarding: {}", e);
            if let Err(e) = backend.remove_item(&config.key) {
                log::warn!("⚠️ [PERSIST] Could not remove corrupt state: {}", e);
            }
            return state;
        }
    };

    for slice in &config.whitelist {
        let Some(value) = doc.get(slice.key()) else {
            continue;
        };
        match slice {
            Slice::User => {
                restore(value, slice, &mut state.user);
                state.user = std::mem::take(&mut state.user).rederive();
            }
            Slice::Session => restore(value, slice, &mut state.session),
            Slice::Topic => restore(value, slice, &mut state.topic),
            Slice::Blackex => restore(value, slice, &mut state.blackex),
            Slice::Countries => restore(value, slice, &mut state.countries),
            Slice::Theme => restore(value, slice, &mut state.theme),
        }
    }

    log::info!("✅ [PERSIST] Rehydrated {} slice(s)", config.whitelist.len());
    state
}

fn restore<T: DeserializeOwned>(value: &Value, slice: &Slice, target: &mut T) {
    match serde_json::from_value(value.clone()) {
        Ok(restored) => *target = restored,
        Err(e) => log::warn!("⚠️ [PERSIST] Dropping slice '{}': {}", slice.key(), e),
    }
}
