// ============================================================================
// STORE - Shared handle over the state tree (Rc<RefCell> + subscribers)
// ============================================================================
// Passed explicitly to whatever needs it; there is no global instance.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::action::Action;
use crate::state::app_state::{reduce, AppState};
use crate::state::persist::{self, PersistBackend, PersistConfig};
use crate::state::reactivity::{SubscriptionId, Subscribers};

struct Persistence {
    backend: Rc<dyn PersistBackend>,
    config: PersistConfig,
}

#[derive(Clone)]
pub struct Store {
    state: Rc<RefCell<AppState>>,
    subscribers: Subscribers,
    persistence: Option<Rc<Persistence>>,
}

impl Store {
    /// Store without persistence
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Rc::new(RefCell::new(initial)),
            subscribers: Subscribers::new(),
            persistence: None,
        }
    }

    /// Rehydrates from `backend` and keeps writing whitelisted slices back to it
    pub fn persisted(backend: Rc<dyn PersistBackend>, config: PersistConfig) -> Self {
        let initial = persist::rehydrate(backend.as_ref(), &config);
        Self {
            state: Rc::new(RefCell::new(initial)),
            subscribers: Subscribers::new(),
            persistence: Some(Rc::new(Persistence { backend, config })),
        }
    }

    /// Snapshot of the current tree
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Reads the tree without cloning it
    pub fn with_state<R>(&self, reader: impl FnOnce(&AppState) -> R) -> R {
        reader(&self.state.borrow())
    }

    pub fn dispatch(&self, action: Action) {
        log::debug!("📨 [STORE] {}", action.tag());

        let next = reduce(&self.state.borrow(), &action);
        let changed = *self.state.borrow() != next;
        *self.state.borrow_mut() = next;

        if !changed {
            return;
        }

        if let Some(persistence) = &self.persistence {
            if let Err(e) = persist::persist(
                persistence.backend.as_ref(),
                &persistence.config,
                &self.state.borrow(),
            ) {
                log::error!("❌ [STORE] Could not persist state: {}", e);
            }
        }

        self.subscribers.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
