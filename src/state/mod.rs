// ============================================================================
// STATE MODULE - Reducer store with persistence and subscribers
// ============================================================================

pub mod action;
pub mod app_state;
pub mod persist;
pub mod reactivity;
pub mod reducers;
pub mod store;

pub use action::Action;
pub use app_state::{reduce, AppState};
pub use persist::{MemoryBackend, PersistBackend, PersistConfig, Slice};
pub use reactivity::{SubscriptionId, Subscribers};
pub use store::Store;
