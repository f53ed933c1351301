// ============================================================================
// APP STATE - The combined state tree
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{
    CandidatePreferences, Country, SessionPreferences, Theme, TopicPreferences, User,
};
use crate::state::action::Action;
use crate::state::reducers;

/// Whole store tree. Field names double as persistence keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub user: User,
    pub session: SessionPreferences,
    pub topic: TopicPreferences,
    pub blackex: CandidatePreferences,
    /// `None` until the list has been fetched once.
    pub countries: Option<Vec<Country>>,
    pub theme: Theme,
}

/// Root reducer: every slice sees every action.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        user: reducers::user_reducer(&state.user, action),
        session: reducers::session_reducer(&state.session, action),
        topic: reducers::topic_reducer(&state.topic, action),
        blackex: reducers::candidate_reducer(&state.blackex, action),
        countries: reducers::countries_reducer(&state.countries, action),
        theme: reducers::theme_reducer(&state.theme, action),
    }
}
