use crate::models::{
    CandidateSort, Country, SessionSort, SessionView, Theme, TopicSort, UserPayload,
};

/// Everything that can change the store. Network work happens elsewhere;
/// only its result is dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SaveUser(UserPayload),
    ClearUser,
    VerifyUser,
    ChangeUsername(String),
    SaveSessionSort(SessionSort),
    SaveSessionView(SessionView),
    SaveTopicSort(TopicSort),
    SaveCandidateSort(CandidateSort),
    SaveCountries(Vec<Country>),
    SetTheme(Theme),
}

impl Action {
    /// Short tag for logs (payloads may hold tokens)
    pub fn tag(&self) -> &'static str {
        match self {
            Action::SaveUser(_) => "SAVE_USER",
            Action::ClearUser => "CLEAR_USER",
            Action::VerifyUser => "VERIFY_USER",
            Action::ChangeUsername(_) => "CHANGE_USERNAME",
            Action::SaveSessionSort(_) => "SAVE_SESSION_SORT",
            Action::SaveSessionView(_) => "SAVE_SESSION_VIEW",
            Action::SaveTopicSort(_) => "SAVE_TOPIC_SORT",
            Action::SaveCandidateSort(_) => "SAVE_CANDIDATE_SORT",
            Action::SaveCountries(_) => "SAVE_COUNTRIES",
            Action::SetTheme(_) => "SET_THEME",
        }
    }
}
