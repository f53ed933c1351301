// ============================================================================
// REDUCERS - One pure function per slice: (&state, &action) -> new state
// ============================================================================

use crate::models::clearance::{self, VERIFIED};
use crate::models::{
    CandidatePreferences, Country, SessionPreferences, Theme, TopicPreferences, User,
};
use crate::state::action::Action;

pub fn user_reducer(state: &User, action: &Action) -> User {
    match action {
        Action::SaveUser(payload) => User::from_payload(payload.clone()),
        Action::ClearUser => User::anonymous(),
        Action::VerifyUser if state.is_authenticated => {
            let clearance = state.clearance.max(VERIFIED);
            User {
                clearance,
                is_verified: clearance::is_verified(clearance),
                ..state.clone()
            }
        }
        Action::ChangeUsername(username) if state.is_authenticated => User {
            username: username.clone(),
            ..state.clone()
        },
        _ => state.clone(),
    }
}

pub fn session_reducer(state: &SessionPreferences, action: &Action) -> SessionPreferences {
    match action {
        Action::SaveSessionSort(sort) => SessionPreferences {
            sort: *sort,
            ..state.clone()
        },
        Action::SaveSessionView(view) => SessionPreferences {
            view: *view,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

pub fn topic_reducer(state: &TopicPreferences, action: &Action) -> TopicPreferences {
    match action {
        Action::SaveTopicSort(sort) => TopicPreferences { sort: *sort },
        _ => state.clone(),
    }
}

pub fn candidate_reducer(state: &CandidatePreferences, action: &Action) -> CandidatePreferences {
    match action {
        Action::SaveCandidateSort(sort) => CandidatePreferences { sort: *sort },
        _ => state.clone(),
    }
}

pub fn countries_reducer(
    state: &Option<Vec<Country>>,
    action: &Action,
) -> Option<Vec<Country>> {
    match action {
        Action::SaveCountries(countries) => Some(countries.clone()),
        _ => state.clone(),
    }
}

pub fn theme_reducer(state: &Theme, action: &Action) -> Theme {
    match action {
        Action::SetTheme(theme) => *theme,
        _ => *state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionSort, SessionView, UserPayload};

    fn saved(clearance: u8) -> User {
        user_reducer(
            &User::anonymous(),
            &Action::SaveUser(UserPayload {
                id: 1,
                firstname: "A".into(),
                lastname: "B".into(),
                username: "ab".into(),
                clearance,
                remember: true,
                token: Some("tok".into()),
            }),
        )
    }

    #[test]
    fn save_user_authenticates_and_derives_fields() {
        let user = saved(3);
        assert_eq!(user.fullname, "A B");
        assert!(user.is_authenticated);
        assert!(user.is_verified);
    }

    #[test]
    fn clear_user_returns_exact_anonymous_default() {
        let cleared = user_reducer(&saved(8), &Action::ClearUser);
        assert_eq!(cleared, User::anonymous());
        assert_eq!(cleared.token, None);
    }

    #[test]
    fn verify_user_raises_clearance_only_when_authenticated() {
        let verified = user_reducer(&saved(1), &Action::VerifyUser);
        assert_eq!(verified.clearance, VERIFIED);
        assert!(verified.is_verified);

        let admin = user_reducer(&saved(8), &Action::VerifyUser);
        assert_eq!(admin.clearance, 8);

        let anonymous = user_reducer(&User::anonymous(), &Action::VerifyUser);
        assert_eq!(anonymous, User::anonymous());
    }

    #[test]
    fn change_username_keeps_identity() {
        let before = saved(2);
        let after = user_reducer(&before, &Action::ChangeUsername("newname".into()));
        assert_eq!(after.username, "newname");
        assert_eq!(after.id, before.id);
        assert_eq!(after.fullname, before.fullname);

        let anonymous = user_reducer(&User::anonymous(), &Action::ChangeUsername("x".into()));
        assert_eq!(anonymous.username, "");
    }

    #[test]
    fn unrelated_actions_leave_slices_unchanged() {
        let prefs = SessionPreferences {
            sort: SessionSort::OldestFirst,
            view: SessionView::List,
        };
        assert_eq!(session_reducer(&prefs, &Action::ClearUser), prefs);
        assert_eq!(theme_reducer(&Theme::Dark, &Action::VerifyUser), Theme::Dark);
        let user = saved(2);
        assert_eq!(user_reducer(&user, &Action::SetTheme(Theme::Dark)), user);
    }

    #[test]
    fn session_view_and_sort_are_independent() {
        let prefs = session_reducer(
            &SessionPreferences::default(),
            &Action::SaveSessionView(SessionView::List),
        );
        let prefs = session_reducer(&prefs, &Action::SaveSessionSort(SessionSort::TitleAscending));
        assert_eq!(prefs.view, SessionView::List);
        assert_eq!(prefs.sort, SessionSort::TitleAscending);
    }
}
