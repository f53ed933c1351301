// ============================================================================
// VALIDATION - Form checks run before any request is sent
// ============================================================================
// `rules` finds every violation without side effects. The `is_valid_*`
// functions here show only the first one as an error alert and answer
// yes/no, which is what the forms need.
// ============================================================================

pub mod forms;
pub mod rules;

pub use forms::*;
pub use rules::Violation;

use crate::services::alerts::AlertChannel;
use crate::services::cookies::{check_cookies, CookieJar};

/// Alerts the first violation, if any. True when there was none.
pub fn report_first(violations: Vec<Violation>, alerts: &AlertChannel) -> bool {
    match violations.into_iter().next() {
        Some(violation) => {
            log::debug!("🚫 [VALIDATION] {}: {}", violation.field, violation.message);
            alerts.error(violation.message);
            false
        }
        None => true,
    }
}

pub fn is_valid_login(form: &LoginForm, cookies: &dyn CookieJar, alerts: &AlertChannel) -> bool {
    let consent_given = check_cookies(cookies, alerts, None);
    report_first(rules::check_login(form, consent_given), alerts)
}

pub fn is_valid_email(email: &str, alerts: &AlertChannel) -> bool {
    report_first(rules::check_email(email), alerts)
}

pub fn is_valid_username(username: &str, alerts: &AlertChannel) -> bool {
    report_first(rules::check_username(username), alerts)
}

pub fn is_valid_password(password1: &str, password2: &str, alerts: &AlertChannel) -> bool {
    report_first(rules::check_password(password1, password2), alerts)
}

pub fn is_valid_new_password(form: &PasswordChangeForm, alerts: &AlertChannel) -> bool {
    report_first(rules::check_new_password(form), alerts)
}

pub fn is_valid_file(file: Option<&FileUpload>, entity: &str, alerts: &AlertChannel) -> bool {
    report_first(rules::check_file(file, entity), alerts)
}

pub fn is_valid_signup(form: &SignupForm, alerts: &AlertChannel) -> bool {
    report_first(rules::check_signup(form), alerts)
}

pub fn is_valid_candidate(form: &CandidateForm, alerts: &AlertChannel) -> bool {
    report_first(rules::check_candidate(form), alerts)
}

pub fn is_valid_member(form: &MemberForm, alerts: &AlertChannel) -> bool {
    report_first(rules::check_member(form), alerts)
}

pub fn is_valid_topic(form: &TopicForm, alerts: &AlertChannel) -> bool {
    report_first(rules::check_topic(form), alerts)
}

pub fn is_valid_session(form: &SessionForm, alerts: &AlertChannel) -> bool {
    report_first(rules::check_session(form), alerts)
}

pub fn is_valid_review(form: &ReviewForm, alerts: &AlertChannel) -> bool {
    report_first(rules::check_review(form), alerts)
}

pub fn is_valid_article(form: &ArticleForm, alerts: &AlertChannel) -> bool {
    report_first(rules::check_article(form), alerts)
}
