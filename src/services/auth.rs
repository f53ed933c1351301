// ============================================================================
// AUTH SERVICE - Login, signup, logout and account changes
// ============================================================================
// Each call validates first (one alert, nothing sent on failure), then hands
// back a prepared request whose success path updates the store.
// ============================================================================

use serde::Serialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::GENERIC_ERROR_MESSAGE;
use crate::models::auth::{ChangePasswordRequest, ChangeUsernameRequest};
use crate::models::{LoginRequest, LoginResponse, SignupRequest, User};
use crate::services::cookies::{
    clear_session_cookies, get_cookie, set_cookie, COOKIE_AUTH, COOKIE_CONSENT,
    COOKIE_REMEMBER, CONSENT_HOURS,
};
use crate::services::request::{PreparedRequest, RequestOptions};
use crate::state::Action;
use crate::validation::{self, LoginForm, PasswordChangeForm, SignupForm};

const SESSION_HOURS: i64 = 24;
const REMEMBER_HOURS: i64 = 24 * 30;

const NOT_SIGNED_IN: &str = "You need to be logged in to do that.";

pub fn login(ctx: &AppContext, form: &LoginForm, remember: bool) -> Option<PreparedRequest> {
    if !validation::is_valid_login(form, ctx.cookies(), ctx.alerts()) {
        return None;
    }

    let body = request_body(
        ctx,
        LoginRequest {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
            remember,
        },
    )?;

    log::info!("🔐 [AUTH] Logging in as {}", form.username.trim());
    let ctx_cb = ctx.clone();
    let options = RequestOptions::post(ctx.client().config().api_url("/api/v1/users/login"), body)
        .weak_auth(&ctx.client().config().api_key)
        .on_success(move |data| {
            if let Some(user) = save_session(&ctx_cb, data, remember) {
                ctx_cb.alerts().success(format!("Welcome back, {}!", user.firstname));
            }
        });
    Some(ctx.client().issue(options))
}

pub fn signup(ctx: &AppContext, form: &SignupForm) -> Option<PreparedRequest> {
    if !validation::is_valid_signup(form, ctx.alerts()) {
        return None;
    }

    let body = request_body(
        ctx,
        SignupRequest {
            firstname: form.firstname.trim().to_string(),
            lastname: form.lastname.trim().to_string(),
            email: form.email.trim().to_string(),
            username: form.username.trim().to_string(),
            password: form.password1.clone(),
        },
    )?;

    log::info!("📝 [AUTH] Signing up {}", form.username.trim());
    let ctx_cb = ctx.clone();
    let options = RequestOptions::post(ctx.client().config().api_url("/api/v1/users"), body)
        .weak_auth(&ctx.client().config().api_key)
        .on_success(move |data| {
            if let Some(user) = save_session(&ctx_cb, data, false) {
                ctx_cb.alerts().success(format!(
                    "Welcome to #WOKEWeekly, {}! Check your inbox to verify your account.",
                    user.firstname
                ));
            }
        });
    Some(ctx.client().issue(options))
}

/// JSON body for a request; an encoding failure alerts like any other failure
fn request_body<T: Serialize>(ctx: &AppContext, body: T) -> Option<Value> {
    match serde_json::to_value(body) {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("❌ [AUTH] Could not encode request body: {}", e);
            ctx.alerts().error(GENERIC_ERROR_MESSAGE);
            None
        }
    }
}

/// Stores the user returned by login/signup and marks the session alive
fn save_session(ctx: &AppContext, data: Value, remember: bool) -> Option<User> {
    let mut payload = match serde_json::from_value::<LoginResponse>(data) {
        Ok(response) => response.into_payload(),
        Err(e) => {
            log::error!("❌ [AUTH] Unexpected login response: {}", e);
            ctx.alerts().error(GENERIC_ERROR_MESSAGE);
            return None;
        }
    };
    payload.remember = remember;

    ctx.store().dispatch(Action::SaveUser(payload));

    let hours = if remember { REMEMBER_HOURS } else { SESSION_HOURS };
    let mut cookie_result = set_cookie(ctx.cookies(), COOKIE_AUTH, "true", hours);
    if remember {
        cookie_result = cookie_result.and(set_cookie(ctx.cookies(), COOKIE_REMEMBER, "true", hours));
    }
    if let Err(e) = cookie_result {
        log::warn!("⚠️ [AUTH] Could not write session cookies: {}", e);
    }

    let user = ctx.store().with_state(|s| s.user.clone());
    log::info!("✅ [AUTH] Signed in as {} (clearance {})", user.username, user.clearance);
    Some(user)
}

pub fn logout(ctx: &AppContext) {
    ctx.store().dispatch(Action::ClearUser);
    clear_session_cookies(ctx.cookies());
    log::info!("👋 [AUTH] Logged out");
}

/// Startup check: a stored user without a live session cookie (and who did
/// not ask to be remembered) is signed out. Returns whether a user remains.
pub fn check_session_liveness(ctx: &AppContext) -> bool {
    let user = ctx.store().with_state(|s| s.user.clone());
    if !user.is_authenticated {
        return false;
    }

    let alive = !get_cookie(ctx.cookies(), COOKIE_AUTH).is_empty()
        || (user.remember && !get_cookie(ctx.cookies(), COOKIE_REMEMBER).is_empty());
    if !alive {
        log::info!("⌛ [AUTH] Session cookie gone, clearing stored user");
        ctx.store().dispatch(Action::ClearUser);
    }
    alive
}

pub fn accept_cookies(ctx: &AppContext) {
    if let Err(e) = set_cookie(ctx.cookies(), COOKIE_CONSENT, "true", CONSENT_HOURS) {
        log::warn!("⚠️ [AUTH] Could not store cookie consent: {}", e);
    }
}

fn signed_in_user(ctx: &AppContext) -> Option<User> {
    let user = ctx.store().with_state(|s| s.user.clone());
    if user.is_authenticated {
        Some(user)
    } else {
        ctx.alerts().error(NOT_SIGNED_IN);
        None
    }
}

pub fn change_username(ctx: &AppContext, username: &str) -> Option<PreparedRequest> {
    let user = signed_in_user(ctx)?;
    let username = username.trim().to_string();
    if !validation::is_valid_username(&username, ctx.alerts()) {
        return None;
    }

    let body = request_body(
        ctx,
        ChangeUsernameRequest {
            username: username.clone(),
        },
    )?;
    let url = ctx
        .client()
        .config()
        .api_url(&format!("/api/v1/users/{}/username", user.id));

    let ctx_cb = ctx.clone();
    let options = RequestOptions::put(url, body).on_success(move |_| {
        ctx_cb.store().dispatch(Action::ChangeUsername(username.clone()));
        ctx_cb
            .alerts()
            .success(format!("Your username has been changed to {}.", username));
    });
    Some(ctx.client().issue(options))
}

pub fn change_password(ctx: &AppContext, form: &PasswordChangeForm) -> Option<PreparedRequest> {
    let user = signed_in_user(ctx)?;
    if !validation::is_valid_new_password(form, ctx.alerts()) {
        return None;
    }

    let body = request_body(
        ctx,
        ChangePasswordRequest {
            old_password: form.old_password.clone(),
            new_password: form.password1.clone(),
        },
    )?;
    let url = ctx
        .client()
        .config()
        .api_url(&format!("/api/v1/users/{}/password", user.id));

    let alerts = ctx.alerts().clone();
    let options = RequestOptions::put(url, body)
        .on_success(move |_| {
            alerts.success("You've successfully changed your password.");
        });
    Some(ctx.client().issue(options))
}

/// Confirms the emailed verification token and raises the user's clearance
pub fn verify_account(ctx: &AppContext, token: &str) -> Option<PreparedRequest> {
    signed_in_user(ctx)?;
    let url = ctx.client().config().api_url("/api/v1/users/verify");

    let ctx_cb = ctx.clone();
    let options = RequestOptions::post(url, json!({}))
        .strong_auth(token)
        .on_success(move |_| {
            ctx_cb.store().dispatch(Action::VerifyUser);
            ctx_cb.alerts().success("Thank you for verifying your account.");
        });
    Some(ctx.client().issue(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertKind, UserPayload};
    use crate::services::cookies::remove_cookie;
    use crate::services::request::Method;
    use crate::testing::{json_response, Harness};

    fn consenting() -> Harness {
        let harness = Harness::new();
        accept_cookies(&harness.context);
        harness
    }

    fn credentials() -> LoginForm {
        LoginForm {
            username: "ada".into(),
            password: "secret".into(),
        }
    }

    fn signed_in(harness: &Harness) {
        harness.store.dispatch(Action::SaveUser(UserPayload {
            id: 4,
            firstname: "Ada".into(),
            lastname: "Obi".into(),
            username: "ada".into(),
            clearance: 1,
            ..Default::default()
        }));
    }

    #[tokio::test]
    async fn login_saves_user_and_sets_cookies() {
        let harness = consenting();
        harness.transport.respond(json_response(
            200,
            json!({"user": {"id": 4, "firstname": "Ada", "lastname": "Obi", "username": "ada", "clearance": 3}, "token": "t"}),
        ));

        login(&harness.context, &credentials(), true)
            .expect("form is valid")
            .run()
            .await;

        let user = harness.store.state().user;
        assert!(user.is_authenticated);
        assert!(user.remember);
        assert_eq!(user.fullname, "Ada Obi");
        assert_eq!(get_cookie(&harness.cookies, COOKIE_AUTH), "true");
        assert_eq!(get_cookie(&harness.cookies, COOKIE_REMEMBER), "true");

        let sent = harness.transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.header("Authorization"), Some("test-key"));
        assert!(sent.url.ends_with("/api/v1/users/login"));

        let messages = harness.alerts.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind, AlertKind::Success);
    }

    #[tokio::test]
    async fn invalid_login_sends_nothing() {
        let harness = Harness::new();
        assert!(login(&harness.context, &credentials(), false).is_none());
        assert!(harness.transport.requests().is_empty());
        assert_eq!(harness.alerts.messages().len(), 1);
    }

    #[tokio::test]
    async fn failed_login_leaves_user_anonymous() {
        let harness = consenting();
        harness.transport.respond(json_response(
            401,
            json!({"message": "The username and password combination is incorrect."}),
        ));
        login(&harness.context, &credentials(), false)
            .unwrap()
            .run()
            .await;
        assert_eq!(harness.store.state().user, User::anonymous());
        assert_eq!(
            harness.alerts.messages()[0].text,
            "The username and password combination is incorrect."
        );
    }

    #[tokio::test]
    async fn signup_logs_the_new_user_in() {
        let harness = Harness::new();
        harness.transport.respond(json_response(
            201,
            json!({"id": 10, "firstname": "Kemi", "lastname": "A", "username": "kemi", "clearance": 1}),
        ));
        let form = SignupForm {
            firstname: "Kemi".into(),
            lastname: "A".into(),
            email: "kemi@example.com".into(),
            username: "kemi".into(),
            password1: "secret".into(),
            password2: "secret".into(),
            privacy_accepted: true,
        };
        signup(&harness.context, &form).unwrap().run().await;

        let user = harness.store.state().user;
        assert!(user.is_authenticated);
        assert!(!user.is_verified);
        let sent: Value = serde_json::from_str(
            harness.transport.last_request().unwrap().body.as_deref().unwrap(),
        )
        .unwrap();
        assert_eq!(sent["password"], "secret");
        assert!(sent.get("password2").is_none());
    }

    #[test]
    fn logout_clears_user_and_cookies() {
        let harness = Harness::new();
        signed_in(&harness);
        set_cookie(&harness.cookies, COOKIE_AUTH, "true", 1).unwrap();
        set_cookie(&harness.cookies, COOKIE_REMEMBER, "true", 1).unwrap();

        logout(&harness.context);

        assert_eq!(harness.store.state().user, User::anonymous());
        assert_eq!(get_cookie(&harness.cookies, COOKIE_AUTH), "");
        assert_eq!(get_cookie(&harness.cookies, COOKIE_REMEMBER), "");
    }

    #[test]
    fn unencodable_body_alerts_instead_of_failing_silently() {
        let harness = Harness::new();
        let mut keyed = std::collections::BTreeMap::new();
        keyed.insert(vec![1u8], 1u8);

        assert_eq!(request_body(&harness.context, keyed), None);
        let messages = harness.alerts.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind, AlertKind::Error);
        assert_eq!(messages[0].text, GENERIC_ERROR_MESSAGE);
        assert!(harness.transport.requests().is_empty());
    }

    #[test]
    fn liveness_check_drops_stale_sessions() {
        let harness = Harness::new();
        assert!(!check_session_liveness(&harness.context));

        signed_in(&harness);
        set_cookie(&harness.cookies, COOKIE_AUTH, "true", 1).unwrap();
        assert!(check_session_liveness(&harness.context));

        remove_cookie(&harness.cookies, COOKIE_AUTH).unwrap();
        assert!(!check_session_liveness(&harness.context));
        assert_eq!(harness.store.state().user, User::anonymous());
    }

    #[tokio::test]
    async fn change_username_updates_store_after_server_confirms() {
        let harness = Harness::new();
        signed_in(&harness);
        harness.transport.respond(json_response(200, json!({})));

        let prepared = change_username(&harness.context, "ada_new").unwrap();
        assert_eq!(harness.store.state().user.username, "ada");
        prepared.run().await;

        assert_eq!(harness.store.state().user.username, "ada_new");
        assert!(harness
            .transport
            .last_request()
            .unwrap()
            .url
            .ends_with("/api/v1/users/4/username"));
    }

    #[test]
    fn account_changes_require_a_signed_in_user() {
        let harness = Harness::new();
        assert!(change_username(&harness.context, "someone").is_none());
        assert_eq!(harness.alerts.messages()[0].text, NOT_SIGNED_IN);
    }

    #[tokio::test]
    async fn verify_account_raises_clearance() {
        let harness = Harness::new();
        signed_in(&harness);
        harness.transport.respond(json_response(200, json!(null)));

        verify_account(&harness.context, "emailed-token")
            .unwrap()
            .run()
            .await;

        let user = harness.store.state().user;
        assert!(user.is_verified);
        assert_eq!(
            harness.transport.last_request().unwrap().header("Authorization"),
            Some("Bearer emailed-token")
        );
    }

    #[tokio::test]
    async fn change_password_rejects_reuse_locally() {
        let harness = Harness::new();
        signed_in(&harness);
        let form = PasswordChangeForm {
            old_password: "secret".into(),
            password1: "secret".into(),
            password2: "secret".into(),
        };
        assert!(change_password(&harness.context, &form).is_none());
        assert!(harness.transport.requests().is_empty());

        harness.transport.respond(json_response(200, json!({})));
        let form = PasswordChangeForm {
            password1: "fresh1".into(),
            password2: "fresh1".into(),
            ..form
        };
        change_password(&harness.context, &form).unwrap().run().await;
        assert_eq!(
            harness.alerts.messages().last().unwrap().kind,
            AlertKind::Success
        );
    }
}
