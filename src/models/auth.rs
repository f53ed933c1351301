use serde::{Deserialize, Serialize};

use crate::models::session::UserPayload;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    /// Username or email address.
    pub username: String,
    pub password: String,
    pub remember: bool,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SignupRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ChangeUsernameRequest {
    pub username: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ChangePasswordRequest {
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Login/signup response body. The server may wrap the user or send it flat.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum LoginResponse {
    Wrapped {
        user: UserPayload,
        #[serde(default)]
        token: Option<String>,
    },
    Flat(UserPayload),
}

impl LoginResponse {
    pub fn into_payload(self) -> UserPayload {
        match self {
            LoginResponse::Wrapped { mut user, token } => {
                if token.is_some() {
                    user.token = token;
                }
                user
            }
            LoginResponse::Flat(user) => user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_response_carries_token_into_payload() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"user":{"id":7,"firstname":"Ada","lastname":"Obi","username":"ada","clearance":2},"token":"t0k"}"#,
        )
        .unwrap();
        let payload = response.into_payload();
        assert_eq!(payload.id, 7);
        assert_eq!(payload.token.as_deref(), Some("t0k"));
    }

    #[test]
    fn flat_response_is_accepted() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"id":3,"firstname":"Kemi","lastname":"A","clearance":1}"#)
                .unwrap();
        assert_eq!(response.into_payload().firstname, "Kemi");
    }
}
