// ============================================================================
// SESSION - Signed-in user as held by the store
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::clearance::{self, Clearance};

/// What the server hands back on login/signup; the store derives the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub clearance: Clearance,
    #[serde(default)]
    pub remember: bool,
    #[serde(default)]
    pub token: Option<String>,
}

/// The `user` slice of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub firstname: String,
    pub lastname: String,
    pub fullname: String,
    pub username: String,
    pub clearance: Clearance,
    pub is_authenticated: bool,
    pub is_verified: bool,
    pub remember: bool,
    pub token: Option<String>,
}

impl User {
    /// Anonymous visitor. Also the state after logout or an expired session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Builds an authenticated user, deriving `fullname` and `is_verified`
    pub fn from_payload(payload: UserPayload) -> Self {
        Self {
            id: payload.id,
            fullname: full_name(&payload.firstname, &payload.lastname),
            is_verified: clearance::is_verified(payload.clearance),
            firstname: payload.firstname,
            lastname: payload.lastname,
            username: payload.username,
            clearance: payload.clearance,
            is_authenticated: true,
            remember: payload.remember,
            token: payload.token,
        }
    }

    /// Recomputes the derived fields of a user read back from storage.
    /// Anything not authenticated collapses to the anonymous visitor.
    pub fn rederive(self) -> Self {
        if !self.is_authenticated {
            return Self::anonymous();
        }
        Self {
            fullname: full_name(&self.firstname, &self.lastname),
            is_verified: clearance::is_verified(self.clearance),
            ..self
        }
    }

    /// Value attached to the `Authorization` header for this user
    pub fn bearer(&self) -> Option<String> {
        if !self.is_authenticated {
            return None;
        }
        match &self.token {
            Some(token) if !token.is_empty() => Some(token.clone()),
            _ => Some(self.id.to_string()),
        }
    }

    /// Capability check against a clearance threshold
    pub fn has_clearance(&self, threshold: Clearance) -> bool {
        self.is_authenticated && self.clearance >= threshold
    }
}

fn full_name(firstname: &str, lastname: &str) -> String {
    format!("{} {}", firstname, lastname).trim().to_string()
}
