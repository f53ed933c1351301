//! Clearance levels. A plain ordered scale: every check is `clearance >= threshold`.

pub type Clearance = u8;

pub const GUEST: Clearance = 0;
pub const UNVERIFIED: Clearance = 1;
pub const VERIFIED: Clearance = 2;
pub const CONTRIBUTOR: Clearance = 4;
pub const EXECUTIVE: Clearance = 6;
pub const ADMIN: Clearance = 8;

/// Minimum clearance per administrative capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewAccount,
    WriteArticles,
    ManageSessions,
    ManageTopics,
    ManageReviews,
    ManageCandidates,
    ManageMembers,
    ManageUsers,
}

impl Capability {
    pub fn threshold(self) -> Clearance {
        match self {
            Capability::ViewAccount => UNVERIFIED,
            Capability::WriteArticles => CONTRIBUTOR,
            Capability::ManageSessions
            | Capability::ManageTopics
            | Capability::ManageReviews => EXECUTIVE,
            Capability::ManageCandidates | Capability::ManageMembers => EXECUTIVE,
            Capability::ManageUsers => ADMIN,
        }
    }
}

pub fn is_verified(clearance: Clearance) -> bool {
    clearance > UNVERIFIED
}

pub fn can(clearance: Clearance, capability: Capability) -> bool {
    clearance >= capability.threshold()
}
