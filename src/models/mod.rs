pub mod alert;
pub mod auth;
pub mod clearance;
pub mod country;
pub mod preferences;
pub mod session;

pub use alert::{AlertKind, AlertMessage};
pub use auth::{LoginRequest, LoginResponse, SignupRequest};
pub use clearance::{Capability, Clearance};
pub use country::Country;
pub use preferences::{
    CandidatePreferences, CandidateSort, SessionPreferences, SessionSort, SessionView, Theme,
    TopicPreferences, TopicSort,
};
pub use session::{User, UserPayload};
