// ============================================================================
// FORMS - Candidate values submitted by the site's forms
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A file picked in an `<input type="file">`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    /// Username or email address.
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupForm {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub username: String,
    pub password1: String,
    pub password2: String,
    pub privacy_accepted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordChangeForm {
    pub old_password: String,
    pub password1: String,
    pub password2: String,
}

/// #BlackExcellence candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateForm {
    pub name: String,
    pub birthday: Option<NaiveDate>,
    pub occupation: String,
    pub ethnicity: String,
    pub image: Option<FileUpload>,
}

/// Team member profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberForm {
    pub firstname: String,
    pub lastname: String,
    pub level: String,
    pub role: String,
    pub birthday: Option<NaiveDate>,
    pub image: Option<FileUpload>,
}

/// Topic poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicForm {
    pub headline: String,
    pub category: String,
    pub question: String,
    pub topic_type: String,
    /// Polar topics are yes/no style and need both options.
    pub polarity: bool,
    pub option1: String,
    pub option2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionForm {
    pub title: String,
    pub date_held: Option<NaiveDate>,
    pub description: String,
    pub image: Option<FileUpload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewForm {
    pub referee: String,
    pub rating: u8,
    pub description: String,
    pub image: Option<FileUpload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleForm {
    pub title: String,
    pub content: String,
    pub status: String,
    pub cover_image: Option<FileUpload>,
}
