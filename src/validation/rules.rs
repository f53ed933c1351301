// ============================================================================
// RULES - Pure checks. Every violation, in the fixed per-form order.
// ============================================================================
// Within one field the checks chain (an empty password is not also "too
// short"); across fields violations accumulate.
// ============================================================================

use regex::Regex;

use crate::validation::forms::*;

pub const MIN_PASSWORD_LENGTH: usize = 5;
pub const MAX_USERNAME_LENGTH: usize = 15;
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
pub const MAX_RATING: u8 = 5;

pub const CONSENT_REQUIRED: &str = "You must accept our cookie policy before logging in.";

lazy_static::lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("email pattern compiles");
    static ref USERNAME_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9_.]+$")
        .expect("username pattern compiles");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(out: &mut Vec<Violation>, field: &'static str, value: &str, message: &str) -> bool {
    if is_blank(value) {
        out.push(Violation::new(field, message));
        return false;
    }
    true
}

pub fn check_login(form: &LoginForm, consent_given: bool) -> Vec<Violation> {
    let mut out = Vec::new();
    if !consent_given {
        out.push(Violation::new("cookies", CONSENT_REQUIRED));
    }
    require(&mut out, "username", &form.username, "Enter your username or email address.");
    require(&mut out, "password", &form.password, "Enter your password.");
    out
}

pub fn check_email(email: &str) -> Vec<Violation> {
    let mut out = Vec::new();
    if require(&mut out, "email", email, "Enter your email address.")
        && !EMAIL_PATTERN.is_match(email.trim())
    {
        out.push(Violation::new("email", "Enter a valid email address."));
    }
    out
}

pub fn check_username(username: &str) -> Vec<Violation> {
    let mut out = Vec::new();
    if !require(&mut out, "username", username, "Enter a username.") {
        return out;
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        out.push(Violation::new(
            "username",
            format!("Your username must be {} characters or fewer.", MAX_USERNAME_LENGTH),
        ));
    } else if !USERNAME_PATTERN.is_match(username) {
        out.push(Violation::new(
            "username",
            "Your username may only contain letters, numbers, underscores and full stops.",
        ));
    }
    out
}

pub fn check_password(password1: &str, password2: &str) -> Vec<Violation> {
    let mut out = Vec::new();
    if password1.is_empty() {
        out.push(Violation::new("password", "Enter a password."));
    } else if password1.chars().count() < MIN_PASSWORD_LENGTH {
        out.push(Violation::new(
            "password",
            format!("Your password must be at least {} characters.", MIN_PASSWORD_LENGTH),
        ));
    } else if password1 != password2 {
        out.push(Violation::new("password", "Your passwords do not match."));
    }
    out
}

pub fn check_new_password(form: &PasswordChangeForm) -> Vec<Violation> {
    let mut out = Vec::new();
    if form.old_password.is_empty() {
        out.push(Violation::new("oldPassword", "Enter your current password."));
    }
    let mut new_password = check_password(&form.password1, &form.password2);
    if new_password.is_empty() && form.password1 == form.old_password {
        new_password.push(Violation::new(
            "password",
            "Your new password must be different from your current password.",
        ));
    }
    out.extend(new_password);
    out
}

/// `entity` names what the file is for, e.g. "session" or "member"
pub fn check_file(file: Option<&FileUpload>, entity: &str) -> Vec<Violation> {
    match file {
        None => vec![Violation::new(
            "image",
            format!("Choose an image for the {}.", entity),
        )],
        Some(file) if file.size > MAX_FILE_SIZE => vec![Violation::new(
            "image",
            format!("The {} image must be 5MB or smaller.", entity),
        )],
        Some(_) => Vec::new(),
    }
}

pub fn check_signup(form: &SignupForm) -> Vec<Violation> {
    let mut out = Vec::new();
    require(&mut out, "firstname", &form.firstname, "Enter your first name.");
    require(&mut out, "lastname", &form.lastname, "Enter your last name.");
    out.extend(check_email(&form.email));
    out.extend(check_username(&form.username));
    out.extend(check_password(&form.password1, &form.password2));
    if !form.privacy_accepted {
        out.push(Violation::new(
            "privacy",
            "You must agree to our Privacy Policy before signing up.",
        ));
    }
    out
}

pub fn check_candidate(form: &CandidateForm) -> Vec<Violation> {
    let mut out = Vec::new();
    require(&mut out, "name", &form.name, "Enter the candidate's name.");
    if form.birthday.is_none() {
        out.push(Violation::new("birthday", "Select the candidate's date of birth."));
    }
    require(&mut out, "occupation", &form.occupation, "Enter the candidate's occupation.");
    require(&mut out, "ethnicity", &form.ethnicity, "Select the candidate's ethnicity.");
    out.extend(check_file(form.image.as_ref(), "candidate"));
    out
}

pub fn check_member(form: &MemberForm) -> Vec<Violation> {
    let mut out = Vec::new();
    require(&mut out, "firstname", &form.firstname, "Enter the member's first name.");
    require(&mut out, "lastname", &form.lastname, "Enter the member's last name.");
    require(&mut out, "level", &form.level, "Select the member's level.");
    require(&mut out, "role", &form.role, "Enter the member's role.");
    if form.birthday.is_none() {
        out.push(Violation::new("birthday", "Select the member's date of birth."));
    }
    out.extend(check_file(form.image.as_ref(), "member"));
    out
}

pub fn check_topic(form: &TopicForm) -> Vec<Violation> {
    let mut out = Vec::new();
    require(&mut out, "headline", &form.headline, "Enter the topic's headline.");
    require(&mut out, "category", &form.category, "Select the topic's category.");
    require(&mut out, "question", &form.question, "Enter the topic's question.");
    require(&mut out, "type", &form.topic_type, "Select the topic's type.");
    if form.polarity {
        require(&mut out, "option1", &form.option1, "Enter the first option of this polar topic.");
        require(&mut out, "option2", &form.option2, "Enter the second option of this polar topic.");
    }
    out
}

pub fn check_session(form: &SessionForm) -> Vec<Violation> {
    let mut out = Vec::new();
    require(&mut out, "title", &form.title, "Enter the session's title.");
    if form.date_held.is_none() {
        out.push(Violation::new("dateHeld", "Select the date the session was held."));
    }
    require(&mut out, "description", &form.description, "Enter a description of the session.");
    out.extend(check_file(form.image.as_ref(), "session"));
    out
}

pub fn check_review(form: &ReviewForm) -> Vec<Violation> {
    let mut out = Vec::new();
    require(&mut out, "referee", &form.referee, "Enter the referee's name.");
    if !(1..=MAX_RATING).contains(&form.rating) {
        out.push(Violation::new(
            "rating",
            format!("Give a rating between 1 and {}.", MAX_RATING),
        ));
    }
    require(&mut out, "description", &form.description, "Enter the review's description.");
    if form.image.is_some() {
        out.extend(check_file(form.image.as_ref(), "review"));
    }
    out
}

pub fn check_article(form: &ArticleForm) -> Vec<Violation> {
    let mut out = Vec::new();
    require(&mut out, "title", &form.title, "Enter the article's title.");
    require(&mut out, "content", &form.content, "Write the article's content.");
    require(&mut out, "status", &form.status, "Select the article's status.");
    out.extend(check_file(form.cover_image.as_ref(), "article"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn image(size: u64) -> Option<FileUpload> {
        Some(FileUpload {
            name: "cover.jpg".into(),
            size,
        })
    }

    #[test]
    fn email_pattern() {
        assert!(check_email("foo@bar.com").is_empty());
        assert_eq!(check_email("not-an-email")[0].message, "Enter a valid email address.");
        assert_eq!(check_email("a@b")[0].field, "email");
        assert_eq!(check_email("")[0].message, "Enter your email address.");
        assert_eq!(check_email("with space@bar.com").len(), 1);
    }

    #[test]
    fn password_rules_chain() {
        assert!(check_password("abcde", "abcde").is_empty());
        assert!(check_password("abcde", "abcdf")[0].message.contains("match"));
        assert!(check_password("ab", "ab")[0].message.contains("at least 5"));
        assert_eq!(check_password("", "").len(), 1);
    }

    #[test]
    fn new_password_must_differ_from_old() {
        let same = PasswordChangeForm {
            old_password: "secret1".into(),
            password1: "secret1".into(),
            password2: "secret1".into(),
        };
        assert!(check_new_password(&same)[0].message.contains("different"));

        let fine = PasswordChangeForm {
            password1: "secret2".into(),
            password2: "secret2".into(),
            ..same
        };
        assert!(check_new_password(&fine).is_empty());
    }

    #[test]
    fn username_length_and_characters() {
        assert!(check_username("woke_weekly.1").is_empty());
        assert_eq!(check_username("sixteen_chars_xx").len(), 1);
        assert!(check_username("bad name")[0].message.contains("only contain"));
    }

    #[test]
    fn file_presence_and_size() {
        assert!(check_file(image(MAX_FILE_SIZE).as_ref(), "session").is_empty());
        assert!(check_file(image(MAX_FILE_SIZE + 1).as_ref(), "session")[0]
            .message
            .contains("5MB"));
        assert_eq!(
            check_file(None, "member")[0].message,
            "Choose an image for the member."
        );
    }

    #[test]
    fn login_reports_consent_first() {
        let violations = check_login(&LoginForm::default(), false);
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["cookies", "username", "password"]);

        let ok = LoginForm {
            username: "ada".into(),
            password: "pw".into(),
        };
        assert!(check_login(&ok, true).is_empty());
    }

    #[test]
    fn signup_collects_every_violation_in_order() {
        let violations = check_signup(&SignupForm {
            email: "x".into(),
            password1: "abc".into(),
            password2: "abc".into(),
            ..Default::default()
        });
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec!["firstname", "lastname", "email", "username", "password", "privacy"]
        );
    }

    #[test]
    fn polar_topics_need_both_options() {
        let mut topic = TopicForm {
            headline: "h".into(),
            category: "c".into(),
            question: "q".into(),
            topic_type: "t".into(),
            polarity: true,
            option1: "Yes".into(),
            ..Default::default()
        };
        assert_eq!(check_topic(&topic)[0].field, "option2");
        topic.polarity = false;
        assert!(check_topic(&topic).is_empty());
    }

    #[test]
    fn review_rating_bounds_and_optional_image() {
        let mut review = ReviewForm {
            referee: "Tolu".into(),
            rating: 0,
            description: "Great".into(),
            image: None,
        };
        assert_eq!(check_review(&review)[0].field, "rating");
        review.rating = 5;
        assert!(check_review(&review).is_empty());
        review.image = image(MAX_FILE_SIZE * 2);
        assert_eq!(check_review(&review)[0].field, "image");
    }

    #[test]
    fn session_candidate_member_article_happy_paths() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 1);
        assert!(check_session(&SessionForm {
            title: "Mental Health".into(),
            date_held: date,
            description: "d".into(),
            image: image(10),
        })
        .is_empty());
        assert!(check_candidate(&CandidateForm {
            name: "Ada".into(),
            birthday: date,
            occupation: "Engineer".into(),
            ethnicity: "NG".into(),
            image: image(10),
        })
        .is_empty());
        assert!(check_member(&MemberForm {
            firstname: "A".into(),
            lastname: "B".into(),
            level: "Executive".into(),
            role: "Host".into(),
            birthday: date,
            image: image(10),
        })
        .is_empty());
        assert_eq!(
            check_article(&ArticleForm {
                title: "t".into(),
                content: "c".into(),
                status: "DRAFT".into(),
                cover_image: None,
            })[0]
                .field,
            "image"
        );
    }
}
