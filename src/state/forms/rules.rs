//! Field rules
//!
//! Each rule is a pure function from a field value (plus whatever context it
//! needs) to a [`FieldCheck`]. The forms own the resulting flags; nothing
//! here keeps state.

use chrono::{Duration, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::form_state::FormMode;

pub const TITLE_MAX_LEN: usize = 100;
pub const NAME_MAX_LEN: usize = 20;
pub const USER_NAME_MIN_LEN: usize = 5;
pub const USER_NAME_MAX_LEN: usize = 40;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Slack given to a due time in create mode
pub const DUE_TIME_GRACE_SECS: i64 = 60;

/// Due-time format understood by the backend
pub const DUE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DUE_TIME_INPUT_FORMATS: [&str; 3] = [DUE_TIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

pub const REQUIRED: &str = "*required";
pub const DUE_BEFORE_CREATED: &str = "*Due time must be greater than the created time of the todo";
pub const DUE_IN_PAST: &str = "*Due time must be greater than current time";
pub const USER_NAME_TAKEN: &str = "Username already taken!";
pub const USER_NAME_AVAILABLE: &str = "Username available!";
pub const USER_NAME_CHECKING: &str = "Checking availability...";
pub const PASSWORD_LENGTH_RULE: &str = "Password must be at least 8 characters long.";
pub const PASSWORD_COMPLEXITY_RULE: &str =
    "Password must contain at least 1 lowercase letter, 1 uppercase letter, 1 special character and 1 digit.";
pub const PASSWORDS_MATCH_RULE: &str = "password and confirm password must match";

const PASS_MARK: &str = "✅";
const FAIL_MARK: &str = "❌";

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid name pattern"));

/// Minimum length plus one pattern per required character class
static PASSWORD_RES: Lazy<[Regex; 5]> = Lazy::new(|| {
    [r"^.{8,}$", r"[a-z]", r"[A-Z]", r"[0-9]", r"[^A-Za-z0-9]"]
        .map(|pattern| Regex::new(pattern).expect("valid password pattern"))
});

/// How a field message is coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Danger,
}

/// Outcome of running a rule against a field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub valid: bool,
    /// Empty when nothing should be shown
    pub message: String,
    pub tone: Tone,
}

impl FieldCheck {
    pub fn ok(message: impl Into<String>, tone: Tone) -> Self {
        Self {
            valid: true,
            message: message.into(),
            tone,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            tone: Tone::Danger,
        }
    }

    /// A result with no visible message
    pub fn hidden(valid: bool) -> Self {
        Self {
            valid,
            message: String::new(),
            tone: if valid { Tone::Neutral } else { Tone::Danger },
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.message.is_empty()
    }
}

/// Both password sub-checks, shown side by side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCheck {
    pub length: FieldCheck,
    pub complexity: FieldCheck,
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn marked(passed: bool, rule: &str) -> FieldCheck {
    if passed {
        FieldCheck::ok(format!("{PASS_MARK} {rule}"), Tone::Success)
    } else {
        FieldCheck::invalid(format!("{FAIL_MARK} {rule}"))
    }
}

/// Task title: `0 < trimmed length <= 100`
pub fn check_title(title: &str) -> FieldCheck {
    let len = char_len(title.trim());
    if len > 0 && len <= TITLE_MAX_LEN {
        FieldCheck::ok(format!("{len}/{TITLE_MAX_LEN}"), Tone::Neutral)
    } else {
        FieldCheck::invalid(REQUIRED)
    }
}

pub fn parse_due_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DUE_TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Due time against the creation time (update) or the current time (create)
pub fn check_due_time(raw: &str, mode: &FormMode, now: NaiveDateTime) -> FieldCheck {
    let due = parse_due_time(raw);
    match mode {
        FormMode::Update { created_time, .. } => match due {
            Some(due) if due >= *created_time => FieldCheck::hidden(true),
            _ => FieldCheck::invalid(DUE_BEFORE_CREATED),
        },
        FormMode::Create => match due {
            Some(due) if due + Duration::seconds(DUE_TIME_GRACE_SECS) >= now => {
                FieldCheck::hidden(true)
            }
            _ => FieldCheck::invalid(DUE_IN_PAST),
        },
    }
}

/// Trim and lower-case a name the way it is stored
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Name field: letters only, at most 20 characters, optionally required.
/// Every failing rule contributes one line to the message.
pub fn check_name(value: &str, placeholder: &str, required: bool) -> FieldCheck {
    let mut problems = Vec::new();

    if required && value.is_empty() {
        problems.push(REQUIRED.to_string());
    }
    if char_len(value) > NAME_MAX_LEN {
        problems.push(format!(
            "{placeholder} cannot be more than {NAME_MAX_LEN} characters"
        ));
    }
    if !value.is_empty() && !NAME_RE.is_match(value) {
        problems.push(format!("{placeholder} should contain only alphabets"));
    }

    if problems.is_empty() {
        FieldCheck::hidden(true)
    } else {
        FieldCheck::invalid(problems.join("\n"))
    }
}

/// Username emptiness and length; uniqueness is checked separately
pub fn check_user_name_length(value: &str, placeholder: &str) -> FieldCheck {
    let len = char_len(value);
    if len == 0 {
        FieldCheck::invalid(REQUIRED)
    } else if len < USER_NAME_MIN_LEN {
        FieldCheck::invalid(format!(
            "{placeholder} cannot be less than {USER_NAME_MIN_LEN} characters"
        ))
    } else if len > USER_NAME_MAX_LEN {
        FieldCheck::invalid(format!(
            "{placeholder} cannot be more than {USER_NAME_MAX_LEN} characters"
        ))
    } else {
        FieldCheck::hidden(true)
    }
}

/// Result of the uniqueness query
pub fn check_user_name_availability(exists: bool) -> FieldCheck {
    if exists {
        FieldCheck::invalid(USER_NAME_TAKEN)
    } else {
        FieldCheck::ok(USER_NAME_AVAILABLE, Tone::Success)
    }
}

pub fn password_matches_complexity(password: &str) -> bool {
    PASSWORD_RES.iter().all(|re| re.is_match(password))
}

/// Password length and complexity. An empty password only reports `*required`.
pub fn check_password(password: &str) -> PasswordCheck {
    if password.is_empty() {
        return PasswordCheck {
            length: FieldCheck::invalid(REQUIRED),
            complexity: FieldCheck::hidden(false),
        };
    }

    PasswordCheck {
        length: marked(char_len(password) >= PASSWORD_MIN_LEN, PASSWORD_LENGTH_RULE),
        complexity: marked(password_matches_complexity(password), PASSWORD_COMPLEXITY_RULE),
    }
}

/// Confirmation is only judged once the password itself is valid
pub fn check_confirm_password(password: &str, confirm: &str, password_valid: bool) -> FieldCheck {
    if !password_valid || confirm.is_empty() {
        return FieldCheck::hidden(false);
    }
    marked(password == confirm, PASSWORDS_MATCH_RULE)
}

/// Non-empty check used by the login form
pub fn check_required(value: &str) -> FieldCheck {
    if value.is_empty() {
        FieldCheck::invalid(REQUIRED)
    } else {
        FieldCheck::hidden(true)
    }
}
