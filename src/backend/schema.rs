//! Request and response bodies exchanged with the to-do backend

use serde::{Deserialize, Serialize};

/// Body of the username uniqueness check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUserNameRequest {
    pub user_name: String,
}

/// Answer to a username uniqueness check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CheckUserNameResponse {
    pub exists: bool,
}

/// Credentials posted by the login form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Answer to a login attempt
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub valid: bool,
    /// Page the client should move to; only meaningful when `valid` is true
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Fields of a new account, posted form-encoded to the signup page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupSubmission {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub user_name: String,
    pub password: String,
}

impl SignupSubmission {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("first_name", self.first_name.clone()),
            ("middle_name", self.middle_name.clone()),
            ("last_name", self.last_name.clone()),
            ("user_name", self.user_name.clone()),
            ("password", self.password.clone()),
        ]
    }
}

/// A created or edited task, posted form-encoded to the create/update page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSubmission {
    /// Set when editing an existing task
    pub todo_id: Option<u32>,
    pub title: String,
    /// Formatted as `%Y-%m-%dT%H:%M`
    pub due_time: String,
}

impl TaskSubmission {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("due_time", self.due_time.clone()),
        ]
    }
}
