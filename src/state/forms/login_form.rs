//! Login form

use super::field::FormField;
use super::form_state::{Form, FormEffect, FormPhase};
use super::rules;
use crate::backend::{LoginRequest, LoginResponse};

const USER_NAME: usize = 0;
const PASSWORD: usize = 1;
const SUBMIT: usize = 2;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoginFlags {
    pub user_name: bool,
    pub password: bool,
}

/// Fields are only checked on submit; the button is always enabled
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub user_name: FormField,
    pub password: FormField,
    pub flags: LoginFlags,
    /// Set when the backend rejected the last credentials
    pub invalid_credentials: bool,
    pub active_field_index: usize,
    submitting: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            user_name: FormField::text("user_name", "Username"),
            password: FormField::secret("password", "Password"),
            flags: LoginFlags::default(),
            invalid_credentials: false,
            active_field_index: 0,
            submitting: false,
        }
    }

    /// Apply the backend's answer. Returns the redirect target on success.
    pub fn apply_response(&mut self, response: &LoginResponse) -> Option<String> {
        self.submitting = false;
        if response.valid {
            self.invalid_credentials = false;
            Some(response.redirect.clone().unwrap_or_default())
        } else {
            self.invalid_credentials = true;
            None
        }
    }

    /// The request never completed; the form goes back to editing
    pub fn request_failed(&mut self) {
        self.submitting = false;
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    fn title(&self) -> &str {
        "Log in"
    }

    fn submit_label(&self) -> &str {
        "Login"
    }

    fn field_count(&self) -> usize {
        3 // user name, password, submit
    }

    fn active_field(&self) -> usize {
        self.active_field_index
    }

    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT);
    }

    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            USER_NAME => Some(&self.user_name),
            PASSWORD => Some(&self.password),
            _ => None,
        }
    }

    fn get_field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        match index {
            USER_NAME => Some(&mut self.user_name),
            PASSWORD => Some(&mut self.password),
            _ => None,
        }
    }

    fn validate_field(&mut self, _index: usize) -> Option<FormEffect> {
        None
    }

    fn phase(&self) -> FormPhase {
        if self.submitting {
            FormPhase::Submitting
        } else {
            FormPhase::Submittable
        }
    }

    fn notice(&self) -> Option<&str> {
        self.invalid_credentials.then_some(INVALID_CREDENTIALS)
    }

    fn submit(&mut self) -> Option<FormEffect> {
        if self.submitting {
            return None;
        }

        let user_name = rules::check_required(self.user_name.as_text());
        let password = rules::check_required(self.password.as_text());
        self.flags = LoginFlags {
            user_name: user_name.valid,
            password: password.valid,
        };
        self.user_name.check = Some(user_name);
        self.password.check = Some(password);

        if !(self.flags.user_name && self.flags.password) {
            return None;
        }

        self.submitting = true;
        Some(FormEffect::Login(LoginRequest {
            user_name: self.user_name.as_text().to_string(),
            password: self.password.as_text().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled(user_name: &str, password: &str) -> LoginForm {
        let mut form = LoginForm::new();
        form.user_name.set_text(user_name.to_string());
        form.password.set_text(password.to_string());
        form
    }

    #[test]
    fn test_typing_does_not_validate() {
        let mut form = LoginForm::new();
        form.input_char('a');
        form.delete_char();
        form.next_field();
        assert!(form.user_name.check.is_none());
    }

    #[test]
    fn test_empty_password_issues_no_request() {
        let mut form = filled("alice", "");
        assert!(form.submit().is_none());
        assert!(form.flags.user_name);
        assert!(!form.flags.password);
        assert_eq!(form.password.check.as_ref().unwrap().message, "*required");
        assert!(!form.user_name.check.as_ref().unwrap().is_visible());
        assert_eq!(form.phase(), FormPhase::Submittable);
    }

    #[test]
    fn test_both_empty_marks_both_required() {
        let mut form = LoginForm::new();
        assert!(form.submit().is_none());
        assert_eq!(form.user_name.check.as_ref().unwrap().message, "*required");
        assert_eq!(form.password.check.as_ref().unwrap().message, "*required");
    }

    #[test]
    fn test_filled_form_builds_request() {
        let mut form = filled("alice", "Secret1!");
        let effect = form.submit();
        assert_eq!(
            effect,
            Some(FormEffect::Login(LoginRequest {
                user_name: "alice".to_string(),
                password: "Secret1!".to_string(),
            }))
        );
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert!(form.submit().is_none());
    }

    #[test]
    fn test_rejected_credentials_show_notice() {
        let mut form = filled("alice", "wrong");
        form.submit();
        let redirect = form.apply_response(&LoginResponse {
            valid: false,
            redirect: Some("login".to_string()),
        });
        assert!(redirect.is_none());
        assert_eq!(form.notice(), Some(INVALID_CREDENTIALS));
        assert_eq!(form.phase(), FormPhase::Submittable);
    }

    #[test]
    fn test_accepted_credentials_return_redirect() {
        let mut form = filled("alice", "Secret1!");
        form.submit();
        let redirect = form.apply_response(&LoginResponse {
            valid: true,
            redirect: Some("list".to_string()),
        });
        assert_eq!(redirect.as_deref(), Some("list"));
        assert!(form.notice().is_none());
    }

    #[test]
    fn test_request_failure_allows_retry() {
        let mut form = filled("alice", "Secret1!");
        form.submit();
        form.request_failed();
        assert!(form.submit().is_some());
    }
}
