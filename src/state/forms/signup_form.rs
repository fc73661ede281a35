//! Signup form
//!
//! Every field has its own rule and flag. Submit is enabled only when the
//! whole flag set holds and no uniqueness check is outstanding. Uniqueness
//! checks are numbered; an answer is applied only if it belongs to the most
//! recent check, so a slow "available" can never overwrite a newer "taken".

use super::field::FormField;
use super::form_state::{Form, FormEffect, FormPhase, UserNameCheck};
use super::rules::{self, FieldCheck, Tone, USER_NAME_CHECKING};
use crate::backend::SignupSubmission;

const FIRST_NAME: usize = 0;
const MIDDLE_NAME: usize = 1;
const LAST_NAME: usize = 2;
const USER_NAME: usize = 3;
const PASSWORD: usize = 4;
const CONFIRM_PASSWORD: usize = 5;
const SUBMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupFlags {
    pub first_name: bool,
    pub middle_name: bool,
    pub last_name: bool,
    pub user_name: bool,
    pub password_length: bool,
    pub password_regex: bool,
    pub confirm_password: bool,
}

impl SignupFlags {
    pub fn name(&self) -> bool {
        self.first_name && self.middle_name && self.last_name
    }

    pub fn password(&self) -> bool {
        self.password_length && self.password_regex
    }

    pub fn all(&self) -> bool {
        self.name() && self.user_name && self.password() && self.confirm_password
    }
}

impl Default for SignupFlags {
    /// Middle and last names are optional, so they start valid
    fn default() -> Self {
        Self {
            first_name: false,
            middle_name: true,
            last_name: true,
            user_name: false,
            password_length: false,
            password_regex: false,
            confirm_password: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub first_name: FormField,
    pub middle_name: FormField,
    pub last_name: FormField,
    pub user_name: FormField,
    pub password: FormField,
    pub confirm_password: FormField,
    /// Second password message, shown next to the length message
    pub password_complexity: Option<FieldCheck>,
    pub flags: SignupFlags,
    pub active_field_index: usize,
    /// Sequence number of the check we are waiting for
    pending_check: Option<u64>,
    last_check_seq: u64,
    /// Name the latest check was issued for
    checked_user_name: Option<String>,
    submitting: bool,
}

impl SignupForm {
    pub fn new() -> Self {
        Self {
            first_name: FormField::text("first_name", "First Name"),
            middle_name: FormField::text("middle_name", "Middle Name"),
            last_name: FormField::text("last_name", "Last Name"),
            user_name: FormField::text("user_name", "Username"),
            password: FormField::secret("password", "Password"),
            confirm_password: FormField::secret("confirm_password", "Confirm Password"),
            password_complexity: None,
            flags: SignupFlags::default(),
            active_field_index: 0,
            pending_check: None,
            last_check_seq: 0,
            checked_user_name: None,
            submitting: false,
        }
    }

    pub fn is_checking_user_name(&self) -> bool {
        self.pending_check.is_some()
    }

    fn validate_name(&mut self, index: usize) {
        let (field, required) = match index {
            FIRST_NAME => (&mut self.first_name, true),
            MIDDLE_NAME => (&mut self.middle_name, false),
            _ => (&mut self.last_name, false),
        };
        let normalized = rules::normalize_name(field.as_text());
        field.set_text(normalized);

        let check = rules::check_name(field.as_text(), &field.label, required);
        let valid = check.valid;
        field.check = Some(check);

        match index {
            FIRST_NAME => self.flags.first_name = valid,
            MIDDLE_NAME => self.flags.middle_name = valid,
            _ => self.flags.last_name = valid,
        }
    }

    /// Length rules apply at once; a length-valid name also gets a
    /// uniqueness check whose answer arrives later.
    fn validate_user_name(&mut self) -> Option<FormEffect> {
        let trimmed = self.user_name.as_text().trim().to_string();
        self.user_name.set_text(trimmed);

        let check = rules::check_user_name_length(self.user_name.as_text(), &self.user_name.label);
        if !check.valid {
            // Any answer still on its way is now irrelevant
            self.flags.user_name = false;
            self.pending_check = None;
            self.checked_user_name = None;
            self.user_name.check = Some(check);
            return None;
        }

        // Blur without edits: the last check (pending or answered) still stands
        if self.checked_user_name.as_deref() == Some(self.user_name.as_text()) {
            return None;
        }

        self.flags.user_name = true;
        self.checked_user_name = Some(self.user_name.as_text().to_string());
        self.last_check_seq += 1;
        let seq = self.last_check_seq;
        self.pending_check = Some(seq);
        self.user_name.check = Some(FieldCheck::ok(USER_NAME_CHECKING, Tone::Neutral));
        tracing::debug!(seq, "Issuing username check");

        Some(FormEffect::CheckUserName(UserNameCheck {
            seq,
            user_name: self.user_name.as_text().to_string(),
        }))
    }

    fn validate_password(&mut self) {
        let check = rules::check_password(self.password.as_text());
        self.flags.password_length = check.length.valid;
        self.flags.password_regex = check.complexity.valid;
        self.password.check = Some(check.length);
        self.password_complexity = Some(check.complexity);

        self.validate_confirm_password();
    }

    fn validate_confirm_password(&mut self) {
        let check = rules::check_confirm_password(
            self.password.as_text(),
            self.confirm_password.as_text(),
            self.flags.password(),
        );
        self.flags.confirm_password = check.valid;
        self.confirm_password.check = Some(check);
    }

    /// Apply a uniqueness answer. Returns false when the answer is stale.
    pub fn apply_user_name_check(&mut self, seq: u64, exists: bool) -> bool {
        if self.pending_check != Some(seq) {
            tracing::debug!(seq, latest = self.last_check_seq, "Dropping stale username check");
            return false;
        }
        self.pending_check = None;

        let check = rules::check_user_name_availability(exists);
        self.flags.user_name = check.valid;
        self.user_name.check = Some(check);
        true
    }

    /// The check never completed. The length-based flag stays as it was.
    pub fn user_name_check_failed(&mut self, seq: u64) {
        if self.pending_check != Some(seq) {
            return;
        }
        self.pending_check = None;
        self.checked_user_name = None;
        self.user_name.check = Some(FieldCheck::hidden(self.flags.user_name));
    }

    /// Called once the backend has answered the submission
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

impl Default for SignupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for SignupForm {
    fn title(&self) -> &str {
        "Sign up"
    }

    fn submit_label(&self) -> &str {
        "Sign Up"
    }

    fn field_count(&self) -> usize {
        7 // three names, user name, password, confirmation, submit
    }

    fn active_field(&self) -> usize {
        self.active_field_index
    }

    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT);
    }

    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            FIRST_NAME => Some(&self.first_name),
            MIDDLE_NAME => Some(&self.middle_name),
            LAST_NAME => Some(&self.last_name),
            USER_NAME => Some(&self.user_name),
            PASSWORD => Some(&self.password),
            CONFIRM_PASSWORD => Some(&self.confirm_password),
            _ => None,
        }
    }

    fn get_field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        match index {
            FIRST_NAME => Some(&mut self.first_name),
            MIDDLE_NAME => Some(&mut self.middle_name),
            LAST_NAME => Some(&mut self.last_name),
            USER_NAME => Some(&mut self.user_name),
            PASSWORD => Some(&mut self.password),
            CONFIRM_PASSWORD => Some(&mut self.confirm_password),
            _ => None,
        }
    }

    fn validate_field(&mut self, index: usize) -> Option<FormEffect> {
        match index {
            FIRST_NAME | MIDDLE_NAME | LAST_NAME => self.validate_name(index),
            USER_NAME => return self.validate_user_name(),
            PASSWORD => self.validate_password(),
            CONFIRM_PASSWORD => self.validate_confirm_password(),
            _ => {}
        }
        None
    }

    fn messages(&self, index: usize) -> Vec<&FieldCheck> {
        let mut messages: Vec<&FieldCheck> = self
            .get_field(index)
            .and_then(|field| field.check.as_ref())
            .into_iter()
            .collect();
        if index == PASSWORD {
            messages.extend(self.password_complexity.as_ref());
        }
        messages.retain(|check| check.is_visible());
        messages
    }

    fn phase(&self) -> FormPhase {
        if self.submitting {
            FormPhase::Submitting
        } else if self.pending_check.is_some() {
            FormPhase::Validating
        } else if self.flags.all() {
            FormPhase::Submittable
        } else {
            FormPhase::Editing
        }
    }

    fn submit(&mut self) -> Option<FormEffect> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        tracing::info!(user_name = %self.user_name.as_text(), "Submitting signup");
        Some(FormEffect::SubmitSignup(SignupSubmission {
            first_name: self.first_name.as_text().to_string(),
            middle_name: self.middle_name.as_text().to_string(),
            last_name: self.last_name.as_text().to_string(),
            user_name: self.user_name.as_text().to_string(),
            password: self.password.as_text().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::rules::{USER_NAME_AVAILABLE, USER_NAME_TAKEN};

    fn type_into(form: &mut SignupForm, index: usize, text: &str) -> Option<FormEffect> {
        form.focus(index);
        let mut last = None;
        for c in text.chars() {
            last = form.input_char(c);
        }
        last
    }

    fn seq_of(effect: Option<FormEffect>) -> u64 {
        match effect {
            Some(FormEffect::CheckUserName(check)) => check.seq,
            other => panic!("expected a username check, got {other:?}"),
        }
    }

    /// A form with every field valid and the username confirmed available
    fn complete_form() -> SignupForm {
        let mut form = SignupForm::new();
        type_into(&mut form, FIRST_NAME, "John");
        let seq = seq_of(type_into(&mut form, USER_NAME, "johnny"));
        form.apply_user_name_check(seq, false);
        type_into(&mut form, PASSWORD, "Abcdef1!");
        type_into(&mut form, CONFIRM_PASSWORD, "Abcdef1!");
        form
    }

    mod defaults {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_optional_names_start_valid() {
            let form = SignupForm::new();
            assert_eq!(form.flags, SignupFlags::default());
            assert!(!form.flags.first_name);
            assert!(form.flags.middle_name);
            assert!(form.flags.last_name);
            assert_eq!(form.phase(), FormPhase::Editing);
        }

        #[test]
        fn test_get_field_returns_correct_fields() {
            let form = SignupForm::new();
            assert_eq!(form.get_field(0).unwrap().name, "first_name");
            assert_eq!(form.get_field(3).unwrap().name, "user_name");
            assert_eq!(form.get_field(5).unwrap().name, "confirm_password");
            assert!(form.get_field(6).is_none());
            assert_eq!(form.field_count(), 7);
        }
    }

    mod names {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_first_name_with_digits_is_invalid() {
            let mut form = SignupForm::new();
            type_into(&mut form, FIRST_NAME, "John123");
            assert!(!form.flags.first_name);
            let message = &form.first_name.check.as_ref().unwrap().message;
            assert!(message.contains("should contain only alphabets"));
        }

        #[test]
        fn test_names_are_lowercased_and_trimmed_in_place() {
            let mut form = SignupForm::new();
            type_into(&mut form, LAST_NAME, "Doe ");
            assert_eq!(form.last_name.as_text(), "doe");
            assert!(form.flags.last_name);
        }

        #[test]
        fn test_clearing_first_name_is_required() {
            let mut form = SignupForm::new();
            type_into(&mut form, FIRST_NAME, "J");
            form.delete_char();
            assert_eq!(form.first_name.check.as_ref().unwrap().message, "*required");
        }

        #[test]
        fn test_invalid_middle_name_blocks_submit() {
            let mut form = complete_form();
            assert!(form.can_submit());
            type_into(&mut form, MIDDLE_NAME, "x1");
            assert!(!form.flags.name());
            assert!(!form.can_submit());
        }
    }

    mod user_name {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_short_name_issues_no_check() {
            let mut form = SignupForm::new();
            let effect = type_into(&mut form, USER_NAME, "abcd");
            assert!(effect.is_none());
            assert!(!form.flags.user_name);
            assert!(!form.is_checking_user_name());
        }

        #[test]
        fn test_length_valid_name_issues_check() {
            let mut form = SignupForm::new();
            let effect = type_into(&mut form, USER_NAME, "alice");
            assert_eq!(
                effect,
                Some(FormEffect::CheckUserName(UserNameCheck {
                    seq: 1,
                    user_name: "alice".to_string(),
                }))
            );
            assert!(form.flags.user_name);
            assert_eq!(form.phase(), FormPhase::Validating);
            assert_eq!(
                form.user_name.check.as_ref().unwrap().message,
                USER_NAME_CHECKING
            );
        }

        #[test]
        fn test_user_name_is_trimmed_before_check() {
            let mut form = SignupForm::new();
            form.user_name.set_text("  alice".to_string());
            let effect = form.validate_field(USER_NAME);
            assert_eq!(form.user_name.as_text(), "alice");
            assert!(matches!(effect, Some(FormEffect::CheckUserName(_))));
        }

        #[test]
        fn test_taken_name_is_invalid() {
            let mut form = SignupForm::new();
            let seq = seq_of(type_into(&mut form, USER_NAME, "alice"));
            assert!(form.apply_user_name_check(seq, true));
            assert!(!form.flags.user_name);
            assert_eq!(form.user_name.check.as_ref().unwrap().message, USER_NAME_TAKEN);
        }

        #[test]
        fn test_available_name_is_valid() {
            let mut form = SignupForm::new();
            let seq = seq_of(type_into(&mut form, USER_NAME, "alice"));
            assert!(form.apply_user_name_check(seq, false));
            assert!(form.flags.user_name);
            assert_eq!(
                form.user_name.check.as_ref().unwrap().message,
                USER_NAME_AVAILABLE
            );
        }

        #[test]
        fn test_stale_answer_does_not_overwrite_newer_check() {
            let mut form = SignupForm::new();
            let alice = seq_of(type_into(&mut form, USER_NAME, "alice"));

            form.user_name.clear();
            let bob = seq_of(type_into(&mut form, USER_NAME, "bobby"));
            assert!(bob > alice);

            // "bobby" answers first, then the slow "alice" answer arrives
            assert!(form.apply_user_name_check(bob, false));
            assert!(!form.apply_user_name_check(alice, true));

            assert!(form.flags.user_name);
            assert_eq!(
                form.user_name.check.as_ref().unwrap().message,
                USER_NAME_AVAILABLE
            );
            assert!(!form.is_checking_user_name());
        }

        #[test]
        fn test_stale_answer_arriving_first_is_dropped() {
            let mut form = SignupForm::new();
            let alice = seq_of(type_into(&mut form, USER_NAME, "alice"));
            form.user_name.clear();
            let bob = seq_of(type_into(&mut form, USER_NAME, "bobby"));

            assert!(!form.apply_user_name_check(alice, true));
            assert_eq!(form.phase(), FormPhase::Validating);
            assert!(form.apply_user_name_check(bob, true));
            assert_eq!(form.user_name.check.as_ref().unwrap().message, USER_NAME_TAKEN);
        }

        #[test]
        fn test_answer_after_name_became_too_short_is_dropped() {
            let mut form = SignupForm::new();
            let seq = seq_of(type_into(&mut form, USER_NAME, "alice"));
            form.delete_char();
            assert!(!form.apply_user_name_check(seq, false));
            assert!(!form.flags.user_name);
        }

        #[test]
        fn test_failed_check_keeps_length_flag() {
            let mut form = SignupForm::new();
            let seq = seq_of(type_into(&mut form, USER_NAME, "alice"));
            form.user_name_check_failed(seq);
            assert!(form.flags.user_name);
            assert!(!form.is_checking_user_name());
            assert!(!form.user_name.check.as_ref().unwrap().is_visible());
        }

        #[test]
        fn test_blur_without_edit_does_not_recheck() {
            let mut form = SignupForm::new();
            let seq = seq_of(type_into(&mut form, USER_NAME, "alice"));
            form.apply_user_name_check(seq, true);

            assert!(form.focus(PASSWORD).is_none());
            assert!(!form.flags.user_name);
            assert_eq!(form.user_name.check.as_ref().unwrap().message, USER_NAME_TAKEN);
        }

        #[test]
        fn test_retyping_same_name_checks_again() {
            let mut form = SignupForm::new();
            let first = seq_of(type_into(&mut form, USER_NAME, "alice"));
            form.apply_user_name_check(first, true);
            form.delete_char();
            let second = seq_of(form.input_char('e'));
            assert!(second > first);
        }

        #[test]
        fn test_pending_check_blocks_submit() {
            let mut form = complete_form();
            type_into(&mut form, USER_NAME, "x");
            assert_eq!(form.phase(), FormPhase::Validating);
            assert!(form.submit().is_none());
        }
    }

    mod password {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_strong_password_shows_two_successes() {
            let mut form = SignupForm::new();
            type_into(&mut form, PASSWORD, "Abcdef1!");
            assert!(form.flags.password());
            let messages = form.messages(PASSWORD);
            assert_eq!(messages.len(), 2);
            assert!(messages.iter().all(|m| m.tone == Tone::Success));
        }

        #[test]
        fn test_empty_password_shows_required_only() {
            let mut form = SignupForm::new();
            type_into(&mut form, PASSWORD, "a");
            form.delete_char();
            let messages = form.messages(PASSWORD);
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].message, "*required");
            assert!(!form.flags.password_length);
            assert!(!form.flags.password_regex);
        }

        #[test]
        fn test_confirmation_follows_password_changes() {
            let mut form = complete_form();
            assert!(form.flags.confirm_password);

            type_into(&mut form, PASSWORD, "x");
            // Password is now "Abcdef1!x"; confirmation no longer matches
            assert!(!form.flags.confirm_password);
            assert!(!form.can_submit());
        }

        #[test]
        fn test_confirmation_hidden_while_password_invalid() {
            let mut form = SignupForm::new();
            type_into(&mut form, PASSWORD, "weak");
            type_into(&mut form, CONFIRM_PASSWORD, "weak");
            assert!(!form.flags.confirm_password);
            assert!(form.messages(CONFIRM_PASSWORD).is_empty());
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_complete_form_is_submittable() {
            let form = complete_form();
            assert!(form.flags.all());
            assert_eq!(form.phase(), FormPhase::Submittable);
        }

        #[test]
        fn test_submit_builds_submission() {
            let mut form = complete_form();
            let effect = form.submit();
            assert_eq!(
                effect,
                Some(FormEffect::SubmitSignup(SignupSubmission {
                    first_name: "john".to_string(),
                    middle_name: String::new(),
                    last_name: String::new(),
                    user_name: "johnny".to_string(),
                    password: "Abcdef1!".to_string(),
                }))
            );
            assert_eq!(form.phase(), FormPhase::Submitting);
            assert!(form.submit().is_none());
        }

        #[test]
        fn test_finish_submit_returns_to_submittable() {
            let mut form = complete_form();
            form.submit();
            form.finish_submit();
            assert_eq!(form.phase(), FormPhase::Submittable);
        }

        #[test]
        fn test_incomplete_form_does_not_submit() {
            let mut form = SignupForm::new();
            assert!(form.submit().is_none());
        }
    }
}
