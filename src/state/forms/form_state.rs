//! Form state management shared by the login, signup and task forms

use super::field::FormField;
use super::rules::FieldCheck;
use super::{LoginForm, SignupForm, TaskForm};
use crate::backend::{LoginRequest, SignupSubmission, TaskSubmission};
use chrono::NaiveDateTime;

/// Whether a task form edits an existing record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update {
        todo_id: u32,
        created_time: NaiveDateTime,
    },
}

impl FormMode {
    pub fn is_create(&self) -> bool {
        matches!(self, FormMode::Create)
    }
}

/// Where a form is in its lifecycle. Always derived from the form's fields,
/// flags and in-flight requests, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// At least one field is invalid
    Editing,
    /// Waiting on an asynchronous field check
    Validating,
    /// Every field is valid; submit is enabled
    Submittable,
    /// A submission is in flight
    Submitting,
}

/// A uniqueness query tagged with its sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNameCheck {
    pub seq: u64,
    pub user_name: String,
}

/// Work a form asks its host to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    CheckUserName(UserNameCheck),
    Login(LoginRequest),
    SubmitSignup(SignupSubmission),
    SubmitTask(TaskSubmission),
}

/// Trait for common form operations
pub trait Form {
    fn title(&self) -> &str;
    fn submit_label(&self) -> &str;
    /// Focusable rows, the submit button being the last one
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn get_field(&self, index: usize) -> Option<&FormField>;
    fn get_field_mut(&mut self, index: usize) -> Option<&mut FormField>;
    /// Re-run the rule of one field after an input or blur event
    fn validate_field(&mut self, index: usize) -> Option<FormEffect>;
    fn phase(&self) -> FormPhase;
    /// Start a submission. Returns `None` when the form is not submittable.
    fn submit(&mut self) -> Option<FormEffect>;

    /// Messages shown under a field
    fn messages(&self, index: usize) -> Vec<&FieldCheck> {
        self.get_field(index)
            .and_then(|field| field.check.as_ref())
            .filter(|check| check.is_visible())
            .into_iter()
            .collect()
    }

    /// Form-wide notice, e.g. rejected credentials
    fn notice(&self) -> Option<&str> {
        None
    }

    fn can_submit(&self) -> bool {
        self.phase() == FormPhase::Submittable
    }

    fn submit_index(&self) -> usize {
        self.field_count() - 1
    }

    fn is_submit_active(&self) -> bool {
        self.active_field() == self.submit_index()
    }

    /// Move focus. The field being left gets a blur event.
    fn focus(&mut self, index: usize) -> Option<FormEffect> {
        let previous = self.active_field();
        self.set_active_field(index);
        if previous == self.active_field() {
            return None;
        }
        if let Some(field) = self.get_field(previous) {
            tracing::trace!(field = %field.name, "Field blurred");
        }
        self.validate_field(previous)
    }

    fn next_field(&mut self) -> Option<FormEffect> {
        let count = self.field_count();
        let current = self.active_field();
        self.focus((current + 1) % count)
    }

    fn prev_field(&mut self) -> Option<FormEffect> {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.focus(count - 1)
        } else {
            self.focus(current - 1)
        }
    }

    /// Type into the focused field (an input event)
    fn input_char(&mut self, c: char) -> Option<FormEffect> {
        let index = self.active_field();
        self.get_field_mut(index)?.push_char(c);
        self.validate_field(index)
    }

    fn delete_char(&mut self) -> Option<FormEffect> {
        let index = self.active_field();
        self.get_field_mut(index)?.pop_char();
        self.validate_field(index)
    }
}

/// Enum representing the form of the current view
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Login(LoginForm),
    Signup(SignupForm),
    Task(TaskForm),
}

impl FormState {
    pub fn as_form(&self) -> Option<&dyn Form> {
        match self {
            FormState::None => None,
            FormState::Login(f) => Some(f),
            FormState::Signup(f) => Some(f),
            FormState::Task(f) => Some(f),
        }
    }

    pub fn as_form_mut(&mut self) -> Option<&mut dyn Form> {
        match self {
            FormState::None => None,
            FormState::Login(f) => Some(f),
            FormState::Signup(f) => Some(f),
            FormState::Task(f) => Some(f),
        }
    }

    pub fn next_field(&mut self) -> Option<FormEffect> {
        self.as_form_mut()?.next_field()
    }

    pub fn prev_field(&mut self) -> Option<FormEffect> {
        self.as_form_mut()?.prev_field()
    }

    pub fn input_char(&mut self, c: char) -> Option<FormEffect> {
        self.as_form_mut()?.input_char(c)
    }

    pub fn delete_char(&mut self) -> Option<FormEffect> {
        self.as_form_mut()?.delete_char()
    }

    pub fn submit(&mut self) -> Option<FormEffect> {
        self.as_form_mut()?.submit()
    }

    pub fn phase(&self) -> Option<FormPhase> {
        self.as_form().map(|f| f.phase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_ignores_input() {
        let mut state = FormState::None;
        assert!(state.input_char('a').is_none());
        assert!(state.next_field().is_none());
        assert!(state.submit().is_none());
        assert!(state.phase().is_none());
    }

    #[test]
    fn test_next_field_cycles_through_submit_row() {
        let mut state = FormState::Login(LoginForm::new());
        let count = state.as_form().unwrap().field_count();
        for _ in 0..count {
            state.next_field();
        }
        assert_eq!(state.as_form().unwrap().active_field(), 0);
    }

    #[test]
    fn test_prev_field_wraps_to_submit_row() {
        let mut state = FormState::Login(LoginForm::new());
        state.prev_field();
        let form = state.as_form().unwrap();
        assert!(form.is_submit_active());
    }

    #[test]
    fn test_input_goes_to_focused_field() {
        let mut state = FormState::Login(LoginForm::new());
        state.input_char('a');
        state.next_field();
        state.input_char('b');
        let form = state.as_form().unwrap();
        assert_eq!(form.get_field(0).unwrap().as_text(), "a");
        assert_eq!(form.get_field(1).unwrap().as_text(), "b");
    }

    #[test]
    fn test_typing_on_submit_row_is_ignored() {
        let mut state = FormState::Login(LoginForm::new());
        state.prev_field();
        assert!(state.input_char('x').is_none());
        let form = state.as_form().unwrap();
        assert_eq!(form.get_field(0).unwrap().as_text(), "");
    }

    #[test]
    fn test_form_mode_is_create() {
        assert!(FormMode::Create.is_create());
        let update = FormMode::Update {
            todo_id: 1,
            created_time: chrono::NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };
        assert!(!update.is_create());
    }
}
