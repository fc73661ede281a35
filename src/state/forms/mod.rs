//! Form domain layer
//!
//! Per-form validation state for the login, signup and task views. Each form
//! owns its fields and flags and hands network work back to the caller as a
//! [`FormEffect`].

mod field;
mod form_state;
mod login_form;
pub mod rules;
mod signup_form;
mod task_form;

pub use field::FormField;
pub use form_state::{Form, FormEffect, FormMode, FormPhase, FormState, UserNameCheck};
pub use login_form::{LoginFlags, LoginForm, INVALID_CREDENTIALS};
pub use rules::{FieldCheck, Tone};
pub use signup_form::{SignupFlags, SignupForm};
pub use task_form::{Clock, TaskFlags, TaskForm};
