//! Application state definitions

use super::forms::{FormState, LoginForm, SignupForm, TaskForm};
use chrono::NaiveDateTime;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Signup,
    TaskCreate,
    TaskUpdate,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Signup",
            Self::TaskCreate => "Create task",
            Self::TaskUpdate => "Update task",
        }
    }
}

/// Everything needed to open a view with a fresh form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormLaunch {
    Login,
    Signup,
    TaskCreate,
    TaskUpdate {
        todo_id: u32,
        created_time: NaiveDateTime,
        title: String,
        due_time: String,
    },
}

impl FormLaunch {
    pub fn view(&self) -> View {
        match self {
            Self::Login => View::Login,
            Self::Signup => View::Signup,
            Self::TaskCreate => View::TaskCreate,
            Self::TaskUpdate { .. } => View::TaskUpdate,
        }
    }

    pub fn build_form(&self) -> FormState {
        match self {
            Self::Login => FormState::Login(LoginForm::new()),
            Self::Signup => FormState::Signup(SignupForm::new()),
            Self::TaskCreate => FormState::Task(TaskForm::create()),
            Self::TaskUpdate {
                todo_id,
                created_time,
                title,
                due_time,
            } => FormState::Task(TaskForm::update(
                *todo_id,
                *created_time,
                title.clone(),
                due_time.clone(),
            )),
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub form: FormState,

    // Feedback
    pub status_message: Option<String>,
    /// Target named by the backend after a successful login
    pub redirect_target: Option<String>,
}

impl AppState {
    /// Replace the current view and its form
    pub fn open(&mut self, launch: &FormLaunch) {
        self.current_view = launch.view();
        self.form = launch.build_form();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
