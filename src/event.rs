//! Events delivered to the UI task from background work

use crate::backend::{BackendError, CheckUserNameResponse, LoginResponse};

#[derive(Debug)]
pub enum AppEvent {
    UserNameChecked {
        seq: u64,
        result: Result<CheckUserNameResponse, BackendError>,
    },
    LoginFinished(Result<LoginResponse, BackendError>),
    SignupSubmitted(Result<(), BackendError>),
    TaskSubmitted(Result<(), BackendError>),
    /// The wall-clock minute changed
    MinuteElapsed,
}

/// An event tagged with the form session that started the work.
/// Sessions are numbered by the app each time a form is opened.
#[derive(Debug)]
pub struct SessionEvent {
    pub session: u64,
    pub event: AppEvent,
}
