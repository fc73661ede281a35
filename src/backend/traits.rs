//! Trait abstraction for the backend client to enable mocking in tests

use super::error::BackendError;
use super::schema::{
    CheckUserNameResponse, LoginRequest, LoginResponse, SignupSubmission, TaskSubmission,
};
use async_trait::async_trait;

/// Backend operations the forms depend on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClientTrait: Send + Sync {
    /// Ask whether a username is already registered
    async fn check_user_name(&self, user_name: &str)
        -> Result<CheckUserNameResponse, BackendError>;

    /// Post credentials to the login endpoint
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError>;

    /// Post a new account to the signup page
    async fn submit_signup(&self, submission: &SignupSubmission) -> Result<(), BackendError>;

    /// Post a created or edited task
    async fn submit_task(&self, submission: &TaskSubmission) -> Result<(), BackendError>;
}
