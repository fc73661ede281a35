//! Backend client module for HTTP communication

mod client;
mod error;
mod schema;
mod traits;

pub use client::BackendClient;
pub use error::BackendError;
pub use schema::{
    CheckUserNameResponse, LoginRequest, LoginResponse, SignupSubmission, TaskSubmission,
};
pub use traits::BackendClientTrait;

#[cfg(test)]
pub use traits::MockBackendClientTrait;
