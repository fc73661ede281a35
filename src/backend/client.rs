//! HTTP client for communicating with the to-do backend
//!
//! JSON endpoints (username check, login) and the two form posts the
//! pages would normally submit themselves (signup, create/update task).

use super::error::BackendError;
use super::schema::{
    CheckUserNameRequest, CheckUserNameResponse, ErrorResponse, LoginRequest, LoginResponse,
    SignupSubmission, TaskSubmission,
};
use super::traits::BackendClientTrait;
use crate::config::ClientConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Anti-forgery header expected by the backend on every POST
const CSRF_HEADER: &str = "X-CSRFToken";

/// Anti-forgery field name inside form-encoded bodies
const CSRF_FIELD: &str = "csrf_token";

/// Body the backend answers with when its own form validation fails
const REJECTED_BODY: &str = "not validated";

/// Client for the to-do backend
pub struct BackendClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl BackendClient {
    /// Create a new client. The cookie store keeps the login session for later posts.
    pub fn new(config: ClientConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout())
            .build()
            .map_err(BackendError::Client)?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        let base = self.config.base_url().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self.http.post(url);
        match self.config.csrf_token() {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    async fn send(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, BackendError> {
        let response = request.send().await.map_err(|source| BackendError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
        };
        Err(BackendError::Status {
            url: url.to_string(),
            status,
            message,
        })
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, "Posting JSON request");

        let response = self.send(&url, self.post(&url).json(body)).await?;
        response
            .json::<R>()
            .await
            .map_err(|source| BackendError::Decode { url, source })
    }

    async fn post_form(
        &self,
        path: &str,
        mut fields: Vec<(&'static str, String)>,
    ) -> Result<(), BackendError> {
        let url = self.url(path);
        if let Some(token) = self.config.csrf_token() {
            fields.push((CSRF_FIELD, token.to_string()));
        }
        tracing::debug!(%url, fields = fields.len(), "Posting form");

        let response = self.send(&url, self.post(&url).form(&fields)).await?;
        let body = response
            .text()
            .await
            .map_err(|source| BackendError::Decode {
                url: url.clone(),
                source,
            })?;

        if body.trim() == REJECTED_BODY {
            return Err(BackendError::Rejected { url });
        }
        Ok(())
    }
}

#[async_trait]
impl BackendClientTrait for BackendClient {
    async fn check_user_name(
        &self,
        user_name: &str,
    ) -> Result<CheckUserNameResponse, BackendError> {
        let body = CheckUserNameRequest {
            user_name: user_name.to_string(),
        };
        self.post_json(self.config.check_user_name_path(), &body)
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, BackendError> {
        self.post_json(self.config.login_path(), request).await
    }

    async fn submit_signup(&self, submission: &SignupSubmission) -> Result<(), BackendError> {
        self.post_form(self.config.signup_path(), submission.form_fields())
            .await
    }

    async fn submit_task(&self, submission: &TaskSubmission) -> Result<(), BackendError> {
        let path = match submission.todo_id {
            Some(id) => format!("{}/{}", self.config.update_path().trim_end_matches('/'), id),
            None => self.config.create_path().to_string(),
        };
        self.post_form(&path, submission.form_fields()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(base_url: &str) -> BackendClient {
        let config = ClientConfig {
            base_url: Some(base_url.to_string()),
            ..Default::default()
        };
        BackendClient::new(config).unwrap()
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = client_with_base("http://localhost:5000/");
        assert_eq!(client.url("/login"), "http://localhost:5000/login");
        assert_eq!(client.url("signup"), "http://localhost:5000/signup");
    }

    #[test]
    fn test_default_paths() {
        let client = client_with_base("http://localhost:5000");
        assert_eq!(
            client.url(client.config.check_user_name_path()),
            "http://localhost:5000/check_user_name"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        // Port 9 (discard) is not served in the test environment
        let client = client_with_base("http://127.0.0.1:9");
        tokio_test::assert_err!(client.check_user_name("alice").await);
    }
}
