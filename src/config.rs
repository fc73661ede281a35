//! Configuration handling for the client

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_CHECK_USER_NAME_PATH: &str = "/check_user_name";
const DEFAULT_SIGNUP_PATH: &str = "/signup";
const DEFAULT_CREATE_PATH: &str = "/create";
const DEFAULT_UPDATE_PATH: &str = "/update";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the backend address
pub const BASE_URL_ENV: &str = "TODO_FORMS_BASE_URL";
/// Environment variable overriding the anti-forgery token
pub const CSRF_TOKEN_ENV: &str = "TODO_FORMS_CSRF_TOKEN";

/// Backend location and endpoint paths
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Backend address, e.g. `http://127.0.0.1:5000`
    pub base_url: Option<String>,
    pub login_path: Option<String>,
    pub check_user_name_path: Option<String>,
    pub signup_path: Option<String>,
    pub create_path: Option<String>,
    /// Prefix of the update page; the task id is appended
    pub update_path: Option<String>,
    /// Sent as `X-CSRFToken` and as the `csrf_token` form field
    pub csrf_token: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "todo-forms", "todo-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        ProjectDirs::from("io", "todo-forms", "todo-forms").map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(CSRF_TOKEN_ENV).ok(),
        );
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: ClientConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    fn apply_overrides(&mut self, base_url: Option<String>, csrf_token: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(token) = csrf_token.filter(|t| !t.is_empty()) {
            self.csrf_token = Some(token);
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn login_path(&self) -> &str {
        self.login_path.as_deref().unwrap_or(DEFAULT_LOGIN_PATH)
    }

    pub fn check_user_name_path(&self) -> &str {
        self.check_user_name_path
            .as_deref()
            .unwrap_or(DEFAULT_CHECK_USER_NAME_PATH)
    }

    pub fn signup_path(&self) -> &str {
        self.signup_path.as_deref().unwrap_or(DEFAULT_SIGNUP_PATH)
    }

    pub fn create_path(&self) -> &str {
        self.create_path.as_deref().unwrap_or(DEFAULT_CREATE_PATH)
    }

    pub fn update_path(&self) -> &str {
        self.update_path.as_deref().unwrap_or(DEFAULT_UPDATE_PATH)
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
