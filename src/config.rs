//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "SIGNUP_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_SIGNUP_PATH: &str = "/api/auth/signup";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Base URL of the account API
    pub api_base_url: Option<String>,
    /// Path of the signup endpoint
    pub signup_path: Option<String>,
    /// Path of the login page shown after signing up
    pub login_path: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory holding the log file, the system temp dir when no home is known
    pub fn log_dir() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| std::env::temp_dir().join("signup-tui"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Apply environment overrides on top of the file values
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = Some(url);
            }
        }
        self
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Full URL of the signup endpoint
    pub fn signup_url(&self) -> String {
        join_url(
            self.api_base_url(),
            self.signup_path.as_deref().unwrap_or(DEFAULT_SIGNUP_PATH),
        )
    }

    /// Full URL of the login page
    pub fn login_url(&self) -> String {
        join_url(
            self.api_base_url(),
            self.login_path.as_deref().unwrap_or(DEFAULT_LOGIN_PATH),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "signup", "signup-tui")
}

/// Join a base URL and a path with exactly one slash between them
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
