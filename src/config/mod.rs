//! Gateway configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.repobridge.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REPOBRIDGE_*`, plus the legacy
//!    `GITHUB_API_TOKEN`/`GITHUB_TOKEN` and `GITLAB_API_TOKEN`/`GITLAB_TOKEN`
//!    for tokens
//! 4. **Command-line arguments** – `--github-token`, `--bind-address`, ...
//!
//! # Configuration File
//!
//! ```toml
//! github_token = "ghp_example"
//! gitlab_token = "glpat-example"
//! gitlab_api_url = "https://gitlab.example.com/api/v4"
//! request_timeout_seconds = 10
//! bind_address = "0.0.0.0:8080"
//! log_format = "json"
//! ```

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::adapters::ProviderSettings;
use crate::error::GatewayError;
use crate::telemetry::LogFormat;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITLAB_API_URL: &str = "https://gitlab.com/api/v4";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FORMAT: &str = "pretty";
const GITHUB_TOKEN_VARIABLES: [&str; 2] = ["GITHUB_API_TOKEN", "GITHUB_TOKEN"];
const GITLAB_TOKEN_VARIABLES: [&str; 2] = ["GITLAB_API_TOKEN", "GITLAB_TOKEN"];

/// Gateway configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `REPOBRIDGE_GITHUB_TOKEN`, `GITHUB_API_TOKEN`, `GITHUB_TOKEN`, or
///   `--github-token`
/// - `REPOBRIDGE_GITLAB_TOKEN`, `GITLAB_API_TOKEN`, `GITLAB_TOKEN`, or
///   `--gitlab-token`
/// - `REPOBRIDGE_GITHUB_API_URL` / `REPOBRIDGE_GITLAB_API_URL`
/// - `REPOBRIDGE_REQUEST_TIMEOUT_SECONDS`
/// - `REPOBRIDGE_BIND_ADDRESS`
/// - `REPOBRIDGE_LOG_FORMAT`
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use repobridge::RepobridgeConfig;
///
/// let config = RepobridgeConfig::load().expect("failed to load configuration");
/// config.validate().expect("configuration should be consistent");
/// let github = config.github_settings().expect("GitHub URL should parse");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REPOBRIDGE",
    discovery(
        dotfile_name = ".repobridge.toml",
        config_file_name = "repobridge.toml",
        app_name = "repobridge"
    )
)]
pub struct RepobridgeConfig {
    /// Personal access token for the GitHub API.
    ///
    /// Falls back to `GITHUB_API_TOKEN`, then `GITHUB_TOKEN`, when unset.
    #[ortho_config()]
    pub github_token: Option<String>,

    /// Personal access token for the GitLab API.
    ///
    /// Falls back to `GITLAB_API_TOKEN`, then `GITLAB_TOKEN`, when unset.
    #[ortho_config()]
    pub gitlab_token: Option<String>,

    /// GitHub API root. GitHub Enterprise uses `https://<host>/api/v3`.
    #[ortho_config()]
    pub github_api_url: String,

    /// GitLab API root including the `/api/v4` prefix.
    #[ortho_config()]
    pub gitlab_api_url: String,

    /// Upper bound on a single upstream request, in seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Socket address the HTTP server listens on.
    #[ortho_config(cli_short = 'b')]
    pub bind_address: String,

    /// Log output format: `pretty` or `json`.
    #[ortho_config()]
    pub log_format: String,
}

impl Default for RepobridgeConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            gitlab_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_owned(),
            gitlab_api_url: DEFAULT_GITLAB_API_URL.to_owned(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            log_format: DEFAULT_LOG_FORMAT.to_owned(),
        }
    }
}

impl RepobridgeConfig {
    /// Resolves the GitHub token from configuration, then the legacy
    /// `GITHUB_API_TOKEN` and `GITHUB_TOKEN` environment variables. Blank
    /// values count as absent at every step.
    #[must_use]
    pub fn resolve_github_token(&self) -> Option<String> {
        resolve_token(self.github_token.as_deref(), &GITHUB_TOKEN_VARIABLES)
    }

    /// Resolves the GitLab token from configuration, then the legacy
    /// `GITLAB_API_TOKEN` and `GITLAB_TOKEN` environment variables. Blank
    /// values count as absent at every step.
    #[must_use]
    pub fn resolve_gitlab_token(&self) -> Option<String> {
        resolve_token(self.gitlab_token.as_deref(), &GITLAB_TOKEN_VARIABLES)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Settings for the GitHub adapter.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] when `github_api_url` does not
    /// parse.
    pub fn github_settings(&self) -> Result<ProviderSettings, GatewayError> {
        Ok(
            ProviderSettings::new(&self.github_api_url, self.resolve_github_token())?
                .with_timeout(self.request_timeout()),
        )
    }

    /// Settings for the GitLab adapter.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] when `gitlab_api_url` does not
    /// parse.
    pub fn gitlab_settings(&self) -> Result<ProviderSettings, GatewayError> {
        Ok(
            ProviderSettings::new(&self.gitlab_api_url, self.resolve_gitlab_token())?
                .with_timeout(self.request_timeout()),
        )
    }

    /// Parses the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] when `bind_address` is not a
    /// socket address.
    pub fn bind_address(&self) -> Result<SocketAddr, GatewayError> {
        self.bind_address
            .parse()
            .map_err(|error| GatewayError::Configuration {
                message: format!("invalid bind address '{}': {error}", self.bind_address),
            })
    }

    /// Parses the log format.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] for anything other than
    /// `pretty` or `json`.
    pub fn log_format(&self) -> Result<LogFormat, GatewayError> {
        self.log_format.parse()
    }

    /// Validates configuration consistency.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] when the timeout is zero, an
    /// address, format or API URL does not parse.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.request_timeout_seconds == 0 {
            return Err(GatewayError::Configuration {
                message: "request_timeout_seconds must be greater than zero".to_owned(),
            });
        }
        self.bind_address()?;
        self.log_format()?;
        self.github_settings()?;
        self.gitlab_settings()?;
        Ok(())
    }
}

fn resolve_token(configured: Option<&str>, legacy_variables: &[&str]) -> Option<String> {
    configured
        .filter(|token| !is_blank(token))
        .map(ToOwned::to_owned)
        .or_else(|| {
            legacy_variables
                .iter()
                .filter_map(|name| env::var(name).ok())
                .find(|token| !is_blank(token))
        })
}

fn is_blank(token: &str) -> bool {
    token.trim().is_empty()
}

#[cfg(test)]
mod tests;
