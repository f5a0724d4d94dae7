//! Provider adapters translating GitHub and GitLab payloads into canonical
//! entities.
//!
//! Each adapter knows one provider's endpoint shapes, authentication header
//! and JSON structure. Both implement [`ProviderGateway`] so the facade can
//! dispatch on a [`Provider`] tag without knowing which adapter it holds.

mod github;
mod gitlab;
mod response;

pub use github::GitHubAdapter;
pub use gitlab::GitLabAdapter;

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::GatewayError;
use crate::models::{Branch, Commit, PullRequest};
use crate::provider::{Provider, RepositoryIdentifier};
use crate::transport::DEFAULT_TIMEOUT;

/// Connection settings for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// API root, e.g. `https://api.github.com` or `https://gitlab.com/api/v4`.
    pub api_base: Url,
    /// Static access token; requests are unauthenticated without one.
    pub token: Option<String>,
    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Parses the API root and keeps the token only when it is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] when `api_base` is not a URL.
    pub fn new(api_base: &str, token: Option<String>) -> Result<Self, GatewayError> {
        let parsed = Url::parse(api_base).map_err(|error| GatewayError::Configuration {
            message: format!("invalid API base URL '{api_base}': {error}"),
        })?;
        Ok(Self {
            api_base: parsed,
            token: token.filter(|value| !value.trim().is_empty()),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replaces the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a token is configured.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Appends `segments` to the API root, keeping any path the root already
    /// has. Each segment is percent-encoded, so `/`, `?` and `#` inside one
    /// stay part of that segment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidIdentifier`] for a `.` or `..` segment
    /// and [`GatewayError::Configuration`] when the API root cannot carry a
    /// path.
    pub(crate) fn endpoint<I>(&self, segments: I) -> Result<Url, GatewayError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.api_base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| GatewayError::Configuration {
                    message: format!("API base URL '{}' cannot carry a path", self.api_base),
                })?;
            path.pop_if_empty();
            for item in segments {
                let segment = item.as_ref();
                if matches!(segment, "." | "..") {
                    return Err(GatewayError::InvalidIdentifier {
                        message: format!("path segment '{segment}' is not allowed"),
                    });
                }
                path.push(segment);
            }
        }
        Ok(url)
    }
}

/// Parameters for listing commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitQuery {
    /// Branch to list; the provider's default ref when absent.
    pub branch: Option<String>,
    /// Page size hint forwarded to the provider.
    pub limit: u32,
}

impl CommitQuery {
    /// Default page size when the caller does not ask for one.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Builds a query for `branch` with `limit` entries.
    #[must_use]
    pub fn new(branch: Option<&str>, limit: u32) -> Self {
        Self {
            branch: branch.map(ToOwned::to_owned),
            limit,
        }
    }
}

impl Default for CommitQuery {
    fn default() -> Self {
        Self {
            branch: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Gateway that lists repository metadata from one provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Provider served by this gateway.
    fn provider(&self) -> Provider;

    /// Whether requests are sent with a token.
    fn is_authenticated(&self) -> bool;

    /// List branches in provider order.
    async fn list_branches(
        &self,
        repository: &RepositoryIdentifier,
    ) -> Result<Vec<Branch>, GatewayError>;

    /// List commits, most recent first as returned by the provider.
    async fn list_commits(
        &self,
        repository: &RepositoryIdentifier,
        query: &CommitQuery,
    ) -> Result<Vec<Commit>, GatewayError>;

    /// List pull or merge requests; `state` is already in the provider's
    /// vocabulary.
    async fn list_pull_requests(
        &self,
        repository: &RepositoryIdentifier,
        state: &str,
    ) -> Result<Vec<PullRequest>, GatewayError>;
}

fn mismatched_identifier(provider: Provider, repository: &RepositoryIdentifier) -> GatewayError {
    GatewayError::InvalidIdentifier {
        message: format!("{provider} adapter cannot address {repository}"),
    }
}
