//! GitHub REST v3 adapter.

mod models;

use std::sync::Arc;

use async_trait::async_trait;
use http::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::models::{Branch, Commit, PullRequest};
use crate::provider::{Provider, RepositoryIdentifier};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

use self::models::{ApiBranch, ApiCommit, ApiPullRequest};
use super::response::decode_success;
use super::{CommitQuery, ProviderGateway, ProviderSettings, mismatched_identifier};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Adapter for `repos/{owner}/{repo}/...` endpoints.
pub struct GitHubAdapter {
    settings: ProviderSettings,
    transport: Arc<dyn HttpTransport>,
}

impl GitHubAdapter {
    /// Creates an adapter that sends requests through `transport`.
    #[must_use]
    pub fn new(settings: ProviderSettings, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Creates an adapter with its own reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn from_settings(settings: ProviderSettings) -> Result<Self, GatewayError> {
        let transport = ReqwestTransport::new(settings.timeout)?;
        Ok(Self::new(settings, Arc::new(transport)))
    }

    /// Lists branches of `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Remote`] on a non-2xx response,
    /// [`GatewayError::Network`] when GitHub is unreachable and
    /// [`GatewayError::Mapping`] when a branch lacks `name` or `commit.sha`.
    pub async fn branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, GatewayError> {
        let payload: Vec<ApiBranch> = self
            .fetch(
                "github branches",
                &["repos", owner, repo, "branches"],
                Vec::new(),
            )
            .await?;
        Ok(payload.into_iter().map(ApiBranch::into).collect())
    }

    /// Lists commits of `owner/repo`, optionally starting at `query.branch`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::branches`].
    pub async fn commits(
        &self,
        owner: &str,
        repo: &str,
        query: &CommitQuery,
    ) -> Result<Vec<Commit>, GatewayError> {
        let mut params = vec![("per_page".to_owned(), query.limit.to_string())];
        if let Some(branch) = query.branch.as_deref() {
            params.push(("sha".to_owned(), branch.to_owned()));
        }

        let payload: Vec<ApiCommit> = self
            .fetch(
                "github commits",
                &["repos", owner, repo, "commits"],
                params,
            )
            .await?;
        Ok(payload.into_iter().map(ApiCommit::into).collect())
    }

    /// Lists pull requests of `owner/repo` in `state` (`open`, `closed`,
    /// `all`). The value is forwarded unchecked.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::branches`].
    pub async fn pull_requests(
        &self,
        owner: &str,
        repo: &str,
        state: &str,
    ) -> Result<Vec<PullRequest>, GatewayError> {
        let payload: Vec<ApiPullRequest> = self
            .fetch(
                "github pull requests",
                &["repos", owner, repo, "pulls"],
                vec![("state".to_owned(), state.to_owned())],
            )
            .await?;
        Ok(payload.into_iter().map(ApiPullRequest::into).collect())
    }

    fn headers(&self) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        if let Some(token) = self.settings.token.as_deref() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|error| {
                GatewayError::Configuration {
                    message: format!("GitHub token is not a valid header value: {error}"),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    async fn fetch<T>(
        &self,
        operation: &str,
        path: &[&str],
        query: Vec<(String, String)>,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let request = HttpRequest {
            url: self.settings.endpoint(path)?,
            headers: self.headers()?,
            query,
        };
        let response = self.transport.get(&request).await?;
        decode_success(operation, response)
    }
}

fn github_parts(repository: &RepositoryIdentifier) -> Result<(&str, &str), GatewayError> {
    match repository {
        RepositoryIdentifier::GitHub {
            owner,
            repository: name,
        } => Ok((owner.as_str(), name.as_str())),
        RepositoryIdentifier::GitLab { .. } => {
            Err(mismatched_identifier(Provider::GitHub, repository))
        }
    }
}

#[async_trait]
impl ProviderGateway for GitHubAdapter {
    fn provider(&self) -> Provider {
        Provider::GitHub
    }

    fn is_authenticated(&self) -> bool {
        self.settings.has_token()
    }

    async fn list_branches(
        &self,
        repository: &RepositoryIdentifier,
    ) -> Result<Vec<Branch>, GatewayError> {
        let (owner, repo) = github_parts(repository)?;
        self.branches(owner, repo).await
    }

    async fn list_commits(
        &self,
        repository: &RepositoryIdentifier,
        query: &CommitQuery,
    ) -> Result<Vec<Commit>, GatewayError> {
        let (owner, repo) = github_parts(repository)?;
        self.commits(owner, repo, query).await
    }

    async fn list_pull_requests(
        &self,
        repository: &RepositoryIdentifier,
        state: &str,
    ) -> Result<Vec<PullRequest>, GatewayError> {
        let (owner, repo) = github_parts(repository)?;
        self.pull_requests(owner, repo, state).await
    }
}
