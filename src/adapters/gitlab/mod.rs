//! GitLab v4 adapter.
//!
//! Projects are addressed by a numeric id or a `group/project` path. A path
//! may arrive raw or already URL-encoded (`group%2Fproject`); either way it
//! is sent as one encoded path segment.

mod models;

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use http::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::models::{Branch, Commit, PullRequest};
use crate::provider::{Provider, RepositoryIdentifier};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

use self::models::{ApiBranch, ApiCommit, ApiMergeRequest};
use super::response::decode_success;
use super::{CommitQuery, ProviderGateway, ProviderSettings, mismatched_identifier};

const PRIVATE_TOKEN: HeaderName = HeaderName::from_static("private-token");

/// Adapter for `projects/{id}/...` endpoints.
pub struct GitLabAdapter {
    settings: ProviderSettings,
    transport: Arc<dyn HttpTransport>,
}

impl GitLabAdapter {
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

    /// Lists branches of a project.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Remote`] on a non-2xx response,
    /// [`GatewayError::Network`] when GitLab is unreachable and
    /// [`GatewayError::Mapping`] when a branch lacks `name` or `commit.id`.
    pub async fn branches(&self, project_id: &str) -> Result<Vec<Branch>, GatewayError> {
        let payload: Vec<ApiBranch> = self
            .fetch(
                "gitlab branches",
                &["projects", project_id, "repository", "branches"],
                Vec::new(),
            )
            .await?;
        Ok(payload.into_iter().map(ApiBranch::into).collect())
    }

    /// Lists commits of a project, optionally on `query.branch`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::branches`].
    pub async fn commits(
        &self,
        project_id: &str,
        query: &CommitQuery,
    ) -> Result<Vec<Commit>, GatewayError> {
        let mut params = vec![("per_page".to_owned(), query.limit.to_string())];
        if let Some(branch) = query.branch.as_deref() {
            params.push(("ref_name".to_owned(), branch.to_owned()));
        }

        let payload: Vec<ApiCommit> = self
            .fetch(
                "gitlab commits",
                &["projects", project_id, "repository", "commits"],
                params,
            )
            .await?;
        Ok(payload.into_iter().map(ApiCommit::into).collect())
    }

    /// Lists merge requests of a project in GitLab's `state` vocabulary
    /// (`opened`, `closed`, `merged`, `all`).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::branches`].
    pub async fn merge_requests(
        &self,
        project_id: &str,
        state: &str,
    ) -> Result<Vec<PullRequest>, GatewayError> {
        let payload: Vec<ApiMergeRequest> = self
            .fetch(
                "gitlab merge requests",
                &["projects", project_id, "merge_requests"],
                vec![("state".to_owned(), state.to_owned())],
            )
            .await?;
        Ok(payload.into_iter().map(ApiMergeRequest::into).collect())
    }

    fn headers(&self) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self.settings.token.as_deref() {
            let mut value =
                HeaderValue::from_str(token).map_err(|error| GatewayError::Configuration {
                    message: format!("GitLab token is not a valid header value: {error}"),
                })?;
            value.set_sensitive(true);
            headers.insert(PRIVATE_TOKEN, value);
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
        let segments = path
            .iter()
            .copied()
            .map(decode_segment)
            .collect::<Result<Vec<_>, _>>()?;
        let request = HttpRequest {
            url: self.settings.endpoint(segments)?,
            headers: self.headers()?,
            query,
        };
        let response = self.transport.get(&request).await?;
        decode_success(operation, response)
    }
}

/// Undoes any percent-encoding the caller applied so the endpoint builder
/// encodes the segment exactly once.
fn decode_segment(segment: &str) -> Result<Cow<'_, str>, GatewayError> {
    urlencoding::decode(segment).map_err(|error| GatewayError::InvalidIdentifier {
        message: format!("GitLab project '{segment}' is not valid UTF-8 once decoded: {error}"),
    })
}

fn project_id(repository: &RepositoryIdentifier) -> Result<&str, GatewayError> {
    match repository {
        RepositoryIdentifier::GitLab { project } => Ok(project.as_str()),
        RepositoryIdentifier::GitHub { .. } => {
            Err(mismatched_identifier(Provider::GitLab, repository))
        }
    }
}

#[async_trait]
impl ProviderGateway for GitLabAdapter {
    fn provider(&self) -> Provider {
        Provider::GitLab
    }

    fn is_authenticated(&self) -> bool {
        self.settings.has_token()
    }

    async fn list_branches(
        &self,
        repository: &RepositoryIdentifier,
    ) -> Result<Vec<Branch>, GatewayError> {
        self.branches(project_id(repository)?).await
    }

    async fn list_commits(
        &self,
        repository: &RepositoryIdentifier,
        query: &CommitQuery,
    ) -> Result<Vec<Commit>, GatewayError> {
        self.commits(project_id(repository)?, query).await
    }

    async fn list_pull_requests(
        &self,
        repository: &RepositoryIdentifier,
        state: &str,
    ) -> Result<Vec<PullRequest>, GatewayError> {
        self.merge_requests(project_id(repository)?, state).await
    }
}
