//! Provider-agnostic entry point.
//!
//! [`GitFacade`] turns a provider tag plus a raw repository string into a
//! [`RepositoryIdentifier`], translates request vocabulary where providers
//! disagree, and dispatches to the registered [`ProviderGateway`].

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::adapters::{CommitQuery, GitHubAdapter, GitLabAdapter, ProviderGateway};
use crate::config::RepobridgeConfig;
use crate::error::GatewayError;
use crate::models::{Branch, Commit, PullRequest};
use crate::provider::{Provider, RepositoryIdentifier};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Default number of commits requested when the caller does not say.
pub const DEFAULT_COMMIT_LIMIT: u32 = CommitQuery::DEFAULT_LIMIT;

/// Default pull request state, in GitHub vocabulary.
pub const DEFAULT_PULL_REQUEST_STATE: &str = "open";

/// Registry of provider gateways keyed by [`Provider`].
#[derive(Clone, Default)]
pub struct GitFacade {
    gateways: BTreeMap<Provider, Arc<dyn ProviderGateway>>,
}

impl GitFacade {
    /// Creates a facade with no providers registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `gateway` under the provider it reports, replacing any
    /// previous registration for that provider.
    #[must_use]
    pub fn with_gateway(mut self, gateway: Arc<dyn ProviderGateway>) -> Self {
        self.gateways.insert(gateway.provider(), gateway);
        self
    }

    /// Builds a facade with both adapters sharing one HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] when an API URL does not parse
    /// or the HTTP client cannot be built.
    pub fn from_config(config: &RepobridgeConfig) -> Result<Self, GatewayError> {
        let transport: Arc<dyn HttpTransport> =
            Arc::new(ReqwestTransport::new(config.request_timeout())?);
        let github = GitHubAdapter::new(config.github_settings()?, Arc::clone(&transport));
        let gitlab = GitLabAdapter::new(config.gitlab_settings()?, transport);

        Ok(Self::new()
            .with_gateway(Arc::new(github))
            .with_gateway(Arc::new(gitlab)))
    }

    /// Resolves a provider tag and repository string into an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnsupportedProvider`] for an unknown tag and
    /// [`GatewayError::InvalidIdentifier`] for a malformed GitHub repository.
    pub fn parse_identifier(
        provider: &str,
        repository: &str,
    ) -> Result<RepositoryIdentifier, GatewayError> {
        let parsed: Provider = provider.parse()?;
        RepositoryIdentifier::parse(parsed, repository)
    }

    /// Registered providers in tag order.
    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        self.gateways.keys().copied().collect()
    }

    /// Whether each registered provider has a token. Makes no remote call.
    #[must_use]
    pub fn authentication_status(&self) -> BTreeMap<Provider, bool> {
        self.gateways
            .iter()
            .map(|(provider, gateway)| (*provider, gateway.is_authenticated()))
            .collect()
    }

    /// Lists branches of `repository` on `provider`.
    ///
    /// # Errors
    ///
    /// Propagates identifier errors from [`Self::parse_identifier`] and
    /// remote or mapping errors from the adapter.
    pub async fn get_branches(
        &self,
        provider: &str,
        repository: &str,
    ) -> Result<Vec<Branch>, GatewayError> {
        let identifier = Self::parse_identifier(provider, repository)?;
        self.branches_for(&identifier).await
    }

    /// Lists up to `limit` commits, on `branch` when given.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get_branches`].
    pub async fn get_commits(
        &self,
        provider: &str,
        repository: &str,
        branch: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Commit>, GatewayError> {
        let identifier = Self::parse_identifier(provider, repository)?;
        self.commits_for(&identifier, &CommitQuery::new(branch, limit))
            .await
    }

    /// Lists pull or merge requests in `state`, given in GitHub vocabulary.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get_branches`].
    pub async fn get_pull_requests(
        &self,
        provider: &str,
        repository: &str,
        state: &str,
    ) -> Result<Vec<PullRequest>, GatewayError> {
        let identifier = Self::parse_identifier(provider, repository)?;
        self.pull_requests_for(&identifier, state).await
    }

    /// Lists branches of an already parsed identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnsupportedProvider`] when no gateway is
    /// registered for the identifier's provider, otherwise propagates adapter
    /// errors.
    pub async fn branches_for(
        &self,
        repository: &RepositoryIdentifier,
    ) -> Result<Vec<Branch>, GatewayError> {
        self.gateway(repository.provider())?
            .list_branches(repository)
            .await
    }

    /// Lists commits of an already parsed identifier.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::branches_for`].
    pub async fn commits_for(
        &self,
        repository: &RepositoryIdentifier,
        query: &CommitQuery,
    ) -> Result<Vec<Commit>, GatewayError> {
        self.gateway(repository.provider())?
            .list_commits(repository, query)
            .await
    }

    /// Lists pull requests of an already parsed identifier, translating
    /// `state` into the provider's vocabulary.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::branches_for`].
    pub async fn pull_requests_for(
        &self,
        repository: &RepositoryIdentifier,
        state: &str,
    ) -> Result<Vec<PullRequest>, GatewayError> {
        let provider = repository.provider();
        let native_state = map_state(provider, state);
        tracing::debug!(%provider, state, native_state, "listing pull requests");
        self.gateway(provider)?
            .list_pull_requests(repository, native_state)
            .await
    }

    fn gateway(&self, provider: Provider) -> Result<&Arc<dyn ProviderGateway>, GatewayError> {
        self.gateways
            .get(&provider)
            .ok_or_else(|| GatewayError::UnsupportedProvider {
                provider: provider.to_string(),
            })
    }
}

/// Translates a GitHub-vocabulary state into `provider`'s vocabulary.
///
/// GitHub values pass through unchanged. GitLab maps `open` to `opened`,
/// keeps `closed` and `all`, and falls back to `opened` for anything else.
#[must_use]
pub fn map_state(provider: Provider, state: &str) -> &str {
    match provider {
        Provider::GitHub => state,
        Provider::GitLab => gitlab_state(state),
    }
}

fn gitlab_state(state: &str) -> &'static str {
    match state {
        "closed" => "closed",
        "all" => "all",
        _ => "opened",
    }
}
