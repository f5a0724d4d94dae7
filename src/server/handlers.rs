//! Route handlers.
//!
//! Every listing handler returns a JSON array of entity dictionaries.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::error::ApiError;
use crate::adapters::CommitQuery;
use crate::facade::{DEFAULT_COMMIT_LIMIT, DEFAULT_PULL_REQUEST_STATE, GitFacade};
use crate::models::to_dicts;
use crate::provider::{Provider, RepositoryIdentifier};

type Dicts = Json<Vec<Map<String, Value>>>;
type Params<T> = Result<Query<T>, QueryRejection>;

const fn default_limit() -> u32 {
    DEFAULT_COMMIT_LIMIT
}

fn default_state() -> String {
    DEFAULT_PULL_REQUEST_STATE.to_owned()
}

#[derive(Debug, Deserialize)]
pub(super) struct RepositoryParams {
    provider: String,
    repository: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RepositoryCommitParams {
    provider: String,
    repository: String,
    branch: Option<String>,
    #[serde(default = "default_limit")]
    limit: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct RepositoryPullParams {
    provider: String,
    repository: String,
    #[serde(default = "default_state")]
    state: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GitHubParams {
    owner: String,
    repo: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GitHubCommitParams {
    owner: String,
    repo: String,
    branch: Option<String>,
    #[serde(default = "default_limit")]
    limit: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct GitHubPullParams {
    owner: String,
    repo: String,
    #[serde(default = "default_state")]
    state: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GitLabParams {
    project_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GitLabCommitParams {
    project_id: String,
    branch: Option<String>,
    #[serde(default = "default_limit")]
    limit: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GitLabMergeRequestParams {
    project_id: String,
    #[serde(default = "default_state")]
    state: String,
}

pub(super) async fn branches(
    State(facade): State<Arc<GitFacade>>,
    params: Params<RepositoryParams>,
) -> Result<Dicts, ApiError> {
    let Query(params) = params?;
    let branches = facade
        .get_branches(&params.provider, &params.repository)
        .await?;
    Ok(Json(to_dicts(branches)))
}

pub(super) async fn commits(
    State(facade): State<Arc<GitFacade>>,
    params: Params<RepositoryCommitParams>,
) -> Result<Dicts, ApiError> {
    let Query(params) = params?;
    let commits = facade
        .get_commits(
            &params.provider,
            &params.repository,
            params.branch.as_deref(),
            params.limit,
        )
        .await?;
    Ok(Json(to_dicts(commits)))
}

pub(super) async fn pull_requests(
    State(facade): State<Arc<GitFacade>>,
    params: Params<RepositoryPullParams>,
) -> Result<Dicts, ApiError> {
    let Query(params) = params?;
    let pulls = facade
        .get_pull_requests(&params.provider, &params.repository, &params.state)
        .await?;
    Ok(Json(to_dicts(pulls)))
}

pub(super) async fn providers(State(facade): State<Arc<GitFacade>>) -> Json<Vec<&'static str>> {
    Json(
        facade
            .providers()
            .into_iter()
            .map(Provider::as_str)
            .collect(),
    )
}

pub(super) async fn auth_status(
    State(facade): State<Arc<GitFacade>>,
) -> Json<BTreeMap<&'static str, bool>> {
    Json(
        facade
            .authentication_status()
            .into_iter()
            .map(|(provider, authenticated)| (provider.as_str(), authenticated))
            .collect(),
    )
}

pub(super) async fn github_branches(
    State(facade): State<Arc<GitFacade>>,
    params: Params<GitHubParams>,
) -> Result<Dicts, ApiError> {
    let Query(params) = params?;
    let identifier = RepositoryIdentifier::github(&params.owner, &params.repo)?;
    Ok(Json(to_dicts(facade.branches_for(&identifier).await?)))
}

pub(super) async fn github_commits(
    State(facade): State<Arc<GitFacade>>,
    params: Params<GitHubCommitParams>,
) -> Result<Dicts, ApiError> {
    let Query(params) = params?;
    let identifier = RepositoryIdentifier::github(&params.owner, &params.repo)?;
    let query = CommitQuery::new(params.branch.as_deref(), params.limit);
    Ok(Json(to_dicts(
        facade.commits_for(&identifier, &query).await?,
    )))
}

pub(super) async fn github_pull_requests(
    State(facade): State<Arc<GitFacade>>,
    params: Params<GitHubPullParams>,
) -> Result<Dicts, ApiError> {
    let Query(params) = params?;
    let identifier = RepositoryIdentifier::github(&params.owner, &params.repo)?;
    Ok(Json(to_dicts(
        facade.pull_requests_for(&identifier, &params.state).await?,
    )))
}

pub(super) async fn gitlab_branches(
    State(facade): State<Arc<GitFacade>>,
    params: Params<GitLabParams>,
) -> Result<Dicts, ApiError> {
    let Query(params) = params?;
    let identifier = RepositoryIdentifier::gitlab(&params.project_id);
    Ok(Json(to_dicts(facade.branches_for(&identifier).await?)))
}

pub(super) async fn gitlab_commits(
    State(facade): State<Arc<GitFacade>>,
    params: Params<GitLabCommitParams>,
) -> Result<Dicts, ApiError> {
    let Query(params) = params?;
    let identifier = RepositoryIdentifier::gitlab(&params.project_id);
    let query = CommitQuery::new(params.branch.as_deref(), params.limit);
    Ok(Json(to_dicts(
        facade.commits_for(&identifier, &query).await?,
    )))
}

pub(super) async fn gitlab_merge_requests(
    State(facade): State<Arc<GitFacade>>,
    params: Params<GitLabMergeRequestParams>,
) -> Result<Dicts, ApiError> {
    let Query(params) = params?;
    let identifier = RepositoryIdentifier::gitlab(&params.project_id);
    Ok(Json(to_dicts(
        facade.pull_requests_for(&identifier, &params.state).await?,
    )))
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "UP", "service": "repobridge" }))
}
