//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use mockall::predicate::{always, function};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::{ApiError, router};
use crate::adapters::{CommitQuery, MockProviderGateway};
use crate::error::GatewayError;
use crate::facade::GitFacade;
use crate::models::{Branch, Commit, PullRequest};
use crate::provider::{Provider, RepositoryIdentifier};

fn gateway_for(provider: Provider, authenticated: bool) -> MockProviderGateway {
    let mut gateway = MockProviderGateway::new();
    gateway.expect_provider().return_const(provider);
    gateway.expect_is_authenticated().return_const(authenticated);
    gateway
}

fn facade_with(github: MockProviderGateway, gitlab: MockProviderGateway) -> Arc<GitFacade> {
    Arc::new(
        GitFacade::new()
            .with_gateway(Arc::new(github))
            .with_gateway(Arc::new(gitlab)),
    )
}

fn idle_facade() -> Arc<GitFacade> {
    facade_with(
        gateway_for(Provider::GitHub, true),
        gateway_for(Provider::GitLab, false),
    )
}

async fn get_json(facade: Arc<GitFacade>, uri: &str) -> (StatusCode, Value) {
    let response = router(facade)
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, body)
}

fn at(raw: &str) -> chrono::DateTime<chrono::FixedOffset> {
    chrono::DateTime::parse_from_rfc3339(raw).expect("timestamp fixture should parse")
}

#[tokio::test]
async fn health_reports_up() {
    let (status, body) = get_json(idle_facade(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "UP", "service": "repobridge" }));
}

#[tokio::test]
async fn providers_lists_registered_tags() {
    let (status, body) = get_json(idle_facade(), "/api/git/providers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["github", "gitlab"]));
}

#[tokio::test]
async fn auth_status_reports_token_presence() {
    let (status, body) = get_json(idle_facade(), "/api/git/auth/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "github": true, "gitlab": false }));
}

#[tokio::test]
async fn unified_branches_serialise_camel_case() {
    let mut github = gateway_for(Provider::GitHub, true);
    github
        .expect_list_branches()
        .times(1)
        .returning(|_| {
            Ok(vec![Branch {
                name: "main".to_owned(),
                commit_sha: "deadbeef".to_owned(),
            }])
        });
    let facade = facade_with(github, gateway_for(Provider::GitLab, false));

    let (status, body) = get_json(
        facade,
        "/api/git/branches?provider=github&repository=octocat/hello",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "name": "main", "commitSha": "deadbeef" }]));
}

#[tokio::test]
async fn unified_commits_apply_default_limit() {
    let mut gitlab = gateway_for(Provider::GitLab, false);
    gitlab
        .expect_list_commits()
        .with(
            always(),
            function(|query: &CommitQuery| query.limit == 10 && query.branch.is_none()),
        )
        .times(1)
        .returning(|_, _| {
            Ok(vec![Commit {
                sha: "abc123".to_owned(),
                message: "fix bug".to_owned(),
                author: "alice".to_owned(),
                timestamp: at("2024-01-01T00:00:00+00:00"),
            }])
        });
    let facade = facade_with(gateway_for(Provider::GitHub, false), gitlab);

    let (status, body) = get_json(facade, "/api/git/commits?provider=gitlab&repository=42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "sha": "abc123",
            "message": "fix bug",
            "author": "alice",
            "timestamp": "2024-01-01T00:00:00+00:00"
        }])
    );
}

#[tokio::test]
async fn unified_pull_requests_default_to_open() {
    let mut gitlab = gateway_for(Provider::GitLab, false);
    gitlab
        .expect_list_pull_requests()
        .with(always(), function(|state: &str| state == "opened"))
        .times(1)
        .returning(|_, _| {
            Ok(vec![PullRequest {
                id: 1,
                number: 5,
                title: "T".to_owned(),
                author: "bob".to_owned(),
                state: "opened".to_owned(),
                created_at: at("2024-02-02T00:00:00+00:00"),
                source_branch: "feat".to_owned(),
                target_branch: "main".to_owned(),
            }])
        });
    let facade = facade_with(gateway_for(Provider::GitHub, false), gitlab);

    let (status, body) = get_json(
        facade,
        "/api/git/pull-requests?provider=gitlab&repository=42",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": 1,
            "number": 5,
            "title": "T",
            "author": "bob",
            "state": "opened",
            "createdAt": "2024-02-02T00:00:00+00:00",
            "sourceBranch": "feat",
            "targetBranch": "main"
        }])
    );
}

#[tokio::test]
async fn github_route_builds_identifier_from_owner_and_repo() {
    let mut github = gateway_for(Provider::GitHub, false);
    github
        .expect_list_pull_requests()
        .with(
            function(|repository: &RepositoryIdentifier| {
                repository.parts() == ("octocat", Some("hello"))
            }),
            function(|state: &str| state == "closed"),
        )
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    let facade = facade_with(github, gateway_for(Provider::GitLab, false));

    let (status, body) = get_json(
        facade,
        "/api/github/pull-requests?owner=octocat&repo=hello&state=closed",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn gitlab_route_reads_camel_case_project_id() {
    let mut gitlab = gateway_for(Provider::GitLab, false);
    gitlab
        .expect_list_commits()
        .with(
            function(|repository: &RepositoryIdentifier| repository.parts() == ("7", None)),
            function(|query: &CommitQuery| {
                query.branch.as_deref() == Some("develop") && query.limit == 2
            }),
        )
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    let facade = facade_with(gateway_for(Provider::GitHub, false), gitlab);

    let (status, _) = get_json(
        facade,
        "/api/gitlab/commits?projectId=7&branch=develop&limit=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn gitlab_merge_requests_translate_state() {
    let mut gitlab = gateway_for(Provider::GitLab, false);
    gitlab
        .expect_list_pull_requests()
        .with(always(), function(|state: &str| state == "all"))
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    let facade = facade_with(gateway_for(Provider::GitHub, false), gitlab);

    let (status, _) = get_json(facade, "/api/gitlab/merge-requests?projectId=7&state=all").await;

    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[case::unknown_provider("/api/git/branches?provider=bitbucket&repository=a/b", "unsupported provider: bitbucket")]
#[case::malformed_github("/api/git/branches?provider=github&repository=justone", "owner/repo")]
#[case::empty_github_owner("/api/github/branches?owner=&repo=hello", "owner must not be empty")]
#[case::missing_parameter("/api/git/branches?provider=github", "repository")]
#[case::non_numeric_limit("/api/git/commits?provider=github&repository=a/b&limit=many", "Failed to deserialize query string")]
#[tokio::test]
async fn validation_failures_answer_bad_request(#[case] uri: &str, #[case] fragment: &str) {
    let (status, body) = get_json(idle_facade(), uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("status"), Some(&json!(400)));
    assert_eq!(body.get("error"), Some(&json!("Bad Request")));
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .expect("message should be a string");
    assert!(
        message.contains(fragment),
        "expected '{fragment}' in '{message}'"
    );
}

#[tokio::test]
async fn remote_failures_answer_internal_server_error() {
    let mut github = gateway_for(Provider::GitHub, false);
    github.expect_list_branches().times(1).returning(|_| {
        Err(GatewayError::Remote {
            operation: "github branches".to_owned(),
            status: 404,
            body: "Not Found".to_owned(),
        })
    });
    let facade = facade_with(github, gateway_for(Provider::GitLab, false));

    let (status, body) = get_json(facade, "/api/github/branches?owner=octocat&repo=missing").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "status": 500,
            "error": "Internal Server Error",
            "message": "github branches failed with status 404: Not Found"
        })
    );
}

#[tokio::test]
async fn mapping_failures_answer_internal_server_error() {
    let mut gitlab = gateway_for(Provider::GitLab, false);
    gitlab.expect_list_branches().times(1).returning(|_| {
        Err(GatewayError::Mapping {
            message: "missing field `name`".to_owned(),
        })
    });
    let facade = facade_with(gateway_for(Provider::GitHub, false), gitlab);

    let (status, body) = get_json(facade, "/api/gitlab/branches?projectId=42").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.get("status"), Some(&json!(500)));
}

#[rstest]
#[case::unsupported_provider(
    GatewayError::UnsupportedProvider { provider: "bitbucket".to_owned() },
    StatusCode::BAD_REQUEST,
    "unsupported provider: bitbucket"
)]
#[case::network(
    GatewayError::Network { message: "connection reset".to_owned() },
    StatusCode::INTERNAL_SERVER_ERROR,
    "network error: connection reset"
)]
#[case::configuration(
    GatewayError::Configuration { message: "bad token".to_owned() },
    StatusCode::INTERNAL_SERVER_ERROR,
    "configuration error: bad token"
)]
fn gateway_errors_convert_to_api_errors(
    #[case] error: GatewayError,
    #[case] expected_status: StatusCode,
    #[case] expected_message: &str,
) {
    let api_error = ApiError::from(error);

    assert_eq!(api_error.status(), expected_status);
    assert_eq!(api_error.message(), expected_message);
}
