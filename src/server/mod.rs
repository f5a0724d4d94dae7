//! HTTP JSON API over the [`GitFacade`].
//!
//! | Route | Query |
//! |---|---|
//! | `/api/git/branches` | `provider`, `repository` |
//! | `/api/git/commits` | `provider`, `repository`, `branch?`, `limit?` |
//! | `/api/git/pull-requests` | `provider`, `repository`, `state?` |
//! | `/api/git/providers` | |
//! | `/api/git/auth/status` | |
//! | `/api/github/{branches,commits,pull-requests}` | `owner`, `repo`, ... |
//! | `/api/gitlab/{branches,commits,merge-requests}` | `projectId`, ... |
//! | `/api/health` | |
//!
//! Validation failures answer 400; upstream and internal failures answer 500.

mod error;
mod handlers;

pub use error::ApiError;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::error::GatewayError;
use crate::facade::GitFacade;

/// Builds the router with every route bound to `facade`.
#[must_use]
pub fn router(facade: Arc<GitFacade>) -> Router {
    Router::new()
        .route("/api/git/branches", get(handlers::branches))
        .route("/api/git/commits", get(handlers::commits))
        .route("/api/git/pull-requests", get(handlers::pull_requests))
        .route("/api/git/providers", get(handlers::providers))
        .route("/api/git/auth/status", get(handlers::auth_status))
        .route("/api/github/branches", get(handlers::github_branches))
        .route("/api/github/commits", get(handlers::github_commits))
        .route(
            "/api/github/pull-requests",
            get(handlers::github_pull_requests),
        )
        .route("/api/gitlab/branches", get(handlers::gitlab_branches))
        .route("/api/gitlab/commits", get(handlers::gitlab_commits))
        .route(
            "/api/gitlab/merge-requests",
            get(handlers::gitlab_merge_requests),
        )
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(facade)
}

/// Serves the router on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`GatewayError::Io`] when the server stops with an I/O error.
pub async fn serve<F>(
    listener: TcpListener,
    facade: Arc<GitFacade>,
    shutdown: F,
) -> Result<(), GatewayError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        tracing::info!(%address, "repobridge listening");
    }

    axum::serve(listener, router(facade))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|error| GatewayError::Io {
            message: error.to_string(),
        })?;

    tracing::info!("repobridge stopped");
    Ok(())
}

#[cfg(test)]
mod tests;
