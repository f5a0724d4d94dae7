//! Repobridge: one API over GitHub and GitLab repository metadata.
//!
//! The library parses provider-specific repository identifiers, translates
//! request vocabulary between providers, and flattens GitHub REST v3 and
//! GitLab v4 payloads into a single set of entities ([`Branch`], [`Commit`],
//! [`PullRequest`]). The [`server`] module exposes the same operations as an
//! HTTP JSON API.
//!
//! ```no_run
//! use repobridge::{GitFacade, RepobridgeConfig, to_dicts};
//!
//! # async fn run() -> Result<(), repobridge::GatewayError> {
//! let facade = GitFacade::from_config(&RepobridgeConfig::default())?;
//! let branches = facade.get_branches("github", "rust-lang/rust").await?;
//! let rows = to_dicts(branches);
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod facade;
pub mod models;
pub mod provider;
pub mod server;
pub mod telemetry;
pub mod transport;

pub use adapters::{CommitQuery, GitHubAdapter, GitLabAdapter, ProviderGateway, ProviderSettings};
pub use config::RepobridgeConfig;
pub use error::{ErrorClass, GatewayError};
pub use facade::{GitFacade, map_state};
pub use models::{Branch, Commit, Entity, PullRequest, to_dicts};
pub use provider::{Provider, RepositoryIdentifier};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
