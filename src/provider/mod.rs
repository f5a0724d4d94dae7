//! Provider tags and repository identifiers.
//!
//! GitHub addresses a repository as `owner/repo`; GitLab addresses a project
//! by a numeric id or URL-encoded path. [`RepositoryIdentifier`] keeps the two
//! shapes apart so an adapter can never be handed the other provider's form.

use std::fmt;
use std::str::FromStr;

use crate::error::GatewayError;

/// Supported hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    /// GitHub REST v3.
    GitHub,
    /// GitLab REST v4.
    GitLab,
}

impl Provider {
    /// Every provider, in registration order.
    pub const ALL: [Self; 2] = [Self::GitHub, Self::GitLab];

    /// Returns the wire tag for this provider.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = GatewayError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == tag)
            .ok_or_else(|| GatewayError::UnsupportedProvider {
                provider: tag.to_owned(),
            })
    }
}

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    fn new(value: &str) -> Result<Self, GatewayError> {
        if value.is_empty() {
            return Err(GatewayError::InvalidIdentifier {
                message: "GitHub repository owner must not be empty".to_owned(),
            });
        }
        if is_dot_segment(value) {
            return Err(GatewayError::InvalidIdentifier {
                message: format!("GitHub repository owner must not be '{value}'"),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    fn new(value: &str) -> Result<Self, GatewayError> {
        if value.is_empty() {
            return Err(GatewayError::InvalidIdentifier {
                message: "GitHub repository name must not be empty".to_owned(),
            });
        }
        if is_dot_segment(value) {
            return Err(GatewayError::InvalidIdentifier {
                message: format!("GitHub repository name must not be '{value}'"),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn is_dot_segment(value: &str) -> bool {
    matches!(value, "." | "..")
}

/// GitLab project identifier: a numeric id or a URL-encoded path, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectId(String);

impl ProjectId {
    /// Borrow the project identifier.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A repository addressed the way its provider expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryIdentifier {
    /// GitHub `owner/repo`.
    GitHub {
        /// Repository owner (user or organisation).
        owner: RepositoryOwner,
        /// Repository name.
        repository: RepositoryName,
    },
    /// GitLab project.
    GitLab {
        /// Project id or URL-encoded path.
        project: ProjectId,
    },
}

impl RepositoryIdentifier {
    /// Parses a raw repository string for the given provider.
    ///
    /// GitHub requires exactly two non-empty `/`-separated segments, neither
    /// of them `.` or `..`. GitLab takes the string verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidIdentifier`] when a GitHub string is not
    /// `owner/repo`.
    pub fn parse(provider: Provider, repository: &str) -> Result<Self, GatewayError> {
        match provider {
            Provider::GitHub => {
                let segments: Vec<&str> = repository.split('/').collect();
                match segments.as_slice() {
                    [owner, name] => Self::github(owner, name),
                    _ => Err(GatewayError::InvalidIdentifier {
                        message: format!(
                            "GitHub repository should be in the format 'owner/repo', got '{repository}'"
                        ),
                    }),
                }
            }
            Provider::GitLab => Ok(Self::gitlab(repository)),
        }
    }

    /// Builds a GitHub identifier from its two parts.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidIdentifier`] when either part is empty
    /// or a dot segment.
    pub fn github(owner: &str, repository: &str) -> Result<Self, GatewayError> {
        Ok(Self::GitHub {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
        })
    }

    /// Builds a GitLab identifier; the value is not validated.
    #[must_use]
    pub fn gitlab(project: &str) -> Self {
        Self::GitLab {
            project: ProjectId(project.to_owned()),
        }
    }

    /// Provider this identifier belongs to.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        match self {
            Self::GitHub { .. } => Provider::GitHub,
            Self::GitLab { .. } => Provider::GitLab,
        }
    }

    /// The identifier split into its parts: `(owner, Some(repo))` for GitHub,
    /// `(project, None)` for GitLab.
    #[must_use]
    pub const fn parts(&self) -> (&str, Option<&str>) {
        match self {
            Self::GitHub { owner, repository } => (owner.as_str(), Some(repository.as_str())),
            Self::GitLab { project } => (project.as_str(), None),
        }
    }
}

impl fmt::Display for RepositoryIdentifier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub { owner, repository } => write!(
                formatter,
                "github:{}/{}",
                owner.as_str(),
                repository.as_str()
            ),
            Self::GitLab { project } => write!(formatter, "gitlab:{}", project.as_str()),
        }
    }
}
