//! Canonical entities shared by every provider.
//!
//! Adapters deserialise provider payloads into their own `Api*` types and
//! convert them into the records below. The records are plain snapshots: they
//! carry no reference back to the repository or provider they came from, so a
//! caller that needs provenance tracks it alongside the returned collection.

use chrono::{DateTime, FixedOffset, SecondsFormat, SubsecRound, Timelike};
use serde_json::{Map, Value};

/// A branch and the commit at its tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Branch name, unique within one repository snapshot.
    pub name: String,
    /// Hash of the tip commit.
    pub commit_sha: String,
}

/// A single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Provider-native commit hash.
    pub sha: String,
    /// Full commit message; may be empty.
    pub message: String,
    /// Author display name.
    pub author: String,
    /// Authoring time with its original UTC offset.
    pub timestamp: DateTime<FixedOffset>,
}

/// A GitHub pull request or GitLab merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Provider-global identifier. Not unique across providers.
    pub id: u64,
    /// Repository-local sequence number (GitHub `number`, GitLab `iid`).
    pub number: u64,
    /// Title.
    pub title: String,
    /// Author login or username.
    pub author: String,
    /// State as reported by the provider (e.g. `open`, `opened`, `merged`).
    pub state: String,
    /// Creation time with its original UTC offset.
    pub created_at: DateTime<FixedOffset>,
    /// Ref the changes come from.
    pub source_branch: String,
    /// Ref the changes are proposed into.
    pub target_branch: String,
}

/// Closed union over the canonical entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// A branch.
    Branch(Branch),
    /// A commit.
    Commit(Commit),
    /// A pull or merge request.
    PullRequest(PullRequest),
}

impl Entity {
    /// Renders the entity as a camelCase key/value mapping.
    ///
    /// Timestamps are written as ISO-8601 strings with an explicit offset,
    /// e.g. `2024-01-01T00:00:00+00:00`.
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        match self {
            Self::Branch(branch) => {
                fields.insert("name".to_owned(), Value::from(branch.name.as_str()));
                fields.insert(
                    "commitSha".to_owned(),
                    Value::from(branch.commit_sha.as_str()),
                );
            }
            Self::Commit(commit) => {
                fields.insert("sha".to_owned(), Value::from(commit.sha.as_str()));
                fields.insert("message".to_owned(), Value::from(commit.message.as_str()));
                fields.insert("author".to_owned(), Value::from(commit.author.as_str()));
                fields.insert(
                    "timestamp".to_owned(),
                    Value::from(format_timestamp(&commit.timestamp)),
                );
            }
            Self::PullRequest(pull) => {
                fields.insert("id".to_owned(), Value::from(pull.id));
                fields.insert("number".to_owned(), Value::from(pull.number));
                fields.insert("title".to_owned(), Value::from(pull.title.as_str()));
                fields.insert("author".to_owned(), Value::from(pull.author.as_str()));
                fields.insert("state".to_owned(), Value::from(pull.state.as_str()));
                fields.insert(
                    "createdAt".to_owned(),
                    Value::from(format_timestamp(&pull.created_at)),
                );
                fields.insert(
                    "sourceBranch".to_owned(),
                    Value::from(pull.source_branch.as_str()),
                );
                fields.insert(
                    "targetBranch".to_owned(),
                    Value::from(pull.target_branch.as_str()),
                );
            }
        }
        fields
    }
}

impl From<Branch> for Entity {
    fn from(value: Branch) -> Self {
        Self::Branch(value)
    }
}

impl From<Commit> for Entity {
    fn from(value: Commit) -> Self {
        Self::Commit(value)
    }
}

impl From<PullRequest> for Entity {
    fn from(value: PullRequest) -> Self {
        Self::PullRequest(value)
    }
}

/// Serialises a collection of entities into key/value mappings, keeping order.
#[must_use]
pub fn to_dicts<T>(items: Vec<T>) -> Vec<Map<String, Value>>
where
    T: Into<Entity>,
{
    items
        .into_iter()
        .map(|item| item.into().to_dict())
        .collect()
}

/// Formats a timestamp as ISO-8601 with a `+HH:MM` offset (never `Z`).
///
/// Sub-second precision is truncated to microseconds and written as six
/// digits, or omitted entirely when it truncates to zero.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    let truncated = timestamp.trunc_subsecs(6);
    let precision = if truncated.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    truncated.to_rfc3339_opts(precision, false)
}
