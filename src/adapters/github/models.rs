//! GitHub REST v3 response shapes.
//!
//! Only the fields the canonical model needs are declared; every one of them
//! is required, so a payload missing one fails to decode.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::models::{Branch, Commit, PullRequest};

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiBranch {
    pub(super) name: String,
    pub(super) commit: ApiCommitRef,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitRef {
    pub(super) sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommit {
    pub(super) sha: String,
    pub(super) commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitDetail {
    pub(super) message: String,
    pub(super) author: ApiGitActor,
}

/// Git-level author; `name` is the display name, not the account login.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiGitActor {
    pub(super) name: String,
    pub(super) date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) id: u64,
    pub(super) number: u64,
    pub(super) title: String,
    pub(super) user: ApiUser,
    pub(super) state: String,
    pub(super) created_at: DateTime<FixedOffset>,
    pub(super) head: ApiRef,
    pub(super) base: ApiRef,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRef {
    #[serde(rename = "ref")]
    pub(super) name: String,
}

impl From<ApiBranch> for Branch {
    fn from(value: ApiBranch) -> Self {
        Self {
            name: value.name,
            commit_sha: value.commit.sha,
        }
    }
}

impl From<ApiCommit> for Commit {
    fn from(value: ApiCommit) -> Self {
        Self {
            sha: value.sha,
            message: value.commit.message,
            author: value.commit.author.name,
            timestamp: value.commit.author.date,
        }
    }
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            id: value.id,
            number: value.number,
            title: value.title,
            author: value.user.login,
            state: value.state,
            created_at: value.created_at,
            source_branch: value.head.name,
            target_branch: value.base.name,
        }
    }
}
