//! GitLab v4 response shapes.

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
    pub(super) id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommit {
    pub(super) id: String,
    pub(super) message: String,
    pub(super) author_name: String,
    pub(super) created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiMergeRequest {
    pub(super) id: u64,
    pub(super) iid: u64,
    pub(super) title: String,
    pub(super) author: ApiUser,
    pub(super) state: String,
    pub(super) created_at: DateTime<FixedOffset>,
    pub(super) source_branch: String,
    pub(super) target_branch: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) username: String,
}

impl From<ApiBranch> for Branch {
    fn from(value: ApiBranch) -> Self {
        Self {
            name: value.name,
            commit_sha: value.commit.id,
        }
    }
}

impl From<ApiCommit> for Commit {
    fn from(value: ApiCommit) -> Self {
        Self {
            sha: value.id,
            message: value.message,
            author: value.author_name,
            timestamp: value.created_at,
        }
    }
}

impl From<ApiMergeRequest> for PullRequest {
    fn from(value: ApiMergeRequest) -> Self {
        Self {
            id: value.id,
            number: value.iid,
            title: value.title,
            author: value.author.username,
            state: value.state,
            created_at: value.created_at,
            source_branch: value.source_branch,
            target_branch: value.target_branch,
        }
    }
}
