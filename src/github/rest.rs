use crate::github::types::{Branch, Commit, RateLimitInfo, Repo, User};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use octocrab::models::{Author, RateLimit, Repository};
use serde::Deserialize;

// octocrab has no typed handler for a single branch, so its body is modelled here.

#[derive(Debug, Deserialize)]
pub struct RestAccount {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Deserialize)]
pub struct RestSignature {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestGitCommit {
    pub message: String,
    pub author: Option<RestSignature>,
    pub committer: Option<RestSignature>,
}

#[derive(Debug, Deserialize)]
pub struct RestBranchCommit {
    pub sha: String,
    pub commit: RestGitCommit,
    pub author: Option<RestAccount>,
    pub committer: Option<RestAccount>,
}

#[derive(Debug, Deserialize)]
pub struct RestBranch {
    pub name: String,
    pub commit: RestBranchCommit,
}

/// Route of the single-branch endpoint. Path segments are percent-encoded;
/// slashes inside the branch name stay literal, as GitHub expects.
pub fn branch_route(owner: &str, repo: &str, branch: &str) -> String {
    format!(
        "/repos/{}/{}/branches/{}",
        urlencoding::encode(owner),
        urlencoding::encode(repo),
        branch.split('/').map(urlencoding::encode).join("/")
    )
}

pub fn repo_from_rest(repo: Repository) -> Repo {
    let owner = repo.owner.map(user_from_author).unwrap_or_default();
    let name_with_owner = repo.full_name.unwrap_or_else(|| match owner.handle.as_deref() {
        Some(login) => format!("{login}/{}", repo.name),
        None => repo.name,
    });
    Repo {
        name_with_owner,
        owner,
    }
}

fn user_from_author(author: Author) -> User {
    User {
        avatar_url: author.avatar_url.to_string(),
        name: author.name.or_else(|| Some(author.login.clone())),
        handle: Some(author.login),
        email: author.email,
    }
}

pub fn branch_from_rest(branch: RestBranch) -> Branch {
    let RestBranchCommit {
        sha,
        commit,
        author,
        committer,
    } = branch.commit;

    Branch {
        name: branch.name,
        head: Commit {
            sha,
            message: commit.message,
            author: user_from_parts(commit.author, author),
            committer: user_from_parts(commit.committer, committer),
        },
    }
}

fn user_from_parts(signature: Option<RestSignature>, account: Option<RestAccount>) -> User {
    let (name, email) = signature.map(|s| (s.name, s.email)).unwrap_or_default();
    let (handle, avatar_url) = account
        .map(|a| (Some(a.login), a.avatar_url))
        .unwrap_or_default();
    User {
        avatar_url,
        handle,
        name,
        email,
    }
}

/// REST has no per-query cost, so every call counts as one.
pub fn rate_limit_from_rest(limits: RateLimit) -> RateLimitInfo {
    let core = limits.resources.core;
    let reset_at = DateTime::<Utc>::from_timestamp(core.reset as i64, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();
    RateLimitInfo {
        cost: 1,
        limit: core.limit as i64,
        node_count: 0,
        remaining: core.remaining as i64,
        used: core.used as i64,
        reset_at,
    }
}
