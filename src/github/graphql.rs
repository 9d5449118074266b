use crate::github::types::{
    BackendResponse, Branch, Commit, Data, GraphqlErrorMessage, RateLimitInfo, Repo, User,
};
use serde::Deserialize;
use serde_json::{json, Value};

pub const BRANCH_HEAD_QUERY: &str = r#"
query BranchHeadCommitAuthor($owner: String!, $repoName: String!, $branch: String!) {
  rateLimit {
    cost
    limit
    nodeCount
    remaining
    resetAt
    used
  }
  repository(owner: $owner, name: $repoName) {
    nameWithOwner
    owner {
      login
      avatarUrl
      ... on User { name email }
      ... on Organization { name email }
    }
    ref(qualifiedName: $branch) {
      name
      target {
        __typename
        ... on Commit {
          oid
          message
          author { avatarUrl name email user { login } }
          committer { avatarUrl name email user { login } }
        }
      }
    }
  }
}
"#;

pub fn request_body(owner: &str, repo: &str, branch: &str) -> Value {
    json!({
        "query": BRANCH_HEAD_QUERY,
        "variables": {
            "owner": owner,
            "repoName": repo,
            "branch": branch,
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub data: Option<QueryData>,
    pub errors: Option<Vec<QueryError>>,
}

#[derive(Debug, Deserialize)]
pub struct QueryError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryData {
    pub rate_limit: Option<QueryRateLimit>,
    pub repository: Option<QueryRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRateLimit {
    pub cost: i64,
    pub limit: i64,
    pub node_count: i64,
    pub remaining: i64,
    pub reset_at: String,
    pub used: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRepository {
    pub name_with_owner: String,
    pub owner: QueryOwner,
    #[serde(rename = "ref")]
    pub git_ref: Option<QueryRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOwner {
    pub login: String,
    pub avatar_url: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryRef {
    pub name: String,
    pub target: Option<QueryTarget>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum QueryTarget {
    Commit(QueryCommit),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct QueryCommit {
    pub oid: String,
    pub message: String,
    pub author: Option<QueryGitActor>,
    pub committer: Option<QueryGitActor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryGitActor {
    pub avatar_url: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub user: Option<QueryLogin>,
}

#[derive(Debug, Deserialize)]
pub struct QueryLogin {
    pub login: String,
}

/// Collapses a raw query response into the backend's answer shape.
pub fn into_backend_response(response: QueryResponse) -> BackendResponse {
    match build_data(response) {
        Ok(data) => BackendResponse::Data(data),
        Err(message) => BackendResponse::Error(message),
    }
}

fn build_data(response: QueryResponse) -> std::result::Result<Data, String> {
    let data = response
        .data
        .ok_or_else(|| "No data on response".to_string())?;

    let branch = data
        .repository
        .as_ref()
        .and_then(|repo| repo.git_ref.as_ref())
        .map(branch_from_ref)
        .transpose()?;

    Ok(Data {
        rate_limit_info: data.rate_limit.map(|r| RateLimitInfo {
            cost: r.cost,
            limit: r.limit,
            node_count: r.node_count,
            remaining: r.remaining,
            used: r.used,
            reset_at: r.reset_at,
        }),
        repo: data.repository.map(|repo| Repo {
            name_with_owner: repo.name_with_owner,
            owner: User {
                avatar_url: repo.owner.avatar_url,
                handle: Some(repo.owner.login),
                name: repo.owner.name,
                email: repo.owner.email,
            },
        }),
        branch,
        errors: response.errors.map(|errors| {
            errors
                .into_iter()
                .map(|e| GraphqlErrorMessage { message: e.message })
                .collect()
        }),
    })
}

fn branch_from_ref(git_ref: &QueryRef) -> std::result::Result<Branch, String> {
    let target = git_ref
        .target
        .as_ref()
        .ok_or_else(|| "No target for branch".to_string())?;

    let QueryTarget::Commit(commit) = target else {
        return Err("ref does not appear to be a commit".to_string());
    };

    let author = commit
        .author
        .as_ref()
        .ok_or_else(|| format!("No author on commit {}", commit.oid))?;
    let committer = commit
        .committer
        .as_ref()
        .ok_or_else(|| format!("No committer on commit {}", commit.oid))?;

    Ok(Branch {
        name: git_ref.name.clone(),
        head: Commit {
            sha: commit.oid.clone(),
            message: commit.message.clone(),
            author: user_from_actor(author),
            committer: user_from_actor(committer),
        },
    })
}

fn user_from_actor(actor: &QueryGitActor) -> User {
    User {
        avatar_url: actor.avatar_url.clone(),
        handle: actor.user.as_ref().map(|u| u.login.clone()),
        name: actor.name.clone(),
        email: actor.email.clone(),
    }
}
