use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub avatar_url: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.handle.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub name_with_owner: String,
    pub owner: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author: User,
    pub committer: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub head: Commit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlErrorMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub cost: i64,
    pub limit: i64,
    pub node_count: i64,
    pub remaining: i64,
    pub used: i64,
    pub reset_at: String,
}

/// Success body handed back by a lookup; every part is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Data {
    #[serde(default)]
    pub errors: Option<Vec<GraphqlErrorMessage>>,
    #[serde(default)]
    pub rate_limit_info: Option<RateLimitInfo>,
    #[serde(default)]
    pub branch: Option<Branch>,
    #[serde(default)]
    pub repo: Option<Repo>,
}

/// Wire form of a backend answer: `{"Data": {...}}` or `{"Error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackendResponse {
    Data(Data),
    Error(String),
}

/// GitHub's REST error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestErrorBody {
    pub message: String,
    pub documentation_url: Option<String>,
}
