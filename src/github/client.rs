use crate::config::ApiFlavor;
use crate::error::{BranchscopeError, Result};
use crate::form::FieldTuple;
use crate::github::graphql::{self, QueryResponse};
use crate::github::rest::{self, RestBranch};
use crate::github::types::{BackendResponse, Data, RestErrorBody};
use crate::github::BranchLookup;
use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::Value;

#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::build(token, None)
    }

    fn build(token: &str, base_uri: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| BranchscopeError::GitHub(e.to_string()))?;
        }
        let octo = builder
            .build()
            .map_err(|e| BranchscopeError::GitHub(e.to_string()))?;

        Ok(Self { octo })
    }

    pub async fn branch_head_graphql(&self, owner: &str, repo: &str, branch: &str) -> Result<Value> {
        let body = graphql::request_body(owner, repo, branch);
        let response: QueryResponse = match self.octo.graphql(&body).await {
            Ok(r) => r,
            Err(e) => return error_payload(e),
        };
        to_payload(graphql::into_backend_response(response))
    }

    pub async fn branch_head_rest(&self, owner: &str, repo: &str, branch: &str) -> Result<Value> {
        let repository = match self.octo.repos(owner, repo).get().await {
            Ok(r) => r,
            Err(e) => return error_payload(e),
        };

        let branch_result: std::result::Result<RestBranch, _> = self
            .octo
            .get(rest::branch_route(owner, repo, branch), None::<&()>)
            .await;
        let head = match branch_result {
            Ok(b) => Some(rest::branch_from_rest(b)),
            Err(e) if is_not_found(&e) => None,
            Err(e) => return error_payload(e),
        };

        let rate_limit_info = match self.octo.ratelimit().get().await {
            Ok(limits) => Some(rest::rate_limit_from_rest(limits)),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read rate limit");
                None
            }
        };

        to_payload(BackendResponse::Data(Data {
            errors: None,
            rate_limit_info,
            branch: head,
            repo: Some(rest::repo_from_rest(repository)),
        }))
    }
}

fn to_payload(response: BackendResponse) -> Result<Value> {
    Ok(serde_json::to_value(response)?)
}

fn is_not_found(e: &octocrab::Error) -> bool {
    matches!(e, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

/// GitHub answered with an error body: that is a payload, not a transport failure.
fn error_payload(e: octocrab::Error) -> Result<Value> {
    match e {
        octocrab::Error::GitHub { source, .. } => Ok(serde_json::to_value(RestErrorBody {
            message: source.message.clone(),
            documentation_url: source.documentation_url.clone(),
        })?),
        other => Err(BranchscopeError::Transport(other.to_string())),
    }
}

/// Production lookup: a fresh client per tuple, since the token may change.
pub struct GitHubLookup {
    api: ApiFlavor,
}

impl GitHubLookup {
    pub fn new(api: ApiFlavor) -> Self {
        Self { api }
    }
}

#[async_trait]
impl BranchLookup for GitHubLookup {
    async fn lookup(&self, tuple: &FieldTuple) -> Result<Value> {
        let client = GitHubClient::new(&tuple.token)?;
        match self.api {
            ApiFlavor::Graphql => {
                client
                    .branch_head_graphql(&tuple.owner, &tuple.repo, &tuple.branch)
                    .await
            }
            ApiFlavor::Rest => {
                client
                    .branch_head_rest(&tuple.owner, &tuple.repo, &tuple.branch)
                    .await
            }
        }
    }
}
