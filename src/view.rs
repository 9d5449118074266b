use crate::github::types::{Branch, RateLimitInfo, Repo, User};
use crate::lookup::LookupResult;
use crate::reconcile::FetchStatus;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub role: &'static str,
    pub name: String,
    pub avatar_url: String,
}

impl Person {
    fn from_user(role: &'static str, user: &User) -> Self {
        Self {
            role,
            name: user.display_name().to_string(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCard {
    pub name_with_owner: String,
    pub owner: Person,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCard {
    pub name: String,
    pub sha: String,
    pub message: String,
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitCard {
    pub resets: String,
    pub usage: String,
    pub last_request: String,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Loading,
    ErrorLabel(String),
    ErrorLink { text: String, href: String },
    Repository(RepoCard),
    Branch(BranchCard),
    BranchMissing(String),
    RateLimit(RateLimitCard),
}

/// Maps the reconciler state to what the result panel shows, top to bottom.
pub fn fragments(
    status: FetchStatus,
    result: Option<&LookupResult>,
    branch_name: &str,
    now: DateTime<Utc>,
) -> Vec<Fragment> {
    if status == FetchStatus::Loading {
        return vec![Fragment::Loading];
    }

    let Some(result) = result else {
        return Vec::new();
    };

    match result {
        LookupResult::GraphqlError(message) | LookupResult::Transport(message) => {
            vec![Fragment::ErrorLabel(message.clone())]
        }
        LookupResult::RestError {
            message,
            documentation_url: Some(href),
        } => vec![Fragment::ErrorLink {
            text: message.clone(),
            href: href.clone(),
        }],
        LookupResult::RestError {
            message,
            documentation_url: None,
        } => vec![Fragment::ErrorLabel(message.clone())],
        LookupResult::Unrecognized(detail) => {
            vec![Fragment::ErrorLabel(format!("Unexpected response: {detail}"))]
        }
        LookupResult::Success(lookup) => {
            let mut out: Vec<Fragment> = lookup
                .errors
                .iter()
                .map(|e| Fragment::ErrorLabel(e.message.clone()))
                .collect();

            if let Some(ref repo) = lookup.repo {
                out.push(Fragment::Repository(repo_card(repo)));
            }
            match lookup.branch {
                Some(ref branch) => out.push(Fragment::Branch(branch_card(branch))),
                None if lookup.repo.is_some() => out.push(Fragment::BranchMissing(format!(
                    "Could not find branch {branch_name}"
                ))),
                None => {}
            }
            if let Some(ref rate) = lookup.rate_limit_info {
                out.push(Fragment::RateLimit(rate_limit_card(rate, now)));
            }
            out
        }
    }
}

fn repo_card(repo: &Repo) -> RepoCard {
    RepoCard {
        name_with_owner: repo.name_with_owner.clone(),
        owner: Person::from_user("Owner", &repo.owner),
    }
}

fn branch_card(branch: &Branch) -> BranchCard {
    BranchCard {
        name: branch.name.clone(),
        sha: branch.head.sha.clone(),
        message: branch.head.message.clone(),
        people: vec![
            Person::from_user("Author", &branch.head.author),
            Person::from_user("Committer", &branch.head.committer),
        ],
    }
}

pub fn rate_limit_card(rate: &RateLimitInfo, now: DateTime<Utc>) -> RateLimitCard {
    let ratio = if rate.limit > 0 {
        (rate.used as f64 / rate.limit as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    RateLimitCard {
        resets: reset_text(&rate.reset_at, now),
        usage: format!("Usage: {}/{}", rate.used, rate.limit),
        last_request: format!("Cost: {}, nodes: {}", rate.cost, rate.node_count),
        ratio,
    }
}

/// Whole minutes until reset, rounded down.
pub fn reset_text(reset_at: &str, now: DateTime<Utc>) -> String {
    let Ok(reset) = DateTime::parse_from_rfc3339(reset_at) else {
        return "Reset time unknown".to_string();
    };
    let secs = (reset.with_timezone(&Utc) - now).num_seconds();
    let minutes = secs.div_euclid(60);
    if minutes >= 0 {
        format!("Resets in {minutes} minutes")
    } else {
        "Already reset.".to_string()
    }
}
