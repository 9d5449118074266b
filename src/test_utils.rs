#![cfg(test)]

use crate::error::Result;
use crate::form::FieldTuple;
use crate::github::types::*;
use crate::store::{KeyValueStore, MemoryStore};
use std::sync::{Arc, Mutex};

/// Store handle that outlives the form owning it, to simulate a reload.
#[derive(Clone, Default)]
pub struct SharedStore(Arc<Mutex<MemoryStore>>);

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.lock().unwrap().set(key, value)
    }
}

pub fn complete_tuple() -> FieldTuple {
    FieldTuple {
        owner: "rust-lang".to_string(),
        repo: "rust".to_string(),
        branch: "main".to_string(),
        token: "ghp_test".to_string(),
    }
}

pub fn make_user(name: &str) -> User {
    User {
        avatar_url: format!("https://avatars.example/{name}"),
        handle: Some(name.to_lowercase()),
        name: Some(name.to_string()),
        email: None,
    }
}

pub fn sample_rate_limit() -> RateLimitInfo {
    RateLimitInfo {
        cost: 1,
        limit: 5000,
        node_count: 1,
        remaining: 4990,
        used: 10,
        reset_at: "2024-03-01T12:30:00Z".to_string(),
    }
}

pub fn sample_data() -> Data {
    Data {
        errors: None,
        rate_limit_info: Some(sample_rate_limit()),
        branch: Some(Branch {
            name: "main".to_string(),
            head: Commit {
                sha: "0123456789abcdef0123456789abcdef01234567".to_string(),
                message: "Merge pull request #1".to_string(),
                author: make_user("Ferris"),
                committer: make_user("Bors"),
            },
        }),
        repo: Some(Repo {
            name_with_owner: "rust-lang/rust".to_string(),
            owner: make_user("rust-lang"),
        }),
    }
}

/// A GitHub account object with every field octocrab's `Author` requires.
pub fn author_json(login: &str) -> serde_json::Value {
    let api = format!("https://api.github.com/users/{login}");
    serde_json::json!({
        "login": login,
        "id": 1,
        "node_id": "MDQ6VXNlcjE=",
        "avatar_url": format!("https://avatars.example/{login}"),
        "gravatar_id": "",
        "url": api,
        "html_url": format!("https://github.com/{login}"),
        "followers_url": format!("{api}/followers"),
        "following_url": format!("{api}/following"),
        "gists_url": format!("{api}/gists"),
        "starred_url": format!("{api}/starred"),
        "subscriptions_url": format!("{api}/subscriptions"),
        "organizations_url": format!("{api}/orgs"),
        "repos_url": format!("{api}/repos"),
        "events_url": format!("{api}/events"),
        "received_events_url": format!("{api}/received_events"),
        "type": "User",
        "site_admin": false
    })
}

/// Body of `GET /rate_limit` with the same numbers for every resource.
pub fn rate_limit_json(limit: u64, used: u64, reset: u64) -> serde_json::Value {
    let rate = serde_json::json!({
        "limit": limit,
        "used": used,
        "remaining": limit - used,
        "reset": reset
    });
    serde_json::json!({
        "resources": { "core": rate.clone(), "search": rate.clone() },
        "rate": rate
    })
}
