//! Decoding of lookup payloads into [`LookupResult`].
//!
//! A payload is whatever JSON the lookup backend resolved with. The shapes
//! understood here are:
//!
//! * `{"Error": "..."}`: a GraphQL-style error raised by the backend itself
//! * `{"message": "...", "documentation_url": "..."}`: a GitHub REST error
//! * `{"Data": {...}}` or the same object unwrapped: branch/repo/rate-limit
//!   data, any part of which may be missing
//! * `{"errors": [{"message": "..."}]}` with no data: GraphQL errors only

use crate::github::types::{Branch, Data, GraphqlErrorMessage, RateLimitInfo, Repo};
use itertools::Itertools;
use serde_json::{Map, Value};

const DATA_KEYS: &[&str] = &["branch", "repo", "rate_limit_info", "errors"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lookup {
    pub branch: Option<Branch>,
    pub repo: Option<Repo>,
    pub rate_limit_info: Option<RateLimitInfo>,
    pub errors: Vec<GraphqlErrorMessage>,
}

impl From<Data> for Lookup {
    fn from(data: Data) -> Self {
        Self {
            branch: data.branch,
            repo: data.repo,
            rate_limit_info: data.rate_limit_info,
            errors: data.errors.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Success(Lookup),
    GraphqlError(String),
    RestError {
        message: String,
        documentation_url: Option<String>,
    },
    Transport(String),
    /// Payload matched none of the known shapes.
    Unrecognized(String),
}

pub fn classify(payload: &Value) -> LookupResult {
    let Some(obj) = payload.as_object() else {
        return LookupResult::Unrecognized(format!("expected an object, got {}", kind_of(payload)));
    };

    if let Some(err) = obj.get("Error") {
        return LookupResult::GraphqlError(
            err.as_str()
                .map(String::from)
                .unwrap_or_else(|| err.to_string()),
        );
    }

    if let (Some(message), true) = (
        obj.get("message").and_then(Value::as_str),
        obj.contains_key("documentation_url"),
    ) {
        return LookupResult::RestError {
            message: message.to_string(),
            documentation_url: obj
                .get("documentation_url")
                .and_then(Value::as_str)
                .map(String::from),
        };
    }

    let data = match obj.get("Data") {
        Some(Value::Object(inner)) => inner,
        Some(other) => {
            return LookupResult::Unrecognized(format!("Data is {}", kind_of(other)));
        }
        None if DATA_KEYS.iter().any(|k| obj.contains_key(*k)) => obj,
        None => {
            return LookupResult::Unrecognized(format!(
                "unknown payload keys: {}",
                obj.keys().join(", ")
            ));
        }
    };

    decode_data(data)
}

fn decode_data(data: &Map<String, Value>) -> LookupResult {
    let data: Data = match serde_json::from_value(Value::Object(data.clone())) {
        Ok(d) => d,
        Err(e) => return LookupResult::Unrecognized(format!("malformed data: {e}")),
    };
    let lookup = Lookup::from(data);

    let nothing_found =
        lookup.branch.is_none() && lookup.repo.is_none() && lookup.rate_limit_info.is_none();
    if nothing_found && !lookup.errors.is_empty() {
        return LookupResult::GraphqlError(lookup.errors.iter().map(|e| &e.message).join("; "));
    }

    LookupResult::Success(lookup)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
