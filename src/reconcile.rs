use crate::error::BranchscopeError;
use crate::form::FieldTuple;
use crate::lookup::{self, LookupResult};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Settled,
}

/// A lookup the caller must run; its generation tags the completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub tuple: FieldTuple,
}

#[derive(Debug, Default)]
pub struct Reconciler {
    generation: u64,
    issued: Option<FieldTuple>,
    loading: bool,
    result: Option<LookupResult>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FetchStatus {
        if self.loading {
            FetchStatus::Loading
        } else if self.result.is_some() {
            FetchStatus::Settled
        } else {
            FetchStatus::Idle
        }
    }

    pub fn result(&self) -> Option<&LookupResult> {
        self.result.as_ref()
    }

    /// The tuple behind the current lookup, which may differ from the form.
    pub fn issued(&self) -> Option<&FieldTuple> {
        self.issued.as_ref()
    }

    pub fn on_tuple_change(&mut self, tuple: &FieldTuple) -> Option<FetchTicket> {
        if !tuple.is_complete() {
            return None;
        }
        // Compared with the last issued tuple, so returning to it after an
        // incomplete edit does not re-issue.
        if self.issued.as_ref() == Some(tuple) {
            return None;
        }

        self.generation += 1;
        self.issued = Some(tuple.clone());
        self.loading = true;
        self.result = None;

        tracing::info!(
            generation = self.generation,
            repo = %tuple.repo_path(),
            branch = %tuple.branch,
            "Issuing lookup"
        );

        Some(FetchTicket {
            generation: self.generation,
            tuple: tuple.clone(),
        })
    }

    /// Returns `false` when the completion belongs to a superseded lookup.
    pub fn settle(
        &mut self,
        generation: u64,
        outcome: std::result::Result<Value, BranchscopeError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale lookup result"
            );
            return false;
        }

        let result = match outcome {
            Ok(payload) => lookup::classify(&payload),
            Err(e) => {
                tracing::error!(generation, error = %e, "Lookup failed");
                LookupResult::Transport(e.to_string())
            }
        };

        if let LookupResult::Unrecognized(ref detail) = result {
            tracing::warn!(generation, detail = %detail, "Unrecognized lookup payload");
        }

        self.loading = false;
        self.result = Some(result);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::complete_tuple;
    use serde_json::json;

    #[test]
    fn incomplete_tuple_stays_idle() {
        let mut rec = Reconciler::new();
        let mut tuple = complete_tuple();
        tuple.branch.clear();
        assert_eq!(rec.on_tuple_change(&tuple), None);
        assert_eq!(rec.status(), FetchStatus::Idle);

        tuple = FieldTuple::default();
        assert_eq!(rec.on_tuple_change(&tuple), None);
        assert_eq!(rec.status(), FetchStatus::Idle);
    }

    #[test]
    fn complete_tuple_issues_once() {
        let mut rec = Reconciler::new();
        let tuple = complete_tuple();
        let ticket = rec.on_tuple_change(&tuple).expect("ticket");
        assert_eq!(ticket.generation, 1);
        assert_eq!(ticket.tuple, tuple);
        assert_eq!(rec.status(), FetchStatus::Loading);

        assert_eq!(rec.on_tuple_change(&tuple.clone()), None);
        rec.settle(ticket.generation, Ok(json!({ "Error": "nope" })));
        assert_eq!(rec.on_tuple_change(&tuple), None);
        assert_eq!(rec.status(), FetchStatus::Settled);
    }

    #[test]
    fn issued_tuple_ignores_incomplete_edits() {
        let mut rec = Reconciler::new();
        assert_eq!(rec.issued(), None);
        let tuple = complete_tuple();
        rec.on_tuple_change(&tuple).unwrap();

        let mut edited = tuple.clone();
        edited.owner.clear();
        edited.branch = "dev".to_string();
        assert_eq!(rec.on_tuple_change(&edited), None);
        assert_eq!(rec.issued(), Some(&tuple));
    }

    #[test]
    fn changed_tuple_issues_again() {
        let mut rec = Reconciler::new();
        let mut tuple = complete_tuple();
        rec.on_tuple_change(&tuple).unwrap();
        tuple.branch = "dev".to_string();
        let ticket = rec.on_tuple_change(&tuple).expect("second ticket");
        assert_eq!(ticket.generation, 2);
    }

    #[test]
    fn rejection_still_settles() {
        let mut rec = Reconciler::new();
        let ticket = rec.on_tuple_change(&complete_tuple()).unwrap();
        let applied = rec.settle(
            ticket.generation,
            Err(BranchscopeError::Transport("connection reset".into())),
        );
        assert!(applied);
        assert_eq!(rec.status(), FetchStatus::Settled);
        assert_eq!(
            rec.result(),
            Some(&LookupResult::Transport(
                "transport error: connection reset".into()
            ))
        );
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut rec = Reconciler::new();
        let mut tuple = complete_tuple();
        let first = rec.on_tuple_change(&tuple).unwrap();
        tuple.repo = "cargo".to_string();
        let second = rec.on_tuple_change(&tuple).unwrap();

        assert!(rec.settle(second.generation, Ok(json!({ "Error": "second" }))));
        assert!(!rec.settle(first.generation, Ok(json!({ "Error": "first" }))));
        assert_eq!(
            rec.result(),
            Some(&LookupResult::GraphqlError("second".into()))
        );
    }

    #[test]
    fn stale_completion_does_not_end_loading() {
        let mut rec = Reconciler::new();
        let mut tuple = complete_tuple();
        let first = rec.on_tuple_change(&tuple).unwrap();
        tuple.owner = "tokio-rs".to_string();
        rec.on_tuple_change(&tuple).unwrap();

        rec.settle(first.generation, Ok(json!({ "Error": "old" })));
        assert_eq!(rec.status(), FetchStatus::Loading);
        assert_eq!(rec.result(), None);
    }

    #[test]
    fn malformed_payload_settles_as_unrecognized() {
        let mut rec = Reconciler::new();
        let ticket = rec.on_tuple_change(&complete_tuple()).unwrap();
        rec.settle(ticket.generation, Ok(json!("surprise")));
        assert!(matches!(rec.result(), Some(LookupResult::Unrecognized(_))));
    }
}
