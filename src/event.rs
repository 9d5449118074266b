use crate::error::BranchscopeError;
use crossterm::event::KeyEvent;
use serde_json::Value;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    LookupDone {
        generation: u64,
        outcome: Result<Value, BranchscopeError>,
    },
}
