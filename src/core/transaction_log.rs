//! Per-user transaction log
//!
//! An append-only sequence of [`Event`]s. Events are never mutated or
//! removed once appended, and the log preserves command order; reports
//! filter and project it without reordering.

use crate::types::Event;

/// Append-only event log owned by a single user.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    events: Vec<Event>,
}

impl TransactionLog {
    pub fn new() -> Self {
        TransactionLog::default()
    }

    pub fn append(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
