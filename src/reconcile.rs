//! Keyed diffing between the cached stream list and a freshly polled one
//!
//! `diff` produces a minimal edit script: updates and inserts in incoming
//! order, then removals in previous-render order. Unaffected records
//! produce no edit at all, which is what bounds visual churn to the items
//! that actually changed.

use std::collections::{HashMap, HashSet};

use crate::api::StreamRecord;

/// Which render-relevant fields differ between two versions of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldChanges {
    pub name: bool,
    pub status: bool,
    pub updated_at: bool,
}

impl FieldChanges {
    pub fn between(prev: &StreamRecord, next: &StreamRecord) -> Self {
        Self {
            name: prev.name != next.name,
            status: prev.stream_status != next.stream_status,
            updated_at: prev.updated_at != next.updated_at,
        }
    }

    /// Status and timestamp changes get a transient highlight on the card
    pub fn highlights(self) -> bool {
        self.status || self.updated_at
    }
}

/// One step of the reconciliation edit script
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Insert(StreamRecord),
    Update {
        record: StreamRecord,
        changes: FieldChanges,
    },
    Remove {
        stream_id: String,
    },
}

/// Compute the edit script that turns `prev` into `incoming`.
///
/// An `Update` is only emitted when the record differs from the cached
/// version; feeding the same list twice therefore yields an empty script.
pub fn diff(prev: &[StreamRecord], incoming: &[StreamRecord]) -> Vec<Edit> {
    let prev_by_id: HashMap<&str, &StreamRecord> = prev
        .iter()
        .map(|r| (r.stream_id.as_str(), r))
        .collect();
    let incoming_ids: HashSet<&str> = incoming.iter().map(|r| r.stream_id.as_str()).collect();

    let mut edits = Vec::new();

    for next in incoming {
        match prev_by_id.get(next.stream_id.as_str()) {
            Some(old) if **old == *next => {}
            Some(old) => edits.push(Edit::Update {
                changes: FieldChanges::between(old, next),
                record: next.clone(),
            }),
            None => edits.push(Edit::Insert(next.clone())),
        }
    }

    for old in prev {
        if !incoming_ids.contains(old.stream_id.as_str()) {
            edits.push(Edit::Remove {
                stream_id: old.stream_id.clone(),
            });
        }
    }

    edits
}
