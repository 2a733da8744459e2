//! Reactive stream store
//!
//! Holds the last-known server state in signals and applies reconciliation
//! edit scripts to them. The record vector is the cache: the card list is
//! rendered straight from it (keyed by `stream_id`), so the 1:1 invariant
//! between cache entries and cards falls out of the rendering model.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use leptos::prelude::*;

use crate::api::{StreamDetail, StreamRecord, StreamStatus};
use crate::browser;
use crate::reconcile::{diff, Edit};

/// How long a changed card keeps its highlight
const HIGHLIGHT_WINDOW: Duration = Duration::from_millis(800);

/// Matches the CSS fade-out duration for removed cards
const REMOVE_ANIMATION: Duration = Duration::from_millis(300);

/// Lazily fetched detail panel content for one stream
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(StreamDetail),
    Failed,
}

#[derive(Clone, Copy)]
pub struct StreamStore {
    records: RwSignal<Vec<StreamRecord>>,
    highlighted: RwSignal<HashSet<String>>,
    leaving: RwSignal<HashSet<String>>,
    expanded: RwSignal<HashSet<String>>,
    details: RwSignal<HashMap<String, DetailState>>,
}

impl Default for StreamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamStore {
    pub fn new() -> Self {
        Self {
            records: RwSignal::new(Vec::new()),
            highlighted: RwSignal::new(HashSet::new()),
            leaving: RwSignal::new(HashSet::new()),
            expanded: RwSignal::new(HashSet::new()),
            details: RwSignal::new(HashMap::new()),
        }
    }

    /// Bring the store in line with a freshly polled list.
    pub fn reconcile(&self, incoming: Vec<StreamRecord>) {
        if incoming.is_empty() {
            // Hard clear: the empty-state placeholder replaces the whole
            // container, so there is nothing to animate out.
            if !self.records.with_untracked(|r| r.is_empty()) {
                self.records.set(Vec::new());
                self.highlighted.set(HashSet::new());
                self.leaving.set(HashSet::new());
                self.expanded.set(HashSet::new());
                self.details.set(HashMap::new());
            }
            return;
        }

        let edits = self.records.with_untracked(|prev| diff(prev, &incoming));
        for edit in edits {
            self.apply(edit);
        }
    }

    fn apply(&self, edit: Edit) {
        match edit {
            Edit::Insert(record) => {
                let id = record.stream_id.clone();
                self.leaving.update(|l| {
                    l.remove(&id);
                });
                self.records.update(|v| v.push(record));
            }
            Edit::Update { record, changes } => {
                let id = record.stream_id.clone();
                // A record that reappears while fading out is alive again.
                self.leaving.update(|l| {
                    l.remove(&id);
                });
                self.records.update(|v| {
                    if let Some(slot) = v.iter_mut().find(|r| r.stream_id == id) {
                        *slot = record;
                    }
                });
                if changes.highlights() {
                    self.highlighted.update(|h| {
                        h.insert(id.clone());
                    });
                    let store = *self;
                    browser::after(HIGHLIGHT_WINDOW, move || {
                        store.highlighted.update(|h| {
                            h.remove(&id);
                        });
                    });
                }
            }
            Edit::Remove { stream_id } => {
                self.leaving.update(|l| {
                    l.insert(stream_id.clone());
                });
                let store = *self;
                browser::after(REMOVE_ANIMATION, move || store.finish_removal(&stream_id));
            }
        }
    }

    /// Drop a card once its exit animation has played. A record that came
    /// back in the meantime has had its leaving mark cleared and survives.
    fn finish_removal(&self, stream_id: &str) {
        let still_leaving = self
            .leaving
            .try_update(|l| l.remove(stream_id))
            .unwrap_or(false);
        if !still_leaving {
            return;
        }
        self.records.update(|v| v.retain(|r| r.stream_id != stream_id));
        self.highlighted.update(|h| {
            h.remove(stream_id);
        });
        self.expanded.update(|e| {
            e.remove(stream_id);
        });
        self.details.update(|d| {
            d.remove(stream_id);
        });
    }

    // --- reactive accessors used by the view ---

    pub fn stream_ids(&self) -> Vec<String> {
        self.records
            .with(|v| v.iter().map(|r| r.stream_id.clone()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.records.with(|v| v.is_empty())
    }

    pub fn get(&self, stream_id: &str) -> Option<StreamRecord> {
        self.records
            .with(|v| v.iter().find(|r| r.stream_id == stream_id).cloned())
    }

    pub fn is_highlighted(&self, stream_id: &str) -> bool {
        self.highlighted.with(|h| h.contains(stream_id))
    }

    pub fn is_leaving(&self, stream_id: &str) -> bool {
        self.leaving.with(|l| l.contains(stream_id))
    }

    pub fn is_expanded(&self, stream_id: &str) -> bool {
        self.expanded.with(|e| e.contains(stream_id))
    }

    pub fn detail(&self, stream_id: &str) -> Option<DetailState> {
        self.details.with(|d| d.get(stream_id).cloned())
    }

    // --- untracked accessors used by action guards and tests ---

    pub fn status_of(&self, stream_id: &str) -> Option<StreamStatus> {
        self.record_of(stream_id).map(|r| r.stream_status)
    }

    pub fn record_of(&self, stream_id: &str) -> Option<StreamRecord> {
        self.records
            .with_untracked(|v| v.iter().find(|r| r.stream_id == stream_id).cloned())
    }

    pub fn snapshot(&self) -> Vec<StreamRecord> {
        self.records.get_untracked()
    }

    // --- detail panel state ---

    /// Flip the expanded-set membership, returning true when now open.
    pub fn toggle_expanded(&self, stream_id: &str) -> bool {
        self.expanded
            .try_update(|e| {
                if e.remove(stream_id) {
                    false
                } else {
                    e.insert(stream_id.to_string());
                    true
                }
            })
            .unwrap_or(false)
    }

    pub fn set_detail(&self, stream_id: &str, state: DetailState) {
        self.details.update(|d| {
            d.insert(stream_id.to_string(), state);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::diff;

    fn record(stream_id: &str, status: StreamStatus) -> StreamRecord {
        StreamRecord {
            id: 7,
            stream_id: stream_id.to_string(),
            name: format!("Stream {stream_id}"),
            stream_status: status,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: None,
        }
    }

    fn ids(store: &StreamStore) -> Vec<String> {
        store
            .snapshot()
            .iter()
            .map(|r| r.stream_id.clone())
            .collect()
    }

    #[test]
    fn rendered_ids_match_incoming_ids() {
        let store = StreamStore::new();
        store.reconcile(vec![
            record("a", StreamStatus::Stopped),
            record("b", StreamStatus::Running),
        ]);
        assert_eq!(ids(&store), vec!["a", "b"]);

        store.reconcile(vec![
            record("b", StreamStatus::Running),
            record("c", StreamStatus::Starting),
        ]);
        assert_eq!(ids(&store), vec!["b", "c"]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let store = StreamStore::new();
        let list = vec![
            record("a", StreamStatus::Stopped),
            record("b", StreamStatus::Running),
        ];
        store.reconcile(list.clone());
        let snapshot = store.snapshot();
        assert!(diff(&snapshot, &list).is_empty());
        store.reconcile(list);
        assert_eq!(store.snapshot(), snapshot);
    }

    #[test]
    fn update_overwrites_cached_record() {
        let store = StreamStore::new();
        store.reconcile(vec![record("a", StreamStatus::Starting)]);
        let mut next = record("a", StreamStatus::Running);
        next.id = 99;
        store.reconcile(vec![next]);
        let cached = store.get("a").unwrap();
        assert_eq!(cached.stream_status, StreamStatus::Running);
        assert_eq!(cached.id, 99);
    }

    #[test]
    fn empty_list_clears_everything() {
        let store = StreamStore::new();
        store.reconcile(vec![
            record("a", StreamStatus::Running),
            record("b", StreamStatus::Stopped),
        ]);
        store.toggle_expanded("a");
        store.set_detail("a", DetailState::Loading);
        assert_eq!(store.snapshot().len(), 2);

        store.reconcile(Vec::new());
        assert!(store.snapshot().is_empty());
        assert!(!store.is_expanded("a"));
        assert_eq!(store.detail("a"), None);
    }

    #[test]
    fn removal_prunes_expanded_set_and_details() {
        let store = StreamStore::new();
        store.reconcile(vec![
            record("a", StreamStatus::Running),
            record("b", StreamStatus::Stopped),
        ]);
        store.toggle_expanded("a");
        store.set_detail("a", DetailState::Failed);

        // Off-wasm the exit animation window elapses inline.
        store.reconcile(vec![record("b", StreamStatus::Stopped)]);
        assert_eq!(ids(&store), vec!["b"]);
        assert!(!store.is_expanded("a"));
        assert_eq!(store.detail("a"), None);
    }

    #[test]
    fn toggle_expanded_flips_membership() {
        let store = StreamStore::new();
        assert!(store.toggle_expanded("a"));
        assert!(store.is_expanded("a"));
        assert!(!store.toggle_expanded("a"));
        assert!(!store.is_expanded("a"));
    }

    #[test]
    fn detail_failure_keeps_panel_open() {
        let store = StreamStore::new();
        store.reconcile(vec![record("a", StreamStatus::Running)]);
        store.toggle_expanded("a");
        store.set_detail("a", DetailState::Failed);
        assert!(store.is_expanded("a"));
        assert_eq!(store.detail("a"), Some(DetailState::Failed));
    }

    #[test]
    fn status_of_reads_current_status() {
        let store = StreamStore::new();
        store.reconcile(vec![record("a", StreamStatus::Error)]);
        assert_eq!(store.status_of("a"), Some(StreamStatus::Error));
        assert_eq!(store.status_of("missing"), None);
    }
}
