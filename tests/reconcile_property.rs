#[cfg(not(miri))] // Skip property tests under miri as they're too slow
use proptest::prelude::*;
#[cfg(not(miri))]
use std::collections::BTreeMap;
#[cfg(not(miri))]
use streams_app::api::{StreamRecord, StreamStatus};
#[cfg(not(miri))]
use streams_app::reconcile::{diff, Edit};
#[cfg(not(miri))]
use streams_app::store::StreamStore;

#[cfg(not(miri))]
fn status_strategy() -> impl Strategy<Value = StreamStatus> {
    prop_oneof![
        Just(StreamStatus::Stopped),
        Just(StreamStatus::Starting),
        Just(StreamStatus::Running),
        Just(StreamStatus::Error),
    ]
}

// Stream ids drawn from a tiny alphabet so lists frequently share ids;
// the BTreeMap keeps ids unique within one list, as the server does.
#[cfg(not(miri))]
fn list_strategy() -> impl Strategy<Value = Vec<StreamRecord>> {
    proptest::collection::btree_map(
        "[a-e]",
        (0u64..100, status_strategy(), "[A-Za-z]{0,8}", proptest::option::of("[0-9]{1,4}")),
        0..6,
    )
    .prop_map(|entries: BTreeMap<String, (u64, StreamStatus, String, Option<String>)>| {
        entries
            .into_iter()
            .map(|(stream_id, (id, stream_status, name, updated_at))| StreamRecord {
                id,
                stream_id,
                name,
                stream_status,
                created_at: "2025-01-01T00:00:00Z".to_string(),
                updated_at,
            })
            .collect()
    })
}

#[cfg(not(miri))]
proptest! {
    #[test]
    fn diff_of_a_list_against_itself_is_empty(list in list_strategy()) {
        prop_assert!(diff(&list, &list).is_empty());
    }

    #[test]
    fn reconcile_makes_rendered_ids_equal_incoming_ids(
        first in list_strategy(),
        second in list_strategy(),
    ) {
        let store = StreamStore::new();
        store.reconcile(first);
        store.reconcile(second.clone());

        let mut rendered: Vec<String> = store
            .snapshot()
            .iter()
            .map(|r| r.stream_id.clone())
            .collect();
        let mut incoming: Vec<String> = second
            .iter()
            .map(|r| r.stream_id.clone())
            .collect();
        rendered.sort_unstable();
        incoming.sort_unstable();
        prop_assert_eq!(rendered, incoming);
    }

    #[test]
    fn reconcile_is_idempotent(
        first in list_strategy(),
        second in list_strategy(),
    ) {
        let store = StreamStore::new();
        store.reconcile(first);
        store.reconcile(second.clone());
        let snapshot = store.snapshot();

        // A second pass over the same list changes nothing.
        prop_assert!(diff(&snapshot, &second).is_empty());
        store.reconcile(second);
        prop_assert_eq!(store.snapshot(), snapshot);
    }

    #[test]
    fn removes_always_trail_updates_and_inserts(
        prev in list_strategy(),
        next in list_strategy(),
    ) {
        let edits = diff(&prev, &next);
        let first_remove = edits
            .iter()
            .position(|e| matches!(e, Edit::Remove { .. }))
            .unwrap_or(edits.len());
        for edit in &edits[first_remove..] {
            prop_assert!(
                matches!(edit, Edit::Remove { .. }),
                "expected Edit::Remove, got {:?}",
                edit
            );
        }
    }

    #[test]
    fn unchanged_records_produce_no_edit(list in list_strategy()) {
        let store = StreamStore::new();
        store.reconcile(list.clone());
        let edits = diff(&store.snapshot(), &list);
        prop_assert!(edits.is_empty());
    }
}
