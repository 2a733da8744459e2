//! Stream controller: user actions and polling
//!
//! One explicitly constructed instance is created by `App` and handed to
//! the component tree through context; nothing hangs off a global. Each
//! operation category carries its own single-slot in-flight guard: a new
//! request is rejected while the slot is held, never queued.

use std::collections::HashMap;
use std::time::Duration;

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, StreamAction};
use crate::browser;
use crate::clipboard;
use crate::components::toast::Toaster;
use crate::store::{DetailState, StreamStore};

/// How often the list is re-polled
pub const POLL_INTERVAL: Duration = Duration::from_secs(4);

#[derive(Clone, Copy)]
pub struct StreamsController {
    pub store: StreamStore,
    pub toasts: Toaster,
    /// Loading indicator for manual refreshes
    pub loading: RwSignal<bool>,
    /// Wall-clock time of the last successful list fetch
    pub last_update: RwSignal<Option<String>>,
    /// Create-form busy flag; the form binds its disabled state to this
    pub creating: RwSignal<bool>,
    /// Start/stop requests currently in flight, keyed by stream id
    pub pending_actions: RwSignal<HashMap<String, StreamAction>>,
    poll_in_flight: StoredValue<bool>,
}

impl Default for StreamsController {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamsController {
    pub fn new() -> Self {
        Self {
            store: StreamStore::new(),
            toasts: Toaster::new(),
            loading: RwSignal::new(false),
            last_update: RwSignal::new(None),
            creating: RwSignal::new(false),
            pending_actions: RwSignal::new(HashMap::new()),
            poll_in_flight: StoredValue::new(false),
        }
    }

    /// Manual refresh: fetch the list, reconcile, surface failures.
    pub async fn refresh(self) {
        self.loading.set(true);
        self.load_once(true).await;
        self.loading.set(false);
    }

    /// Timer-driven refresh. Silent on error; an overlapping tick is
    /// dropped outright rather than queued.
    pub async fn poll_tick(self) {
        if self.poll_in_flight.get_value() {
            return;
        }
        self.poll_in_flight.set_value(true);
        self.load_once(false).await;
        self.poll_in_flight.set_value(false);
    }

    async fn load_once(self, surface_errors: bool) {
        match api::fetch_streams().await {
            Ok(list) => {
                self.store.reconcile(list);
                self.last_update.set(Some(browser::now_string()));
            }
            Err(e) => {
                logging::error!("stream list fetch failed: {e}");
                if surface_errors {
                    self.toasts.error(format!("Failed to load streams: {e}"));
                }
            }
        }
    }

    /// Create a stream; returns true so the form knows to clear its input.
    pub async fn create(self, name: String) -> bool {
        if self.creating.get_untracked() {
            return false;
        }
        let name = name.trim().to_string();
        if name.is_empty() {
            self.toasts.error("Enter a stream name");
            return false;
        }

        self.creating.set(true);
        let created = match api::create_stream(&name).await {
            Ok(record) => {
                self.toasts.success(format!("Stream \"{}\" created", record.name));
                true
            }
            Err(e) => {
                logging::error!("stream create failed: {e}");
                self.toasts.error(format!("Failed to create stream: {e}"));
                false
            }
        };
        if created {
            self.refresh().await;
        }
        // Restore form interactivity no matter how the request went.
        self.creating.set(false);
        created
    }

    pub async fn start(self, stream_id: String) {
        self.run_action(stream_id, StreamAction::Start).await;
    }

    pub async fn stop(self, stream_id: String) {
        self.run_action(stream_id, StreamAction::Stop).await;
    }

    async fn run_action(self, stream_id: String, action: StreamAction) {
        let Some(record) = self.store.record_of(&stream_id) else {
            return;
        };
        let allowed = match action {
            StreamAction::Start => record.stream_status.can_start(),
            StreamAction::Stop => record.stream_status.can_stop(),
        };
        if !allowed {
            return;
        }
        if self
            .pending_actions
            .with_untracked(|p| p.contains_key(&stream_id))
        {
            logging::log!("{action} for {stream_id} already pending, ignoring");
            return;
        }
        self.pending_actions.update(|p| {
            p.insert(stream_id.clone(), action);
        });

        match api::stream_action(&stream_id, action).await {
            Ok(()) => {
                self.toasts
                    .success(action_success_message(&record.name, action));
            }
            Err(e) => {
                logging::error!("stream {action} failed for {stream_id}: {e}");
                self.toasts.error(format!("Failed to {action} stream: {e}"));
            }
        }
        self.refresh().await;
        self.pending_actions.update(|p| {
            p.remove(&stream_id);
        });
    }

    pub async fn delete(self, record_id: u64) {
        if !browser::confirm("Delete this stream?") {
            return;
        }
        match api::delete_stream(record_id).await {
            Ok(()) => self.toasts.success("Stream deleted"),
            Err(e) => {
                logging::error!("stream delete failed: {e}");
                self.toasts.error(format!("Failed to delete stream: {e}"));
            }
        }
        self.refresh().await;
    }

    /// Flip a detail panel. Every expand re-fetches the connection info,
    /// so a failed fetch is retried and stale data is replaced; collapse
    /// just hides the panel.
    pub fn toggle_detail(self, stream_id: String) {
        let now_open = self.store.toggle_expanded(&stream_id);
        if !now_open {
            return;
        }
        self.prepare_detail_fetch(&stream_id);
        spawn_local(self.load_detail(stream_id));
    }

    /// Previously loaded data stays visible while the refresh is in
    /// flight; anything else becomes the loading placeholder.
    fn prepare_detail_fetch(&self, stream_id: &str) {
        match self.store.detail(stream_id) {
            Some(DetailState::Loaded(_)) => {}
            _ => self.store.set_detail(stream_id, DetailState::Loading),
        }
    }

    async fn load_detail(self, stream_id: String) {
        match api::fetch_stream_detail(&stream_id).await {
            Ok(detail) => self.store.set_detail(&stream_id, DetailState::Loaded(detail)),
            Err(e) => {
                logging::error!("detail fetch failed for {stream_id}: {e}");
                self.store.set_detail(&stream_id, DetailState::Failed);
            }
        }
    }

    pub async fn copy(self, text: String) {
        match clipboard::copy_text(&text).await {
            Ok(()) => self.toasts.success("Copied to clipboard"),
            Err(_) => self.toasts.error("Clipboard copy failed"),
        }
    }
}

/// Cards are identified to the user by name, so toasts are too.
fn action_success_message(name: &str, action: StreamAction) -> String {
    let done = match action {
        StreamAction::Start => "started",
        StreamAction::Stop => "stopped",
    };
    format!("Stream \"{name}\" {done}")
}
