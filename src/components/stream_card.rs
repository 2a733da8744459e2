//! One stream card
//!
//! Every render-relevant field goes through its own memo so a poll that
//! changes, say, only the status rewrites only the status subtree.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::StreamAction;
use crate::browser;
use crate::components::detail_panel::DetailPanel;
use crate::components::status_badge::StatusBadge;
use crate::controller::StreamsController;

#[component]
pub fn StreamCard(stream_id: String) -> impl IntoView {
    let controller = expect_context::<StreamsController>();
    let store = controller.store;
    let id = StoredValue::new(stream_id);

    let record = Memo::new(move |_| id.with_value(|id| store.get(id)));
    let name = Memo::new(move |_| record.get().map(|r| r.name).unwrap_or_default());
    let status = Memo::new(move |_| record.get().map(|r| r.stream_status));
    let created_at = Memo::new(move |_| record.get().map(|r| r.created_at));
    let updated_at = Memo::new(move |_| record.get().and_then(|r| r.updated_at));
    let db_id = Memo::new(move |_| record.get().map(|r| r.id));

    let pending = Memo::new(move |_| {
        id.with_value(|id| controller.pending_actions.with(|p| p.get(id).copied()))
    });

    let start_disabled = move || {
        pending.get().is_some() || !status.get().map(|s| s.can_start()).unwrap_or(false)
    };
    let stop_disabled = move || {
        pending.get().is_some() || !status.get().map(|s| s.can_stop()).unwrap_or(false)
    };
    let start_label = move || {
        if pending.get() == Some(StreamAction::Start) {
            "Starting..."
        } else {
            "Start"
        }
    };
    let stop_label = move || {
        if pending.get() == Some(StreamAction::Stop) {
            "Stopping..."
        } else {
            "Stop"
        }
    };

    let card_class = move || {
        let mut class = String::from("stream-card");
        id.with_value(|id| {
            if store.is_highlighted(id) {
                class.push_str(" changed");
            }
            if store.is_leaving(id) {
                class.push_str(" leaving");
            }
        });
        class
    };

    view! {
        <div class=card_class data-stream-id=id.get_value()>
            <div class="stream-header">
                <h3 class="stream-name">{move || name.get()}</h3>
                <StatusBadge status=status />
            </div>

            <div class="stream-info">
                <div class="stream-detail">
                    <strong>"ID: "</strong>
                    <code>{id.get_value()}</code>
                </div>
                <div class="stream-detail">
                    <strong>"Created: "</strong>
                    {move || browser::format_timestamp(created_at.get().as_deref())}
                </div>
                <Show when=move || updated_at.get().is_some()>
                    <div class="stream-detail">
                        <strong>"Updated: "</strong>
                        <span class="updated-time">
                            {move || browser::format_timestamp(updated_at.get().as_deref())}
                        </span>
                    </div>
                </Show>
            </div>

            <div class="stream-actions">
                <button
                    class="btn btn-primary"
                    disabled=start_disabled
                    on:click=move |_| {
                        if !start_disabled() {
                            spawn_local(controller.start(id.get_value()));
                        }
                    }
                >
                    {start_label}
                </button>
                <button
                    class="btn btn-danger"
                    disabled=stop_disabled
                    on:click=move |_| {
                        if !stop_disabled() {
                            spawn_local(controller.stop(id.get_value()));
                        }
                    }
                >
                    {stop_label}
                </button>
                <button
                    class="btn btn-info"
                    on:click=move |_| controller.toggle_detail(id.get_value())
                >
                    "Details"
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| {
                        if let Some(record_id) = db_id.get_untracked() {
                            spawn_local(controller.delete(record_id));
                        }
                    }
                >
                    "Delete"
                </button>
            </div>

            <DetailPanel stream_id=id.get_value() />
        </div>
    }
}
