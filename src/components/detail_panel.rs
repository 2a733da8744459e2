//! Expandable connection-info panel
//!
//! The wrapper div always exists; only its visibility tracks the
//! expanded-set, so collapsing and re-expanding never refetches.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::controller::StreamsController;
use crate::store::DetailState;

#[component]
pub fn DetailPanel(stream_id: String) -> impl IntoView {
    let controller = expect_context::<StreamsController>();
    let store = controller.store;
    let panel_id = format!("urls-{stream_id}");
    let id = StoredValue::new(stream_id);

    let expanded = Memo::new(move |_| id.with_value(|id| store.is_expanded(id)));
    let detail = Memo::new(move |_| id.with_value(|id| store.detail(id)));

    view! {
        <div
            class="stream-urls"
            id=panel_id
            style:display=move || if expanded.get() { "block" } else { "none" }
        >
            {move || match detail.get() {
                None | Some(DetailState::Loading) => {
                    view! { <p class="loading">"Loading stream info..."</p> }.into_any()
                }
                Some(DetailState::Failed) => {
                    view! { <div class="error">"Could not load stream info"</div> }.into_any()
                }
                Some(DetailState::Loaded(detail)) => {
                    view! {
                        <div class="stream-urls-content">
                            <h4>"Connection parameters"</h4>
                            <UrlRow label="SRT URL" value=detail.srt_url />
                            <UrlRow label="HLS Playlist" value=detail.hls_url />
                            <div class="url-item">
                                <strong>"SRT Port: "</strong>
                                {detail
                                    .srt_port
                                    .map(|p| p.to_string())
                                    .unwrap_or_else(|| "Unavailable".to_string())}
                            </div>
                            <div class="url-item">
                                <strong>"Server IP: "</strong>
                                {detail.server_ip.unwrap_or_else(|| "Unavailable".to_string())}
                            </div>
                            <Show when={
                                let started = detail.stream_start.clone();
                                move || started.is_some()
                            }>
                                <div class="url-item">
                                    <strong>"Stream started: "</strong>
                                    {browser::format_timestamp(detail.stream_start.as_deref())}
                                </div>
                            </Show>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// URL field with a copy-to-clipboard affordance when the URL exists
#[component]
fn UrlRow(label: &'static str, value: Option<String>) -> impl IntoView {
    let controller = expect_context::<StreamsController>();

    view! {
        <div class="url-item">
            <strong>{label}": "</strong>
            <code>{value.clone().unwrap_or_else(|| "Unavailable".to_string())}</code>
            {value.map(|url| {
                view! {
                    <button
                        class="copy-btn"
                        title="Copy to clipboard"
                        on:click=move |_| spawn_local(controller.copy(url.clone()))
                    >
                        "Copy"
                    </button>
                }
            })}
        </div>
    }
}
