//! Status badge component

use leptos::prelude::*;

use crate::api::StreamStatus;

/// Colored badge reflecting a stream's lifecycle status
#[component]
pub fn StatusBadge(status: Memo<Option<StreamStatus>>) -> impl IntoView {
    let class = move || {
        status
            .get()
            .map(|s| format!("stream-status {}", s.css_class()))
            .unwrap_or_else(|| "stream-status".to_string())
    };
    let label = move || {
        status
            .get()
            .map(|s| s.to_string())
            .unwrap_or_default()
    };

    view! { <span class=class>{label}</span> }
}
