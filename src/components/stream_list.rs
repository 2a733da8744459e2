//! Stream card list with empty-state placeholder

use leptos::prelude::*;

use crate::components::stream_card::StreamCard;
use crate::controller::StreamsController;

/// Renders one card per stream, keyed by `stream_id` so unchanged cards
/// keep their DOM nodes across polls
#[component]
pub fn StreamList() -> impl IntoView {
    let controller = expect_context::<StreamsController>();
    let store = controller.store;

    view! {
        <div id="streamsContainer" class="streams-container">
            <Show
                when=move || !store.is_empty()
                fallback=|| {
                    view! {
                        <div class="no-streams">
                            <p>"No streams yet"</p>
                            <p>"Create a stream to get started"</p>
                        </div>
                    }
                }
            >
                <For
                    each=move || store.stream_ids()
                    key=|id| id.clone()
                    children=move |id: String| view! { <StreamCard stream_id=id /> }
                />
            </Show>
        </div>
    }
}
