//! Main App component

use leptos::leptos_dom::helpers::set_interval_with_handle;
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::create_form::CreateStreamForm;
use crate::components::stream_list::StreamList;
use crate::components::toast::ToastHost;
use crate::controller::{StreamsController, POLL_INTERVAL};

/// Root application component: builds the controller, wires it into
/// context, runs the initial fetch, and starts the poll timer.
#[component]
pub fn App() -> impl IntoView {
    let controller = StreamsController::new();
    provide_context(controller);

    spawn_local(async move {
        controller.refresh().await;
    });

    match set_interval_with_handle(
        move || spawn_local(controller.poll_tick()),
        POLL_INTERVAL,
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => logging::error!("could not start poll timer: {e:?}"),
    }

    view! {
        <main class="container">
            <header class="header">
                <h1>"Stream Manager"</h1>
                <div class="toolbar">
                    <button
                        id="refreshBtn"
                        class="btn btn-info"
                        on:click=move |_| spawn_local(controller.refresh())
                    >
                        "Refresh"
                    </button>
                    <span
                        id="loadingIndicator"
                        class="loading-indicator"
                        style:display=move || {
                            if controller.loading.get() { "inline" } else { "none" }
                        }
                    >
                        "Loading..."
                    </span>
                    <span class="last-update">
                        "Last update: "
                        <span id="lastUpdate">
                            {move || {
                                controller
                                    .last_update
                                    .get()
                                    .unwrap_or_else(|| "never".to_string())
                            }}
                        </span>
                    </span>
                </div>
            </header>

            <CreateStreamForm />
            <StreamList />
            <ToastHost />
        </main>
    }
}
