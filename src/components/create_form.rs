//! Create-stream form

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::controller::StreamsController;

/// Name input plus submit button; disabled while a create is in flight
#[component]
pub fn CreateStreamForm() -> impl IntoView {
    let controller = expect_context::<StreamsController>();
    let name = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = name.get_untracked();
        spawn_local(async move {
            // On failure the input keeps its text for another try.
            if controller.create(value).await {
                name.set(String::new());
            }
        });
    };

    view! {
        <form id="createStreamForm" class="create-form" on:submit=on_submit>
            <input
                id="streamName"
                type="text"
                placeholder="Stream name"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
                disabled=move || controller.creating.get()
            />
            <button
                id="createStreamBtn"
                class="btn btn-primary"
                type="submit"
                disabled=move || controller.creating.get()
            >
                {move || if controller.creating.get() { "Creating..." } else { "Create stream" }}
            </button>
        </form>
    }
}
