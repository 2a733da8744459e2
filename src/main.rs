//! Trunk entry point for the browser build

fn main() {
    #[cfg(feature = "csr")]
    {
        console_error_panic_hook::set_once();
        leptos::mount::mount_to_body(streams_app::App);
    }
}
