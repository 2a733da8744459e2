//! Thin wrappers over browser APIs
//!
//! Everything here is inert outside the browser: deferred callbacks run
//! inline (which keeps store tests synchronous and deterministic), the
//! confirm dialog declines, and timestamps pass through unformatted.

use std::time::Duration;

/// Run `f` after `delay`. Inline on native targets.
pub fn after(delay: Duration, f: impl FnOnce() + 'static) {
    #[cfg(all(feature = "csr", target_arch = "wasm32"))]
    {
        leptos::leptos_dom::helpers::set_timeout(f, delay);
    }

    #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
    {
        let _ = delay;
        f();
    }
}

/// Blocking confirmation dialog; declines when there is no window.
pub fn confirm(message: &str) -> bool {
    #[cfg(all(feature = "csr", target_arch = "wasm32"))]
    {
        web_sys::window()
            .map(|w| w.confirm_with_message(message).unwrap_or(false))
            .unwrap_or(false)
    }

    #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
    {
        let _ = message;
        false
    }
}

/// Render a server timestamp in the user's locale, passing malformed
/// input through unchanged.
pub fn format_timestamp(raw: Option<&str>) -> String {
    match raw {
        None => "Unknown".to_string(),
        Some(raw) if raw.is_empty() => "Unknown".to_string(),
        Some(raw) => {
            #[cfg(all(feature = "csr", target_arch = "wasm32"))]
            {
                let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(raw));
                if date.get_time().is_nan() {
                    raw.to_string()
                } else {
                    String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED))
                }
            }

            #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
            {
                raw.to_string()
            }
        }
    }
}

/// Current wall-clock time for the "last updated" line.
pub fn now_string() -> String {
    #[cfg(all(feature = "csr", target_arch = "wasm32"))]
    {
        String::from(js_sys::Date::new_0().to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED))
    }

    #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
    {
        String::new()
    }
}
