//! Clipboard writes with graceful degradation
//!
//! Three tiers: the async clipboard API, a hidden-textarea `execCommand`
//! fallback for older engines, and finally a manual-copy prompt when both
//! are unavailable. Callers turn the outcome into a toast.

/// The text could not be placed on the clipboard automatically
#[derive(Debug, thiserror::Error)]
#[error("clipboard copy failed")]
pub struct ClipboardError;

pub async fn copy_text(text: &str) -> Result<(), ClipboardError> {
    #[cfg(all(feature = "csr", target_arch = "wasm32"))]
    {
        if native_copy(text).await || textarea_copy(text) {
            return Ok(());
        }
        manual_copy_prompt(text);
        Err(ClipboardError)
    }

    #[cfg(not(all(feature = "csr", target_arch = "wasm32")))]
    {
        let _ = text;
        Err(ClipboardError)
    }
}

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
async fn native_copy(text: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let clipboard = window.navigator().clipboard();
    if clipboard.is_undefined() {
        return false;
    }
    wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text))
        .await
        .is_ok()
}

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
fn textarea_copy(text: &str) -> bool {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return false;
    };
    let Some(body) = document.body() else {
        return false;
    };
    let Ok(element) = document.create_element("textarea") else {
        return false;
    };
    let Ok(textarea) = element.dyn_into::<web_sys::HtmlTextAreaElement>() else {
        return false;
    };

    textarea.set_value(text);
    // Park it off-screen so nothing flashes while we select it.
    let style = textarea.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("left", "-9999px");

    if body.append_child(&textarea).is_err() {
        return false;
    }
    let _ = textarea.focus();
    textarea.select();

    let copied = document.exec_command("copy").unwrap_or(false);
    let _ = body.remove_child(&textarea);
    copied
}

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
fn manual_copy_prompt(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let wants_it = window
        .confirm_with_message(&format!(
            "Could not copy automatically:\n\n{text}\n\nShow it for manual copying?"
        ))
        .unwrap_or(false);
    if wants_it {
        let _ = window.prompt_with_message_and_default("Copy this text:", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_fails_off_wasm() {
        let result = tokio_test::block_on(copy_text("srt://example:9000"));
        assert!(result.is_err());
    }
}
