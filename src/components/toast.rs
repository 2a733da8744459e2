//! Transient notifications
//!
//! `Toaster` is the handle actions push outcomes into; `ToastHost` renders
//! the floating container. Each toast dismisses itself after a fixed delay.

use std::time::Duration;

use leptos::logging;
use leptos::prelude::*;

use crate::browser;
use crate::controller::StreamsController;

const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastLevel::Success => "notification-success",
            ToastLevel::Error => "notification-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&self, level: ToastLevel, message: String) {
        match level {
            ToastLevel::Success => logging::log!("{message}"),
            ToastLevel::Error => logging::error!("{message}"),
        }

        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|t| t.push(Toast { id, level, message }));

        let toaster = *self;
        browser::after(TOAST_LIFETIME, move || toaster.dismiss(id));
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|toast| toast.id != id));
    }

    pub fn entries(&self) -> Vec<Toast> {
        self.toasts.get()
    }
}

/// Floating toast container; mounted once by `App`
#[component]
pub fn ToastHost() -> impl IntoView {
    let controller = expect_context::<StreamsController>();
    let toasts = controller.toasts;

    view! {
        <div id="notificationsContainer" class="notifications-container">
            <For
                each=move || toasts.entries()
                key=|toast| toast.id
                children=|toast| {
                    view! {
                        <div class=format!("notification {}", toast.level.css_class())>
                            {toast.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_ids_are_monotonic() {
        let toaster = Toaster::new();
        toaster.success("one");
        toaster.error("two");
        // Off-wasm the lifetime elapses inline, so both are gone already,
        // but the id counter keeps advancing.
        assert_eq!(toaster.next_id.get_value(), 2);
        assert!(toaster.entries().is_empty());
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let toaster = Toaster::new();
        toaster.toasts.update(|t| {
            t.push(Toast {
                id: 1,
                level: ToastLevel::Success,
                message: "keep".to_string(),
            });
            t.push(Toast {
                id: 2,
                level: ToastLevel::Error,
                message: "drop".to_string(),
            });
        });
        toaster.dismiss(2);
        let left = toaster.entries();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].message, "keep");
    }
}
