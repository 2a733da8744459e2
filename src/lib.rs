//! Stream Manager Dashboard - Leptos frontend
//!
//! Client-side rendered web UI for a stream transcoding backend: polls the
//! REST API, reconciles the card list against server state with a keyed
//! edit script, and dispatches create/start/stop/delete actions.

pub mod api;
pub mod browser;
pub mod clipboard;
pub mod components;
pub mod controller;
pub mod error;
pub mod reconcile;
pub mod store;

pub use components::app::App;
