//! UI components

pub mod app;
pub mod create_form;
pub mod detail_panel;
pub mod status_badge;
pub mod stream_card;
pub mod stream_list;
pub mod toast;
