//! Routed pages shared by the web and desktop shells.

mod admin;
pub use admin::Admin;

mod diagnose;
pub use diagnose::Diagnose;

use dioxus::prelude::*;

/// Subscribes the calling page to the shell's language signal, if any, so
/// a locale switch re-renders localized text.
fn use_language_marker() -> String {
    try_use_context::<Signal<String>>()
        .map(|code| code())
        .unwrap_or_else(|| "en-US".to_string())
}
