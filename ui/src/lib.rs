//! Shared UI crate for Yabasa: the diagnosis page, the report renderer and
//! the admin dashboard, used by both the web and desktop shells.

pub mod admin;
pub mod core;
pub mod i18n;
pub mod report;
pub mod views;

use dioxus::prelude::manganis;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Shared theme stylesheet; the web shell links it, desktop embeds the file.
pub const THEME_CSS: dioxus::prelude::Asset = dioxus::prelude::asset!("/assets/theme/main.css");
