#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config, LogicalSize};
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Admin, Diagnose};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopNavbar)]
    #[route("/")]
    Diagnose {},
    #[route("/admin")]
    Admin {},
}

// Shared theme, embedded so packaged builds need no asset directory.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

#[cfg(feature = "desktop")]
fn main() {
    dioxus::logger::init(Level::INFO).expect("logger initialised once");

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("Yabasa – v{}", env!("CARGO_PKG_VERSION")))
                    .with_inner_size(LogicalSize::new(1180.0, 860.0)),
            ),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    dioxus::logger::init(Level::INFO).expect("logger initialised once");
    LaunchBuilder::server().launch(App);
}

fn nav_diagnose(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Diagnose {}, "{label}" })
}
fn nav_admin(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Admin {}, "{label}" })
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // AppNavbar updates this on language selection.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        diagnose: nav_diagnose,
        admin: nav_admin,
    });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        // Keyed so a language change remounts the routed subtree.
        div { key: "{lang_code()}",
            Router::<Route> { }
        }
    }
}

/// Desktop-specific layout so the shared navbar can sit above this shell's routes.
#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
