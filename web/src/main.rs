use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Admin, Diagnose};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Diagnose {},
    #[route("/admin")]
    Admin {},
}

fn nav_diagnose(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Diagnose {},
        "{label}"
    })
}
fn nav_admin(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Admin {},
        "{label}"
    })
}

fn main() {
    dioxus::logger::init(Level::INFO).expect("logger initialised once");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder {
        diagnose: nav_diagnose,
        admin: nav_admin,
    });

    // AppNavbar writes the chosen locale here; pages read it to re-render.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    rsx! {
        document::Title { "Yabasa" }
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        div { key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

/// Web-specific layout so the shared navbar can sit above this shell's routes.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
