use dioxus::prelude::*;

use crate::admin::AdminDashboard;

#[component]
pub fn Admin() -> Element {
    let _lang = super::use_language_marker();

    rsx! {
        section { class: "page page-admin",
            AdminDashboard {}
        }
    }
}
