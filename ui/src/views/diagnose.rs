use api::{DiagnosisRequest, DEFAULT_MODE, MODES};
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;

use crate::core::{client, guard::RequestGuard, platform, status::Status};
use crate::report::{present, DisplaySurface, Labels, ReportExportPanel, ReportView};
use crate::t;

/// Localized status line for the diagnosis page.
fn status_message(status: &Status) -> Option<String> {
    match status {
        Status::Idle => None,
        Status::Working => Some(t!("status-diagnosing")),
        Status::Done(at) => Some(t!("status-updated", time = at.clone())),
        Status::Error(message) => Some(message.clone()),
    }
}

#[component]
pub fn Diagnose() -> Element {
    let _lang = super::use_language_marker();

    let dispatcher = client::use_dispatcher();
    let guard = use_hook(RequestGuard::default);
    let mut surface = use_signal(DisplaySurface::default);

    let mut url = use_signal(String::new);
    let mut text = use_signal(String::new);
    let mut mode = use_signal(|| DEFAULT_MODE.to_string());
    let mut sector = use_signal(String::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        // Issued before any local rejection so an older in-flight reply
        // cannot overwrite it.
        let token = guard.issue();

        let request = DiagnosisRequest::new(&url(), &text(), &mode()).with_sector(&sector());
        if !request.has_content() {
            surface.write().reject(t!("diagnose-empty-input"));
            return;
        }
        let dispatcher = match &dispatcher {
            Ok(dispatcher) => dispatcher.clone(),
            Err(err) => {
                surface.write().settle(Err(err.clone()));
                return;
            }
        };

        debug!(generation = token.generation(), "diagnosis requested");
        surface.write().begin();

        let guard = guard.clone();
        let labels = Labels::localized();
        platform::spawn_future(async move {
            let outcome = dispatcher
                .submit(&request)
                .await
                .and_then(|result| present(&result, &labels));
            if let Some(outcome) = guard.accept(token, outcome) {
                surface.write().settle(outcome);
            }
        });
    };

    let state = surface();
    let working = state.status.is_working();
    let status_line = status_message(&state.status);

    rsx! {
        section { class: "page page-diagnose",
            h1 { {t!("diagnose-title")} }
            p { class: "page-diagnose__intro", {t!("diagnose-intro")} }

            form { class: "diagnose-form", onsubmit: on_submit,
                label { r#for: "diagnose-url", {t!("diagnose-url-label")} }
                input {
                    id: "diagnose-url",
                    r#type: "url",
                    placeholder: "https://",
                    value: "{url}",
                    oninput: move |evt| url.set(evt.value()),
                }

                label { r#for: "diagnose-text", {t!("diagnose-text-label")} }
                textarea {
                    id: "diagnose-text",
                    rows: "8",
                    placeholder: t!("diagnose-text-placeholder"),
                    value: "{text}",
                    oninput: move |evt| text.set(evt.value()),
                }

                div { class: "diagnose-form__row",
                    div { class: "diagnose-form__field",
                        label { r#for: "diagnose-mode", {t!("diagnose-mode-label")} }
                        select {
                            id: "diagnose-mode",
                            value: "{mode}",
                            oninput: move |evt| mode.set(evt.value()),
                            for choice in MODES.iter() {
                                option { key: "{choice}", value: "{choice}", "{choice}" }
                            }
                        }
                    }
                    div { class: "diagnose-form__field",
                        label { r#for: "diagnose-sector", {t!("diagnose-sector-label")} }
                        input {
                            id: "diagnose-sector",
                            r#type: "text",
                            value: "{sector}",
                            oninput: move |evt| sector.set(evt.value()),
                        }
                    }
                }

                button { r#type: "submit", class: "button",
                    if working {
                        {t!("diagnose-resubmit")}
                    } else {
                        {t!("diagnose-submit")}
                    }
                }
            }

            if let Some(line) = status_line {
                p { class: state.status.css_class(), role: "status", "{line}" }
            }

            if let Some(report) = state.report.as_ref() {
                ReportView { report: report.clone() }
                ReportExportPanel { report: report.clone() }
            }
        }
    }
}
