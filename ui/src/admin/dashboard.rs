use api::{AdminStats, DailySeries, RiskDistribution};
use dioxus::logger::tracing::info;
use dioxus::prelude::*;

use super::charts::{Chart, ChartKind, LabeledSeries};
use crate::core::{client, format, guard::RequestGuard, platform, status::Status};
use crate::t;

/// Names for the three risk buckets, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLabels {
    pub low: String,
    pub mid: String,
    pub high: String,
}

impl BucketLabels {
    pub fn localized() -> Self {
        Self {
            low: t!("admin-bucket-low"),
            mid: t!("admin-bucket-mid"),
            high: t!("admin-bucket-high"),
        }
    }
}

pub fn daily_series(daily: &DailySeries) -> LabeledSeries {
    LabeledSeries::new(daily.labels.clone(), daily.values.clone())
}

pub fn distribution_series(by_label: &RiskDistribution, names: &BucketLabels) -> LabeledSeries {
    LabeledSeries::new(
        vec![names.low.clone(), names.mid.clone(), names.high.clone()],
        vec![by_label.low, by_label.mid, by_label.high],
    )
}

#[component]
pub fn AdminDashboard() -> Element {
    let dispatcher = client::use_dispatcher();
    let guard = use_hook(RequestGuard::default);
    let mut password = use_signal(String::new);
    let mut status = use_signal(Status::default);
    let mut stats = use_signal(|| None::<AdminStats>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let token = guard.issue();
        let dispatcher = match &dispatcher {
            Ok(dispatcher) => dispatcher.clone(),
            Err(err) => {
                stats.set(None);
                status.set(Status::Error(err.to_string()));
                return;
            }
        };
        status.set(Status::Working);

        let guard = guard.clone();
        let secret = password();
        platform::spawn_future(async move {
            let outcome = dispatcher.fetch_admin_stats(&secret).await;
            let Some(outcome) = guard.accept(token, outcome) else {
                return;
            };
            match outcome {
                Ok(fresh) => {
                    info!(total = fresh.total_requests, "admin stats loaded");
                    stats.set(Some(fresh));
                    status.set(Status::Done(format::clock_now()));
                }
                Err(err) => {
                    stats.set(None);
                    status.set(Status::Error(err.to_string()));
                }
            }
        });
    };

    let status_line = match status() {
        Status::Idle => None,
        Status::Working => Some(t!("status-loading")),
        Status::Done(at) => Some(t!("status-updated", time = at)),
        Status::Error(message) => Some(message),
    };

    rsx! {
        section { class: "admin",
            h2 { {t!("admin-title")} }
            form { class: "admin__login", onsubmit: on_submit,
                label { r#for: "admin-password", {t!("admin-password-label")} }
                input {
                    id: "admin-password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button { r#type: "submit", class: "button", {t!("admin-submit")} }
            }
            if let Some(line) = status_line {
                p { class: status().css_class(), "{line}" }
            }
            if let Some(data) = stats() {
                {render_stats(&data)}
            }
        }
    }
}

fn render_stats(data: &AdminStats) -> Element {
    let total = format::format_count(data.total_requests as f64);
    let daily = daily_series(&data.daily);
    let buckets = distribution_series(&data.by_label, &BucketLabels::localized());

    rsx! {
        div { class: "admin__grid",
            div { class: "admin-card admin-card--total",
                h3 { {t!("admin-total-title")} }
                strong { class: "admin-card__value", "{total}" }
            }
            div { class: "admin-card",
                h3 { {t!("admin-daily-title")} }
                Chart { kind: ChartKind::Line, series: daily, placeholder: t!("admin-chart-empty") }
            }
            div { class: "admin-card",
                h3 { {t!("admin-distribution-title")} }
                Chart { kind: ChartKind::Pie, series: buckets, placeholder: t!("admin-chart-empty") }
            }
        }
    }
}
