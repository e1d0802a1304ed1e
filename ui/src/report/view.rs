use dioxus::prelude::*;

use super::{EvidenceBlock, Headline, Report, RichText, TableRow};
use crate::t;

#[component]
pub fn ReportView(report: Report) -> Element {
    let Report {
        headline,
        chart,
        legend,
        table,
        evidence,
        recommendations,
        reasons,
    } = report;

    rsx! {
        section { class: "report",
            {render_headline(&headline)}

            div { class: "report__panels",
                div { class: "report-card report-chart",
                    h3 { {t!("report-chart-title")} }
                    if let Some(image) = chart {
                        img {
                            class: "report-chart__image",
                            alt: t!("report-chart-alt"),
                            src: image.data_url(),
                        }
                    } else {
                        p { class: "report-card__placeholder", {t!("report-chart-missing")} }
                    }

                    h4 { {t!("report-legend-title")} }
                    ul { class: "report-legend",
                        for line in legend.iter() {
                            li { "{line}" }
                        }
                    }
                }

                div { class: "report-card",
                    h3 { {t!("report-table-title")} }
                    {render_table(&table)}
                }
            }

            div { class: "report-card report-evidence",
                h3 { {t!("report-evidence-title")} }
                if evidence.is_empty() {
                    p { class: "report-card__placeholder", {t!("report-evidence-empty")} }
                }
                for block in evidence.iter() {
                    {render_evidence(block)}
                }
            }

            div { class: "report__panels",
                div { class: "report-card",
                    h3 { {t!("report-recommendations-title")} }
                    ul { class: "report-recommendations",
                        for line in recommendations.iter() {
                            li { "{line}" }
                        }
                    }
                }
                div { class: "report-card",
                    h3 { {t!("report-reasons-title")} }
                    ol { class: "report-reasons",
                        for line in reasons.iter() {
                            li { "{line}" }
                        }
                    }
                }
            }
        }
    }
}

fn render_headline(headline: &Headline) -> Element {
    let meta = &headline.meta;
    let mut parts = Vec::new();
    if let Some(source) = meta.source.as_deref() {
        parts.push(t!("report-meta-source", source = source));
    }
    if let Some(mode) = meta.mode.as_deref() {
        parts.push(t!("report-meta-mode", mode = mode));
    }
    if let Some(sector) = meta.sector.as_deref() {
        parts.push(t!("report-meta-sector", sector = sector));
    }
    let meta_line = parts.join(" · ");

    rsx! {
        div { class: "report-headline",
            span { class: "report-headline__label-caption", {t!("report-total")} }
            strong { class: "report-headline__total", "{headline.total}" }
            span { class: "report-headline__label", "{headline.label}" }
            if !meta_line.is_empty() {
                span { class: "report-headline__meta", "{meta_line}" }
            }
        }
    }
}

fn render_table(rows: &[TableRow]) -> Element {
    rsx! {
        table { class: "report-table",
            thead {
                tr {
                    th { {t!("report-table-category")} }
                    th { {t!("report-table-score")} }
                    th { {t!("report-table-status")} }
                }
            }
            tbody {
                for row in rows.iter() {
                    tr { class: row.css_class(),
                        td { "{row.category}" }
                        td { "{row.score}" }
                        td { "{row.marker}" }
                    }
                }
            }
        }
    }
}

fn render_evidence(block: &EvidenceBlock) -> Element {
    rsx! {
        div { class: "report-evidence__item",
            b { class: "report-evidence__category", "{block.category}" }
            "："
            {render_rich_text(&block.snippet)}
        }
    }
}

// Text nodes only: emphasis comes from the segment flag, never from markup.
fn render_rich_text(text: &RichText) -> Element {
    rsx! {
        span { class: "report-evidence__snippet",
            for segment in text.segments.iter() {
                if segment.emphasis {
                    mark { class: "report-evidence__emphasis", "{segment.text}" }
                } else {
                    "{segment.text}"
                }
            }
        }
    }
}
