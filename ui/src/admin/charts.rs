//! Minimal SVG charts for the admin dashboard.
//!
//! Geometry is computed by plain functions (`geometry`) so it can be tested
//! without a renderer; the `Chart` component only turns it into SVG nodes.

use std::f64::consts::PI;

use dioxus::prelude::*;

use crate::core::format;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 240.0;
const PAD: f64 = 32.0;
const PIE_RADIUS: f64 = 100.0;

const PALETTE: &[&str] = &["#4caf82", "#f0b429", "#e5484d", "#4f8df7", "#a36bf2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Pie,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl LabeledSeries {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    /// Pairs up labels and values; extra entries on either side are ignored.
    fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
            .map(|(label, value)| (label, if value.is_finite() { value.max(0.0) } else { 0.0 }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartGeometry {
    Line(LinePlot),
    Pie(Vec<PieSlice>),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    pub points: Vec<(f64, f64)>,
    pub ticks: Vec<(f64, String)>,
    pub max: f64,
}

impl LinePlot {
    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub share: f64,
    /// `None` when the slice is the whole pie (an arc cannot close on itself).
    pub path: Option<String>,
    pub color: &'static str,
}

pub fn geometry(kind: ChartKind, series: &LabeledSeries) -> ChartGeometry {
    match kind {
        ChartKind::Line => line_geometry(series),
        ChartKind::Pie => pie_geometry(series),
    }
}

fn line_geometry(series: &LabeledSeries) -> ChartGeometry {
    let points: Vec<(&str, f64)> = series.points().collect();
    if points.is_empty() {
        return ChartGeometry::Empty;
    }

    let max = points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return ChartGeometry::Empty;
    }
    let span_x = WIDTH - 2.0 * PAD;
    let span_y = HEIGHT - 2.0 * PAD;
    let step = if points.len() > 1 {
        span_x / (points.len() - 1) as f64
    } else {
        0.0
    };

    let mut plot = LinePlot {
        points: Vec::with_capacity(points.len()),
        ticks: Vec::with_capacity(points.len()),
        max,
    };
    for (i, (label, value)) in points.into_iter().enumerate() {
        let x = if step > 0.0 { PAD + step * i as f64 } else { WIDTH / 2.0 };
        let y = HEIGHT - PAD - value / max * span_y;
        plot.points.push((x, y));
        plot.ticks.push((x, label.to_string()));
    }
    ChartGeometry::Line(plot)
}

fn pie_geometry(series: &LabeledSeries) -> ChartGeometry {
    let total: f64 = series.points().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return ChartGeometry::Empty;
    }

    let (cx, cy) = (WIDTH / 2.0, HEIGHT / 2.0);
    let mut angle = -PI / 2.0;
    let mut slices = Vec::new();

    for (i, (label, value)) in series.points().enumerate() {
        let share = value / total;
        let color = PALETTE[i % PALETTE.len()];
        if share <= 0.0 {
            slices.push(PieSlice {
                label: label.to_string(),
                value,
                share,
                path: Some(String::new()),
                color,
            });
            continue;
        }

        let sweep = share * 2.0 * PI;
        let path = if share >= 1.0 {
            None
        } else {
            let (x1, y1) = (cx + PIE_RADIUS * angle.cos(), cy + PIE_RADIUS * angle.sin());
            let end = angle + sweep;
            let (x2, y2) = (cx + PIE_RADIUS * end.cos(), cy + PIE_RADIUS * end.sin());
            let large_arc = u8::from(sweep > PI);
            Some(format!(
                "M {cx:.1} {cy:.1} L {x1:.1} {y1:.1} A {r:.1} {r:.1} 0 {large_arc} 1 {x2:.1} {y2:.1} Z",
                r = PIE_RADIUS
            ))
        };
        angle += sweep;

        slices.push(PieSlice {
            label: label.to_string(),
            value,
            share,
            path,
            color,
        });
    }
    ChartGeometry::Pie(slices)
}

/// Draws `series` as the requested chart kind, or a placeholder when there
/// is nothing to plot.
#[component]
pub fn Chart(kind: ChartKind, series: LabeledSeries, placeholder: String) -> Element {
    match geometry(kind, &series) {
        ChartGeometry::Empty => rsx! {
            p { class: "admin-card__placeholder", "{placeholder}" }
        },
        ChartGeometry::Line(plot) => render_line(&plot),
        ChartGeometry::Pie(slices) => render_pie(&slices),
    }
}

fn render_line(plot: &LinePlot) -> Element {
    let view_box = format!("0 0 {WIDTH} {HEIGHT}");
    let polyline = plot.polyline();
    let baseline = HEIGHT - PAD;
    let axis_end = WIDTH - PAD;
    let tick_y = HEIGHT - 8.0;
    let max_label = format::format_count(plot.max);

    rsx! {
        svg { class: "admin-chart admin-chart--line", view_box: "{view_box}",
            line {
                class: "admin-chart__axis",
                x1: "{PAD}",
                y1: "{baseline}",
                x2: "{axis_end}",
                y2: "{baseline}",
            }
            text { class: "admin-chart__tick", x: "4", y: "{PAD}", "{max_label}" }
            polyline { class: "admin-chart__line", points: "{polyline}", fill: "none" }
            for (x, y) in plot.points.iter() {
                circle { class: "admin-chart__dot", cx: "{x}", cy: "{y}", r: "3" }
            }
            for (x, label) in plot.ticks.iter() {
                text {
                    class: "admin-chart__tick",
                    x: "{x}",
                    y: "{tick_y}",
                    text_anchor: "middle",
                    "{label}"
                }
            }
        }
    }
}

fn render_pie(slices: &[PieSlice]) -> Element {
    let view_box = format!("0 0 {WIDTH} {HEIGHT}");
    let (cx, cy) = (WIDTH / 2.0, HEIGHT / 2.0);

    rsx! {
        div { class: "admin-chart admin-chart--pie",
            svg { view_box: "{view_box}",
                for slice in slices.iter() {
                    if let Some(d) = slice.path.as_deref() {
                        path { d: "{d}", fill: slice.color }
                    } else {
                        circle { cx: "{cx}", cy: "{cy}", r: "{PIE_RADIUS}", fill: slice.color }
                    }
                }
            }
            ul { class: "admin-chart__legend",
                for slice in slices.iter() {
                    li {
                        span { class: "admin-chart__swatch", background: slice.color }
                        {legend_line(slice)}
                    }
                }
            }
        }
    }
}

fn legend_line(slice: &PieSlice) -> String {
    format!(
        "{} {} ({})",
        slice.label,
        format::format_count(slice.value),
        format::format_share(slice.share)
    )
}
