//! Diagnosis report: normalization, projection into display regions, and
//! the Dioxus panels that draw them.
//!
//! The pipeline is `DiagnosisResult -> normalize -> Diagnosis -> render ->
//! Report`. `render` is pure, so the same payload always yields the same
//! `Report`, and the display surface simply swaps the whole value.

mod normalize;
pub use normalize::{
    normalize, CategoryScore, Diagnosis, Evidence, LegendLine, Reason, ReportMeta, Suggestion,
};

mod rich_text;
pub use rich_text::{RichText, Segment};

mod view;
pub use view::ReportView;

mod export;
pub use export::ReportExportPanel;

use api::{DiagnosisError, DiagnosisResult};
use serde::Serialize;

use crate::core::{format, status::Status};

/// Words the renderer bakes into its lines.
#[derive(Debug, Clone)]
pub struct Labels {
    pub measured: String,
    pub unmeasured: String,
    /// Parenthetical after a reason, given the weight: `（weight 3）`.
    pub weight_note: fn(&str) -> String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            measured: "measured".into(),
            unmeasured: "unmeasured".into(),
            weight_note: |weight| format!("（weight {weight}）"),
        }
    }
}

impl Labels {
    /// Each locale owns the whole weight parenthetical, spacing included.
    pub fn localized() -> Self {
        Self {
            measured: crate::t!("report-measured"),
            unmeasured: crate::t!("report-unmeasured"),
            weight_note: |weight| crate::t!("report-reason-weight", weight = weight),
        }
    }
}

/// Display state for one diagnosis, one field per display region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub headline: Headline,
    pub chart: Option<ChartImage>,
    pub legend: Vec<String>,
    pub table: Vec<TableRow>,
    pub evidence: Vec<EvidenceBlock>,
    pub recommendations: Vec<String>,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub total: String,
    pub label: String,
    pub meta: ReportMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartImage {
    pub png_base64: String,
}

impl ChartImage {
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.png_base64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub category: String,
    pub score: String,
    pub marker: String,
    pub measured: bool,
}

impl TableRow {
    pub fn css_class(&self) -> &'static str {
        if self.measured {
            "report-table__row"
        } else {
            "report-table__row report-table__row--unmeasured"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceBlock {
    pub category: String,
    pub snippet: RichText,
}

pub fn render(diagnosis: &Diagnosis, labels: &Labels) -> Report {
    Report {
        headline: Headline {
            total: diagnosis.total.clone(),
            label: diagnosis.label.clone(),
            meta: diagnosis.meta.clone(),
        },
        chart: diagnosis
            .chart_png_base64
            .as_ref()
            .map(|png| ChartImage {
                png_base64: png.clone(),
            }),
        legend: diagnosis
            .legend
            .iter()
            .map(|line| format!("{}: {}", line.score, line.meaning))
            .collect(),
        table: diagnosis
            .categories
            .iter()
            .map(|category| TableRow {
                category: category.name.clone(),
                score: category.score.clone(),
                marker: if category.measured {
                    labels.measured.clone()
                } else {
                    labels.unmeasured.clone()
                },
                measured: category.measured,
            })
            .collect(),
        evidence: diagnosis
            .evidence
            .iter()
            .map(|item| EvidenceBlock {
                category: item.category.clone(),
                snippet: item.snippet.clone(),
            })
            .collect(),
        recommendations: diagnosis
            .recommendations
            .iter()
            .map(|item| format!("{}: {}", item.category, item.suggestion))
            .collect(),
        reasons: diagnosis
            .reasons
            .iter()
            .map(|item| {
                format!(
                    "{}: {}{}",
                    item.category,
                    item.reason,
                    (labels.weight_note)(&item.weight)
                )
            })
            .collect(),
    }
}

/// Normalize then render; fails only on a missing headline.
pub fn present(result: &DiagnosisResult, labels: &Labels) -> Result<Report, DiagnosisError> {
    normalize(result).map(|diagnosis| render(&diagnosis, labels))
}

/// What the diagnosis page shows: a status line and at most one report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplaySurface {
    pub status: Status,
    pub report: Option<Report>,
}

impl DisplaySurface {
    /// Mark a submission as in flight; the previous report stays until replaced.
    pub fn begin(&mut self) {
        self.status = Status::Working;
    }

    /// Apply a finished submission. Failures clear the report entirely.
    pub fn settle(&mut self, outcome: Result<Report, DiagnosisError>) {
        match outcome {
            Ok(report) => {
                self.report = Some(report);
                self.status = Status::Done(format::clock_now());
            }
            Err(err) => self.reject(err.to_string()),
        }
    }

    /// Refuse a submission before it is sent, e.g. for empty input.
    pub fn reject(&mut self, message: String) {
        self.report = None;
        self.status = Status::Error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::RequestGuard;
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    fn present_json(value: Value) -> Result<Report, DiagnosisError> {
        let result: DiagnosisResult = serde_json::from_value(value).unwrap();
        present(&result, &Labels::default())
    }

    #[test]
    fn scenario_table_and_evidence() {
        let report = present_json(json!({
            "total": 72,
            "label": "中",
            "category_scores": {"A": 80, "B": 40},
            "measured_flags": {"A": true},
            "evidence": [{"category": "A", "snippet": "<b>x</b>"}]
        }))
        .unwrap();

        let rows: Vec<(&str, &str, &str)> = report
            .table
            .iter()
            .map(|r| (r.category.as_str(), r.score.as_str(), r.marker.as_str()))
            .collect();
        assert_eq!(rows, [("A", "80", "measured"), ("B", "40", "unmeasured")]);
        assert_eq!(
            report.table[1].css_class(),
            "report-table__row report-table__row--unmeasured"
        );

        assert_eq!(report.evidence.len(), 1);
        assert_eq!(report.evidence[0].category, "A");
        assert_eq!(
            report.evidence[0].snippet.segments,
            vec![Segment {
                text: "x".into(),
                emphasis: true
            }]
        );
        assert_eq!(report.headline.total, "72");
        assert_eq!(report.headline.label, "中");
    }

    #[test]
    fn reasons_keep_server_order_regardless_of_weight() {
        let report = present_json(json!({
            "total": 4, "label": "低",
            "top_reasons": [
                {"category": "X", "reason": "r1", "weight": 3},
                {"category": "Y", "reason": "r2", "weight": 1}
            ]
        }))
        .unwrap();
        assert_eq!(report.reasons, ["X: r1（weight 3）", "Y: r2（weight 1）"]);

        let flipped = present_json(json!({
            "total": 4, "label": "低",
            "top_reasons": [
                {"category": "Y", "reason": "r2", "weight": 1},
                {"category": "X", "reason": "r1", "weight": 3}
            ]
        }))
        .unwrap();
        assert_eq!(flipped.reasons[0], "Y: r2（weight 1）");
    }

    #[test]
    fn legend_and_recommendation_lines() {
        let report = present_json(json!({
            "total": 9, "label": "中",
            "scale_legend": {"detail": [
                {"score": 0, "meaning": "問題なし"},
                {"score": 5, "meaning": "重大"}
            ]},
            "recommendations": [{"category": "給与", "suggestion": "基本給を確認"}]
        }))
        .unwrap();
        assert_eq!(report.legend, ["0: 問題なし", "5: 重大"]);
        assert_eq!(report.recommendations, ["給与: 基本給を確認"]);
    }

    #[test]
    fn absent_collections_render_empty() {
        let report = present_json(json!({"total": 0, "label": "低"})).unwrap();
        assert!(report.legend.is_empty());
        assert!(report.table.is_empty());
        assert!(report.evidence.is_empty());
        assert!(report.recommendations.is_empty());
        assert!(report.reasons.is_empty());
        assert!(report.chart.is_none());
    }

    #[test]
    fn chart_becomes_png_data_url() {
        let report =
            present_json(json!({"total": 1, "label": "x", "chart_png_base64": "iVBORw0KGgo="}))
                .unwrap();
        assert_eq!(
            report.chart.unwrap().data_url(),
            "data:image/png;base64,iVBORw0KGgo="
        );
    }

    #[test]
    fn localized_labels_flow_into_lines() {
        let labels = Labels {
            measured: "測定済".into(),
            unmeasured: "測定不能".into(),
            weight_note: |weight| format!("（重み{weight}）"),
        };
        let result: DiagnosisResult = serde_json::from_value(json!({
            "total": 1, "label": "低",
            "category_scores": {"A": 1},
            "top_reasons": [{"category": "A", "reason": "r", "weight": 2}]
        }))
        .unwrap();
        let report = present(&result, &labels).unwrap();
        assert_eq!(report.table[0].marker, "測定不能");
        assert_eq!(report.reasons, ["A: r（重み2）"]);
    }

    #[test]
    fn surface_replaces_rather_than_accumulates() {
        let payload = json!({
            "total": 72, "label": "中",
            "category_scores": {"A": 80, "B": 40},
            "recommendations": [{"category": "A", "suggestion": "s"}]
        });
        let mut surface = DisplaySurface::default();
        surface.settle(present_json(payload.clone()));
        let first = surface.report.clone();
        surface.begin();
        surface.settle(present_json(payload));

        assert_eq!(surface.report, first);
        assert_eq!(surface.report.as_ref().unwrap().table.len(), 2);
        assert!(matches!(surface.status, Status::Done(_)));
    }

    #[test]
    fn failure_clears_previous_report() {
        let mut surface = DisplaySurface::default();
        surface.settle(present_json(json!({"total": 1, "label": "低"})));
        assert!(surface.report.is_some());

        surface.settle(Err(DiagnosisError::transport(Some(401), "bad password")));
        assert!(surface.report.is_none());
        assert_eq!(surface.status, Status::Error("bad password".into()));
    }

    #[test]
    fn local_rejection_clears_report() {
        let mut surface = DisplaySurface::default();
        surface.settle(present_json(json!({"total": 1, "label": "低"})));

        surface.reject("enter a URL or text".into());
        assert!(surface.report.is_none());
        assert_eq!(surface.status, Status::Error("enter a URL or text".into()));
    }

    #[test]
    fn older_reply_cannot_overwrite_a_later_rejection() {
        let guard = RequestGuard::default();
        let mut surface = DisplaySurface::default();

        let in_flight = guard.issue();
        surface.begin();

        // Resubmitted with empty fields: a token is taken, then the form is refused.
        let _rejected = guard.issue();
        surface.reject("empty".into());

        let late = present_json(json!({"total": 9, "label": "高"}));
        if let Some(outcome) = guard.accept(in_flight, late) {
            surface.settle(outcome);
        }
        assert!(surface.report.is_none());
        assert_eq!(surface.status, Status::Error("empty".into()));
    }

    proptest! {
        #[test]
        fn table_has_one_row_per_category_in_order(
            scores in proptest::collection::vec(("[a-z]{1,8}", 0u32..100), 0..12)
        ) {
            let mut map = Map::new();
            for (name, score) in &scores {
                map.insert(name.clone(), json!(score));
            }
            let expected: Vec<String> = map.keys().cloned().collect();

            let report = present_json(json!({
                "total": 1, "label": "x", "category_scores": Value::Object(map)
            }))
            .unwrap();

            let names: Vec<String> = report.table.iter().map(|r| r.category.clone()).collect();
            prop_assert_eq!(names, expected);
        }

        #[test]
        fn render_is_idempotent(total in 0u32..50, flags in proptest::collection::vec(any::<bool>(), 0..6)) {
            let mut scores = Map::new();
            let mut measured = Map::new();
            for (i, flag) in flags.iter().enumerate() {
                scores.insert(format!("c{i}"), json!(i));
                if *flag {
                    measured.insert(format!("c{i}"), json!(true));
                }
            }
            let result: DiagnosisResult = serde_json::from_value(json!({
                "total": total, "label": "x",
                "category_scores": scores, "measured_flags": measured
            }))
            .unwrap();
            let labels = Labels::default();
            prop_assert_eq!(present(&result, &labels).unwrap(), present(&result, &labels).unwrap());
        }
    }
}
