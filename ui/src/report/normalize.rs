//! Single place where "missing means empty" is decided.
//!
//! `normalize` turns whatever the service sent into a fully populated
//! `Diagnosis`: every optional collection defaults to empty, every missing
//! measured flag to `false`, and an undecodable chart to no chart. Only the
//! headline scalars are mandatory.

use api::{is_truthy, scalar_text, DiagnosisError, DiagnosisResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dioxus::logger::tracing::warn;
use serde::Serialize;

use super::rich_text::RichText;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub total: String,
    pub label: String,
    /// Base64 PNG payload, kept exactly as received.
    pub chart_png_base64: Option<String>,
    pub legend: Vec<LegendLine>,
    pub categories: Vec<CategoryScore>,
    pub evidence: Vec<Evidence>,
    pub recommendations: Vec<Suggestion>,
    pub reasons: Vec<Reason>,
    pub meta: ReportMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendLine {
    pub score: String,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: String,
    pub measured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evidence {
    pub category: String,
    pub snippet: RichText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub category: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    pub category: String,
    pub reason: String,
    pub weight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportMeta {
    pub source: Option<String>,
    pub mode: Option<String>,
    pub sector: Option<String>,
}

pub fn normalize(result: &DiagnosisResult) -> Result<Diagnosis, DiagnosisError> {
    let total = result
        .total
        .clone()
        .ok_or_else(|| missing_scalar("total"))?;
    let label = result
        .label
        .clone()
        .ok_or_else(|| missing_scalar("label"))?;

    let legend = match &result.scale_legend {
        Some(legend) => legend
            .detail
            .iter()
            .map(|entry| LegendLine {
                score: entry.score.clone(),
                meaning: entry.meaning.clone(),
            })
            .collect(),
        None => absent("scale_legend"),
    };

    let categories = match &result.category_scores {
        Some(scores) => scores
            .iter()
            .map(|(name, score)| CategoryScore {
                name: name.clone(),
                score: scalar_text(score).unwrap_or_default(),
                measured: result
                    .measured_flags
                    .as_ref()
                    .and_then(|flags| flags.get(name))
                    .map(is_truthy)
                    .unwrap_or(false),
            })
            .collect(),
        None => absent("category_scores"),
    };

    let evidence = match &result.evidence {
        Some(items) => items
            .iter()
            .map(|item| Evidence {
                category: item.category.clone(),
                snippet: RichText::from_snippet(&item.snippet),
            })
            .collect(),
        None => absent("evidence"),
    };

    let recommendations = match &result.recommendations {
        Some(items) => items
            .iter()
            .map(|item| Suggestion {
                category: item.category.clone(),
                suggestion: item.suggestion.clone(),
            })
            .collect(),
        None => absent("recommendations"),
    };

    let reasons = match &result.top_reasons {
        Some(items) => items
            .iter()
            .map(|item| Reason {
                category: item.category.clone(),
                reason: item.reason.clone(),
                weight: item.weight.clone(),
            })
            .collect(),
        None => absent("top_reasons"),
    };

    Ok(Diagnosis {
        total,
        label,
        chart_png_base64: decodable_chart(result.chart_png_base64.as_deref()),
        legend,
        categories,
        evidence,
        recommendations,
        reasons,
        meta: ReportMeta {
            source: result.source.clone(),
            mode: result.mode.clone(),
            sector: result.sector.clone(),
        },
    })
}

fn missing_scalar(field: &str) -> DiagnosisError {
    warn!(field, "diagnosis payload missing headline field");
    DiagnosisError::MalformedResponse(format!("response is missing `{field}`"))
}

// Partial data is expected from older servers; it is logged, never surfaced.
fn absent<T>(field: &str) -> Vec<T> {
    warn!(field, "partial diagnosis payload; rendering empty section");
    Vec::new()
}

fn decodable_chart(payload: Option<&str>) -> Option<String> {
    let payload = payload?.trim();
    if payload.is_empty() {
        return None;
    }
    match STANDARD.decode(payload) {
        Ok(_) => Some(payload.to_string()),
        Err(err) => {
            warn!(%err, "chart payload is not valid base64; skipping image");
            None
        }
    }
}
