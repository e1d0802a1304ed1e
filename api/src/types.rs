//! Wire shapes for requests and responses.
//!
//! Response types are deliberately forgiving: optional collections that are
//! absent, `null` or of the wrong type deserialize to `None` instead of
//! failing the whole payload. Display fields accept any JSON scalar and are
//! kept as text so the UI can show them verbatim.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::DEFAULT_MODE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisRequest {
    pub url: Option<String>,
    pub text: Option<String>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl DiagnosisRequest {
    /// Build a request from raw form input. Blank fields become `None`.
    pub fn new(url: &str, text: &str, mode: &str) -> Self {
        Self {
            url: non_empty(url),
            text: non_empty(text),
            mode: non_empty(mode).unwrap_or_else(|| DEFAULT_MODE.to_string()),
            sector: None,
        }
    }

    pub fn with_sector(mut self, sector: &str) -> Self {
        self.sector = non_empty(sector);
        self
    }

    pub fn has_content(&self) -> bool {
        self.url.is_some() || self.text.is_some()
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DiagnosisResult {
    #[serde(default, deserialize_with = "optional_text")]
    pub total: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub chart_png_base64: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub scale_legend: Option<ScaleLegend>,
    #[serde(default, deserialize_with = "lenient")]
    pub category_scores: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub measured_flags: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub evidence: Option<Vec<EvidenceItem>>,
    #[serde(default, deserialize_with = "lenient")]
    pub recommendations: Option<Vec<Recommendation>>,
    #[serde(default, deserialize_with = "lenient")]
    pub top_reasons: Option<Vec<TopReason>>,
    #[serde(default, deserialize_with = "optional_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScaleLegend {
    #[serde(default)]
    pub detail: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegendEntry {
    #[serde(default, deserialize_with = "text")]
    pub score: String,
    #[serde(default, deserialize_with = "text")]
    pub meaning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EvidenceItem {
    #[serde(default, deserialize_with = "text")]
    pub category: String,
    #[serde(default)]
    pub snippet: Snippet,
}

/// Evidence excerpt. Newer servers send pre-split segments; older ones send
/// a markup string with emphasis tags that the UI reduces to segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Snippet {
    Segments(Vec<SnippetSegment>),
    Markup(String),
}

impl Default for Snippet {
    fn default() -> Self {
        Self::Markup(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetSegment {
    pub text: String,
    #[serde(default)]
    pub emphasis: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "text")]
    pub category: String,
    #[serde(default, deserialize_with = "text")]
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TopReason {
    #[serde(default, deserialize_with = "text")]
    pub category: String,
    #[serde(default, deserialize_with = "text")]
    pub reason: String,
    #[serde(default, deserialize_with = "text")]
    pub weight: String,
}

/// Aggregate usage numbers behind the admin password.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdminStats {
    #[serde(default, alias = "requests_total")]
    pub total_requests: u64,
    #[serde(default)]
    pub daily: DailySeries,
    #[serde(default)]
    pub by_label: RiskDistribution,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RiskDistribution {
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub mid: f64,
    #[serde(default)]
    pub high: f64,
}

/// Text form of a JSON scalar; `None` for null, arrays and objects.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Loose truthiness for flag maps: servers send `true`, `1` or `"yes"`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            tracing::warn!(
                field_type = std::any::type_name::<T>(),
                %err,
                "dropping ill-typed optional field"
            );
            Ok(None)
        }
    }
}
