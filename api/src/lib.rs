//! Client-side contract for the Yabasa diagnosis service.
//!
//! Everything that crosses the wire lives here: request/response shapes,
//! the transport seam, and the dispatcher that turns HTTP outcomes into
//! `Result<_, DiagnosisError>`. Rendering is the `ui` crate's job.

mod config;
mod dispatcher;
mod error;
mod transport;
mod types;

pub use config::{ClientConfig, DEFAULT_MODE, MODES};
pub use dispatcher::Dispatcher;
pub use error::{failure_message, DiagnosisError, GENERIC_AUTH_ERROR, GENERIC_DIAGNOSIS_ERROR};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use types::{
    is_truthy, scalar_text, AdminStats, DailySeries, DiagnosisRequest, DiagnosisResult,
    EvidenceItem, LegendEntry, Recommendation, RiskDistribution, ScaleLegend, Snippet,
    SnippetSegment, TopReason,
};
