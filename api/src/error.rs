use serde_json::Value;

pub const GENERIC_DIAGNOSIS_ERROR: &str = "diagnosis error";
pub const GENERIC_AUTH_ERROR: &str = "authentication error";

/// Failure outcome of a dispatch. `Display` is the user-facing status message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosisError {
    /// Network failure or non-2xx response.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },
    /// A 2xx body we could not read, or one missing `total`/`label`.
    #[error("{0}")]
    MalformedResponse(String),
}

impl DiagnosisError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::MalformedResponse(_) => None,
        }
    }
}

/// Derive the message for a failed response.
///
/// Order: `detail` from a JSON body, then the generic message when the body
/// parsed without a usable `detail`, then the status text when the body was
/// not JSON at all. An empty status text falls back to `generic`.
pub fn failure_message(status_text: &str, body: &[u8], generic: &str) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(parsed) => detail_text(&parsed).unwrap_or_else(|| generic.to_string()),
        Err(_) => {
            let status_text = status_text.trim();
            if status_text.is_empty() {
                generic.to_string()
            } else {
                status_text.to_string()
            }
        }
    }
}

fn detail_text(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        // Validation failures arrive as `[{"loc": [...], "msg": "..."}]`.
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
