//! Endpoint configuration for the diagnosis and admin services.

use serde::{Deserialize, Serialize};

/// Modes the scoring service recognises. Validation happens server-side;
/// the UI only uses this list to populate its selector.
pub const MODES: &[&str] = &["standard", "strict", "lenient"];

pub const DEFAULT_MODE: &str = "standard";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub analyze_path: String,
    pub admin_path: String,
    /// Only honoured on native targets; the browser fetch has no timeout knob.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            analyze_path: "/analyze".to_string(),
            admin_path: "/admin/data".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Resolve the configuration for the current platform.
    ///
    /// - Native: `YABASA_API_BASE` and `YABASA_TIMEOUT_SECS` from the process env.
    /// - Web: `YABASA_API_BASE` baked in at compile time, else the page origin.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(base) = env_base_url() {
            config.base_url = base;
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(secs) = std::env::var("YABASA_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
        {
            config.timeout_secs = secs;
        }

        config
    }

    pub fn analyze_url(&self) -> String {
        join_url(&self.base_url, &self.analyze_path)
    }

    pub fn admin_url(&self) -> String {
        join_url(&self.base_url, &self.admin_path)
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(target_arch = "wasm32")]
fn env_base_url() -> Option<String> {
    option_env!("YABASA_API_BASE")
        .map(str::to_string)
        .or_else(|| web_sys::window().and_then(|w| w.location().origin().ok()))
}

#[cfg(not(target_arch = "wasm32"))]
fn env_base_url() -> Option<String> {
    std::env::var("YABASA_API_BASE")
        .ok()
        .filter(|raw| !raw.trim().is_empty())
}
