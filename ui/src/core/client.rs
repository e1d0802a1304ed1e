//! One HTTP dispatcher per mounted page.

use std::rc::Rc;

use api::{ClientConfig, DiagnosisError, Dispatcher};
use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

pub type SharedDispatcher = Result<Rc<Dispatcher>, DiagnosisError>;

/// Builds the dispatcher on first render and keeps it for the component's
/// lifetime. A build failure is kept too, so every submit reports it.
pub fn use_dispatcher() -> SharedDispatcher {
    use_hook(|| {
        let config = ClientConfig::from_env();
        info!(base_url = %config.base_url, "diagnosis client configured");
        Dispatcher::from_config(config).map(Rc::new).map_err(|err| {
            warn!(%err, "unable to build HTTP client");
            err
        })
    })
}
