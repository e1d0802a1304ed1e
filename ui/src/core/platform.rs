//! Platform glue: task spawning for the web and desktop shells.

use std::future::Future;

/// Run a UI-side future without blocking the caller.
///
/// On the web this hands the future to the browser's microtask queue; on
/// desktop it joins the Dioxus runtime of the calling component.
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(future);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        dioxus::prelude::spawn(future);
    }
}
