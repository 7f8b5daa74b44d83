//! MileStack - Main Entry Point

use milestack::app::App;

// WASM entry point (browser)
#[cfg(target_arch = "wasm32")]
fn main() {
    // Log to browser console to confirm WASM loaded
    web_sys::console::log_1(&"[WASM] MileStack - WASM initialized!".into());
    dioxus::launch(App);
}

// Native client (desktop)
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    milestack::shared::logging::init_tracing();

    let config = milestack::config::ClientConfig::from_env();
    tracing::info!(api_base = %config.api_base, "Starting MileStack...");

    dioxus::launch(App);
}
