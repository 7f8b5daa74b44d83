// Public API exports (shared between browser and native builds)
pub mod config;
pub mod domain;
pub mod shared;

// HTTP transport and local storage; target-specific backends are gated inside
pub mod infrastructure;

// Dioxus UI
pub mod app;

pub use app::App;
