pub mod errors;
pub mod logging;

// Framework-free collection state
pub mod state;

// Dioxus glue over the state module
pub mod hooks;
