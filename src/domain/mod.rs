// Domain layer: backend entities and the client-side rules around them
// Pure Rust, no framework dependencies

pub mod models;
pub mod services;
