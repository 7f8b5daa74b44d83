// Dioxus UI: routes, pages and the components they are built from
pub mod components;
pub mod pages;
pub mod routes;

pub use routes::{App, Route};
