// Backend REST API client and the HTTP transports behind it

pub mod client;
pub mod transport;

pub use client::{error_message, ApiClient};
pub use transport::{default_transport, HttpRequest, HttpResponse, HttpTransport, Method};
