//! Client configuration.
//!
//! The API base URL comes from `MILESTACK_API_URL`: read at runtime on
//! native targets, baked in at compile time for the browser build.

/// Base URL used when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

pub const API_BASE_ENV: &str = "MILESTACK_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }
}

impl ClientConfig {
    pub fn with_api_base(api_base: impl AsRef<str>) -> Self {
        Self {
            api_base: normalize_base(api_base.as_ref()),
        }
    }

    /// Resolve the configuration for the current target.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        if let Ok(value) = std::env::var(API_BASE_ENV) {
            if !value.trim().is_empty() {
                return Self::with_api_base(value);
            }
        }

        match option_env!("MILESTACK_API_URL") {
            Some(value) if !value.trim().is_empty() => Self::with_api_base(value),
            _ => Self::default(),
        }
    }

    /// Join an absolute API path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base() {
        assert_eq!(ClientConfig::default().api_base, "http://localhost:5000");
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        let config = ClientConfig::with_api_base("https://api.example.com//");
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.url("/api/projects"), "https://api.example.com/api/projects");
    }

    #[test]
    fn test_blank_base_falls_back() {
        assert_eq!(ClientConfig::with_api_base("  ").api_base, DEFAULT_API_BASE);
    }
}
