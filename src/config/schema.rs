//! Configuration schema definitions.
//!
//! Every table derives Serde traits and falls back to defaults, so an empty
//! TOML file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the form proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Student Records API location and client settings.
    pub upstream: UpstreamConfig,

    /// Inbound request deadlines.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub security: SecurityConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Where the Student Records API lives.
///
/// With `base_url` set, every call goes there. Without it the base is derived
/// per request from the inbound Host header, swapping in `port` and appending
/// `collection_path`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Explicit collection URL (e.g., "http://127.0.0.1:3001/etudiants/").
    pub base_url: Option<String>,

    /// Port of the API when deriving the base from the Host header.
    pub port: u16,

    /// Path of the student collection on the API.
    pub collection_path: String,

    /// Deadline for a single upstream call in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            port: 3001,
            collection_path: "/etudiants/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Timeout configuration for inbound requests.
///
/// Must exceed `upstream.timeout_secs` so a slow API is reported as such.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 35 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum form body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "student_form_proxy=debug,tower_http=debug".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.upstream.port, 3001);
        assert_eq!(config.upstream.collection_path, "/etudiants/");
        assert!(config.upstream.base_url.is_none());
    }

    #[test]
    fn test_partial_table() {
        let config: AppConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "http://api.internal:3001/etudiants/"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.upstream.base_url.as_deref(),
            Some("http://api.internal:3001/etudiants/")
        );
        assert_eq!(config.upstream.timeout_secs, 30);
    }
}
