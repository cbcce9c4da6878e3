//! Configuration loading from disk and environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("PORT='{0}' is not a valid port")]
    InvalidPort(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides. The caller validates the final result.
pub fn apply_env_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
    if let Ok(port) = std::env::var(PORT_ENV) {
        override_port(config, &port)?;
    }
    Ok(())
}

/// Replace the port of `listener.bind_address`, keeping its host.
pub fn override_port(config: &mut AppConfig, port: &str) -> Result<(), ConfigError> {
    let port: u16 = port
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(port.to_string()))?;

    let current = &config.listener.bind_address;
    let ip = match current.parse::<SocketAddr>() {
        Ok(addr) => addr.ip(),
        Err(_) => [0, 0, 0, 0].into(),
    };
    config.listener.bind_address = SocketAddr::new(ip, port).to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_override_port_keeps_host() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "127.0.0.1:3000".into();
        override_port(&mut config, "8080").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
    }

    #[test]
    fn test_override_port_rejects_garbage() {
        let mut config = AppConfig::default();
        let err = override_port(&mut config, "30x0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_load_config_reports_validation() {
        let path = std::env::temp_dir().join(format!("sfp-config-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[timeouts]\nrequest_secs = 0").unwrap();

        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeouts.request_secs"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
