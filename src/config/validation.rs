//! Configuration validation.
//!
//! Serde handles syntax; this module checks the values make sense together.
//! All problems are collected rather than stopping at the first one.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.base_url: {0}")]
    InvalidBaseUrl(String),

    #[error("upstream.port must be non-zero")]
    ZeroPort,

    #[error("upstream.collection_path '{0}' must start and end with '/'")]
    InvalidCollectionPath(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("timeouts.request_secs ({request_secs}) must exceed upstream.timeout_secs ({upstream_secs})")]
    DeadlineTooShort { request_secs: u64, upstream_secs: u64 },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let upstream = &config.upstream;
    if let Some(base) = &upstream.base_url {
        match Url::parse(base) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                errors.push(ValidationError::InvalidBaseUrl(format!(
                    "unsupported scheme '{}'",
                    url.scheme()
                )));
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::InvalidBaseUrl(e.to_string())),
        }
    } else {
        if upstream.port == 0 {
            errors.push(ValidationError::ZeroPort);
        }
        let path = &upstream.collection_path;
        if !path.starts_with('/') || !path.ends_with('/') {
            errors.push(ValidationError::InvalidCollectionPath(path.clone()));
        }
    }

    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    } else if config.timeouts.request_secs <= upstream.timeout_secs {
        // The upstream call must time out first, or its error page is never seen.
        errors.push(ValidationError::DeadlineTooShort {
            request_secs: config.timeouts.request_secs,
            upstream_secs: upstream.timeout_secs,
        });
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.upstream.port = 0;
        config.upstream.collection_path = "etudiants".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroPort));
        assert!(errors.contains(&ValidationError::Zero("timeouts.request_secs")));
    }

    #[test]
    fn test_request_deadline_must_outlast_upstream_timeout() {
        let mut config = AppConfig::default();
        config.upstream.timeout_secs = 10;
        config.timeouts.request_secs = 10;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::DeadlineTooShort {
                request_secs: 10,
                upstream_secs: 10,
            }])
        );

        config.timeouts.request_secs = 5;
        assert!(validate_config(&config).is_err());

        config.timeouts.request_secs = 11;
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_base_url_must_be_http() {
        let mut config = AppConfig::default();
        config.upstream.base_url = Some("ftp://api/etudiants/".into());
        assert!(matches!(
            validate_config(&config).unwrap_err()[0],
            ValidationError::InvalidBaseUrl(_)
        ));

        config.upstream.base_url = Some("not a url".into());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_explicit_base_ignores_derivation_fields() {
        let mut config = AppConfig::default();
        config.upstream.base_url = Some("http://127.0.0.1:3001/etudiants/".into());
        config.upstream.port = 0;
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
