//! Per-request resolution of the Student Records API location.

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;

/// Errors while working out where an upstream call should go.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("request carries no Host header")]
    MissingHost,

    #[error("cannot derive an API address from host '{0}'")]
    InvalidHost(String),

    #[error("invalid upstream base URL: {0}")]
    InvalidBase(#[from] url::ParseError),

    #[error("upstream base '{0}' cannot take path segments")]
    CannotBeABase(String),
}

/// How the collection URL is obtained for each request.
#[derive(Debug, Clone)]
pub enum BaseResolver {
    /// Declared in configuration; the inbound request is ignored.
    Fixed(Url),
    /// Same host as the inbound request, on the API's own port.
    SameHost { port: u16, collection_path: String },
}

impl BaseResolver {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, TargetError> {
        match &config.base_url {
            Some(raw) => {
                let mut url = Url::parse(raw)?;
                if url.cannot_be_a_base() {
                    return Err(TargetError::CannotBeABase(raw.clone()));
                }
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                Ok(Self::Fixed(url))
            }
            None => Ok(Self::SameHost {
                port: config.port,
                collection_path: config.collection_path.clone(),
            }),
        }
    }

    /// Resolve the collection URL for one inbound request.
    ///
    /// `scheme` defaults to `http` when the request URI carries none.
    pub fn resolve(&self, scheme: Option<&str>, host: Option<&str>) -> Result<Url, TargetError> {
        match self {
            Self::Fixed(url) => Ok(url.clone()),
            Self::SameHost { port, collection_path } => {
                let host = host.ok_or(TargetError::MissingHost)?;
                derive_base(scheme.unwrap_or("http"), host, *port, collection_path)
            }
        }
    }
}

/// Build `<scheme>://<hostname>:<port><collection_path>` from an inbound Host
/// header, dropping whatever port the header carried.
pub fn derive_base(
    scheme: &str,
    host: &str,
    port: u16,
    collection_path: &str,
) -> Result<Url, TargetError> {
    let hostname = strip_port(host);
    if hostname.is_empty() {
        return Err(TargetError::InvalidHost(host.to_string()));
    }

    Url::parse(&format!("{scheme}://{hostname}:{port}{collection_path}"))
        .map_err(|_| TargetError::InvalidHost(host.to_string()))
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 literal: keep everything up to the closing bracket.
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Where one inbound request sends its upstream calls.
///
/// Built fresh for every request and handed to each [`StudentApi`] call.
///
/// [`StudentApi`]: crate::upstream::StudentApi
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    base: Url,
    request_id: Option<HeaderValue>,
}

impl UpstreamTarget {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            request_id: None,
        }
    }

    /// Attach the inbound correlation id so it is forwarded upstream.
    pub fn with_request_id(mut self, request_id: Option<HeaderValue>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn request_id(&self) -> Option<&HeaderValue> {
        self.request_id.as_ref()
    }

    /// URL of the whole collection (`…/etudiants/`).
    pub fn collection(&self) -> Url {
        self.base.clone()
    }

    /// URL of a single record; `id` becomes one percent-encoded segment.
    pub fn record(&self, id: &str) -> Result<Url, TargetError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| TargetError::CannotBeABase(self.base.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}
