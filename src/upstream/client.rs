//! HTTP client for the Student Records API.

use axum::http::StatusCode;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::observability::metrics;
use crate::upstream::target::{TargetError, UpstreamTarget};
use crate::upstream::Record;

const X_REQUEST_ID: &str = "x-request-id";

/// Errors from a call to the Student Records API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The API could not be reached, or the exchange broke off.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// The form action that caused an upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Add,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful API answer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    /// Decoded body; `Null` when empty, a JSON string when not JSON.
    pub body: Value,
}

/// Client for the `/etudiants/` collection.
///
/// Holds no per-request state: every call takes the [`UpstreamTarget`]
/// resolved for the inbound request that triggered it.
#[derive(Debug, Clone)]
pub struct StudentApi {
    client: reqwest::Client,
}

impl StudentApi {
    /// Create a client whose calls are each bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(UpstreamError::Build)?;
        Ok(Self { client })
    }

    /// `GET /etudiants/`
    pub async fn list(&self, target: &UpstreamTarget) -> Result<UpstreamReply, UpstreamError> {
        let request = self.client.get(target.collection());
        self.send(Action::View, request, target).await
    }

    /// `GET /etudiants/{id}`
    pub async fn fetch(
        &self,
        target: &UpstreamTarget,
        id: &str,
    ) -> Result<UpstreamReply, UpstreamError> {
        let request = self.client.get(target.record(id)?);
        self.send(Action::View, request, target).await
    }

    /// `POST /etudiants/` with the record as JSON.
    pub async fn create(
        &self,
        target: &UpstreamTarget,
        record: &Record,
    ) -> Result<UpstreamReply, UpstreamError> {
        let request = self.client.post(target.collection()).json(record);
        self.send(Action::Add, request, target).await
    }

    /// `PUT /etudiants/{id}` with the record as JSON.
    pub async fn update(
        &self,
        target: &UpstreamTarget,
        id: &str,
        record: &Record,
    ) -> Result<UpstreamReply, UpstreamError> {
        let request = self.client.put(target.record(id)?).json(record);
        self.send(Action::Update, request, target).await
    }

    /// `DELETE /etudiants/{id}`
    pub async fn delete(
        &self,
        target: &UpstreamTarget,
        id: &str,
    ) -> Result<UpstreamReply, UpstreamError> {
        let request = self.client.delete(target.record(id)?);
        self.send(Action::Delete, request, target).await
    }

    /// Issue one request. Never retried.
    async fn send(
        &self,
        action: Action,
        request: RequestBuilder,
        target: &UpstreamTarget,
    ) -> Result<UpstreamReply, UpstreamError> {
        let request = match target.request_id() {
            Some(id) => request.header(X_REQUEST_ID, id.clone()),
            None => request,
        };

        let start = Instant::now();
        let result = exchange(request).await;
        match &result {
            Ok(reply) => {
                metrics::record_upstream_call(action.as_str(), "ok", start);
                tracing::debug!(
                    action = %action,
                    status = reply.status.as_u16(),
                    "Upstream call succeeded"
                );
            }
            Err(UpstreamError::Status { status, body }) => {
                metrics::record_upstream_call(action.as_str(), "error_status", start);
                tracing::error!(
                    action = %action,
                    status = status.as_u16(),
                    body = %body,
                    "Upstream error response"
                );
            }
            Err(e) => {
                metrics::record_upstream_call(action.as_str(), "transport_error", start);
                tracing::error!(action = %action, error = %e, "Upstream request failed");
            }
        }
        result
    }
}

async fn exchange(request: RequestBuilder) -> Result<UpstreamReply, UpstreamError> {
    let response = request.send().await.map_err(UpstreamError::Transport)?;
    let status = response.status();
    let text = response.text().await.map_err(UpstreamError::Transport)?;

    if !status.is_success() {
        return Err(UpstreamError::Status { status, body: text });
    }

    Ok(UpstreamReply {
        status,
        body: decode_body(&text),
    })
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
