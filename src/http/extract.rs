//! Request extractors for the form handlers.

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::{CONTENT_TYPE, HOST};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::{Form, Json};
use serde_json::Value;

use crate::http::error::ProxyError;
use crate::http::request::X_REQUEST_ID;
use crate::http::server::AppState;
use crate::upstream::{Record, UpstreamTarget};

/// A submitted form, as a JSON object.
///
/// URL-encoded bodies become an object of strings in field order, repeated
/// names becoming arrays; JSON bodies must be an object and are taken as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload(pub Record);

impl FormPayload {
    /// The `id` field, when it is a non-empty string or a number.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    /// Compact JSON of the whole submission.
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("application/json"))
}

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = ProxyError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(req.headers()) {
            let Json(record) = Json::<Record>::from_request(req, state)
                .await
                .map_err(|e| ProxyError::Payload {
                    status: e.status(),
                    message: e.body_text(),
                })?;
            return Ok(Self(record));
        }

        let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| ProxyError::Payload {
                status: e.status(),
                message: e.body_text(),
            })?;

        Ok(Self(group_fields(fields)))
    }
}

/// Build a record from decoded form pairs. A name sent more than once
/// (checkbox groups, multi-selects) collects its values into an array.
fn group_fields(fields: Vec<(String, String)>) -> Record {
    let mut record = Record::new();
    for (name, value) in fields {
        let value = Value::String(value);
        match record.get_mut(&name) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                record.insert(name, value);
            }
        }
    }
    record
}

impl FromRequestParts<AppState> for UpstreamTarget {
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| parts.uri.authority().map(|a| a.as_str()));

        let base = state.resolver.resolve(parts.uri.scheme_str(), host)?;
        let request_id = parts.headers.get(X_REQUEST_ID).cloned();

        Ok(UpstreamTarget::new(base).with_request_id(request_id))
    }
}
