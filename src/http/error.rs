//! Mapping of request failures to error pages.
//!
//! Every failure ends as a rendered [`Page`] with a failure status, so each
//! inbound request gets exactly one response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::BoxError;
use thiserror::Error;

use crate::upstream::{Action, TargetError, UpstreamError};
use crate::view::Page;

/// Anything that stops a form action from completing.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("form for '{0}' has no id")]
    MissingId(Action),

    #[error("{message}")]
    Payload { status: StatusCode, message: String },
}

impl ProxyError {
    /// The page served for this failure.
    pub fn page(&self) -> Page {
        match self {
            ProxyError::Target(e) => target_page(e),
            ProxyError::Upstream(UpstreamError::Target(e)) => target_page(e),
            ProxyError::Upstream(UpstreamError::Status { status, body }) => {
                // Client errors are the user's to see; server errors mean a bad gateway.
                let code = if status.is_client_error() {
                    *status
                } else {
                    StatusCode::BAD_GATEWAY
                };
                Page::error(code, Some(*status), format!("Erreur de l'API ({status}) : {body}"))
            }
            ProxyError::Upstream(e) if e.is_timeout() => Page::error(
                StatusCode::GATEWAY_TIMEOUT,
                None,
                format!("API injoignable : {e}"),
            ),
            ProxyError::Upstream(e @ UpstreamError::Transport(_)) => Page::error(
                StatusCode::BAD_GATEWAY,
                None,
                format!("API injoignable : {e}"),
            ),
            ProxyError::Upstream(e @ UpstreamError::Build(_)) => Page::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                None,
                format!("Erreur interne : {e}"),
            ),
            ProxyError::MissingId(action) => Page::error(
                StatusCode::BAD_REQUEST,
                None,
                format!("Identifiant manquant ({action})"),
            ),
            ProxyError::Payload { status, message } => {
                Page::error(*status, None, format!("Formulaire invalide : {message}"))
            }
        }
    }
}

fn target_page(e: &TargetError) -> Page {
    match e {
        TargetError::MissingHost => {
            Page::error(StatusCode::BAD_REQUEST, None, "En-tête Host manquant")
        }
        TargetError::InvalidHost(host) => Page::error(
            StatusCode::BAD_REQUEST,
            None,
            format!("En-tête Host invalide : {host}"),
        ),
        TargetError::InvalidBase(_) | TargetError::CannotBeABase(_) => Page::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            format!("Erreur interne : {e}"),
        ),
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let page = self.page();
        tracing::warn!(error = %self, status = %page.code(), "Request failed");
        page.into_response()
    }
}

/// Turns errors raised by the middleware stack into pages.
///
/// Only the request deadline can fail there; anything else is reported as an
/// internal error.
pub async fn handle_middleware_error(err: BoxError) -> Page {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request deadline exceeded");
        Page::error(
            StatusCode::GATEWAY_TIMEOUT,
            None,
            "Délai de traitement dépassé",
        )
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        Page::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            format!("Erreur interne : {err}"),
        )
    }
}
