//! The single page of the front-end.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Render context for `templates/index.html`.
#[derive(Debug, Clone, Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    /// Status code reported by the Student Records API, if a call was made.
    pub status: Option<u16>,
    /// Serialized JSON or a human-readable message.
    pub data: String,
    pub failed: bool,
}

/// An [`IndexPage`] together with the HTTP status it is served with.
#[derive(Debug, Clone)]
pub struct Page {
    code: StatusCode,
    page: IndexPage,
}

impl Page {
    /// Empty home page.
    pub fn home() -> Self {
        Self {
            code: StatusCode::OK,
            page: IndexPage {
                status: None,
                data: String::new(),
                failed: false,
            },
        }
    }

    /// Successful upstream call: served as 200, showing the API's status.
    pub fn outcome(upstream_status: StatusCode, data: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK,
            page: IndexPage {
                status: Some(upstream_status.as_u16()),
                data: data.into(),
                failed: false,
            },
        }
    }

    /// Failure page served with `code`.
    pub fn error(code: StatusCode, upstream_status: Option<StatusCode>, message: impl Into<String>) -> Self {
        Self {
            code,
            page: IndexPage {
                status: upstream_status.map(|s| s.as_u16()),
                data: message.into(),
                failed: true,
            },
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn context(&self) -> &IndexPage {
        &self.page
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self.page.render() {
            Ok(html) => (self.code, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render page");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template. Error: {err}"),
                )
                    .into_response()
            }
        }
    }
}
