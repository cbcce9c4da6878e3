//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router for the home page and the four form actions
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve until a shutdown signal, then drain

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::error::handle_middleware_error;
use crate::http::handlers;
use crate::http::request::MakeRequestUuidV4;
use crate::lifecycle::shutdown_signal;
use crate::upstream::{BaseResolver, StudentApi, UpstreamError};

/// Application state injected into handlers.
///
/// Read-only: nothing here changes per request.
#[derive(Clone)]
pub struct AppState {
    pub api: StudentApi,
    pub resolver: Arc<BaseResolver>,
}

/// HTTP server for the form proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given (validated) configuration.
    pub fn new(config: &AppConfig) -> Result<Self, UpstreamError> {
        let resolver = BaseResolver::from_config(&config.upstream)?;
        let api = StudentApi::new(Duration::from_secs(config.upstream.timeout_secs))?;

        match &resolver {
            BaseResolver::Fixed(base) => {
                tracing::info!(base = %base, "Student API at configured address");
            }
            BaseResolver::SameHost { port, collection_path } => {
                tracing::info!(
                    port = *port,
                    path = %collection_path,
                    "Student API derived from Host header"
                );
            }
        }

        let state = AppState {
            api,
            resolver: Arc::new(resolver),
        };

        let router = Self::build_router(config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The body limit is enforced by the `Form`/`Json` extractors and the
    /// request deadline by a tower timeout, so both failures end up as pages.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::home))
            .route("/view", post(handlers::view))
            .route("/add", post(handlers::add))
            .route("/update", post(handlers::update))
            .route("/delete", post(handlers::delete))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(HandleErrorLayer::new(handle_middleware_error))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server on `listener` until Ctrl+C, SIGTERM or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
