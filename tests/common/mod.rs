//! Shared utilities for integration tests: a recording mock of the Student
//! Records API and a helper to run the proxy in the background.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use student_form_proxy::config::AppConfig;
use student_form_proxy::{HttpServer, Shutdown};

/// One request as seen by the mock API.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: String,
    pub request_id: Option<String>,
}

type Responder = dyn Fn(&Recorded) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    respond: Arc<Responder>,
    delay: Duration,
}

/// Handle on a running mock API.
pub struct MockApi {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

#[allow(dead_code)]
impl MockApi {
    /// Collection URL to configure the proxy with.
    pub fn base_url(&self) -> String {
        format!("http://{}/etudiants/", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock API answering every request with `respond`.
#[allow(dead_code)]
pub async fn start_mock_api<F>(respond: F) -> MockApi
where
    F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
{
    start_slow_mock_api(Duration::ZERO, respond).await
}

/// Like [`start_mock_api`], but each answer is held back by `delay`.
pub async fn start_slow_mock_api<F>(delay: Duration, respond: F) -> MockApi
where
    F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = MockState {
        requests: requests.clone(),
        respond: Arc::new(respond),
        delay,
    };
    let app = Router::new().fallback(record).with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockApi { addr, requests }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = Recorded {
        method,
        path: uri.path().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
        request_id: headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    state.requests.lock().unwrap().push(recorded.clone());

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    let (status, body) = (state.respond)(&recorded);
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Proxy config pointing at `base_url`.
#[allow(dead_code)]
pub fn config_for(base_url: String) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = Some(base_url);
    config
}

/// Run the proxy on an ephemeral port. Trigger the returned handle to stop it.
pub async fn start_proxy(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Body of a rendered page with askama's HTML escapes undone, so tests can
/// look for the JSON and messages as the user reads them.
#[allow(dead_code)]
pub async fn page_text(res: reqwest::Response) -> String {
    res.text()
        .await
        .unwrap()
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
