//! Concurrent requests must not observe each other's upstream URL.

use axum::http::StatusCode;
use std::net::SocketAddr;

use student_form_proxy::AppConfig;

mod common;

/// Fire `concurrency` tasks of `requests_per_task` views each, every one with
/// its own id, and check each page shows the record for its own id.
async fn run_isolated_views(proxy: SocketAddr, concurrency: usize, requests_per_task: usize) {
    let client = common::client();

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..requests_per_task {
                let id = format!("{task}-{i}");
                let res = client
                    .post(format!("http://{proxy}/view"))
                    .form(&[("id", id.as_str())])
                    .send()
                    .await
                    .unwrap();
                assert_eq!(res.status(), StatusCode::OK);

                let html = common::page_text(res).await;
                let expected = format!(r#"{{"path":"/etudiants/{id}"}}"#);
                assert!(html.contains(&expected), "request {id} saw another request's URL");
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }
}

#[tokio::test]
async fn test_concurrent_views_stay_isolated() {
    // The mock echoes the requested path back as the record.
    let api = common::start_mock_api(|req| (200, format!(r#"{{"path":"{}"}}"#, req.path))).await;
    let (proxy, shutdown) = common::start_proxy(common::config_for(api.base_url())).await;

    run_isolated_views(proxy, 20, 10).await;
    assert_eq!(api.requests().len(), 200);

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_views_stay_isolated_in_same_host_mode() {
    let api = common::start_mock_api(|req| (200, format!(r#"{{"path":"{}"}}"#, req.path))).await;

    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.port = api.addr.port();
    let (proxy, shutdown) = common::start_proxy(config).await;

    run_isolated_views(proxy, 20, 10).await;
    assert_eq!(api.requests().len(), 200);

    shutdown.trigger();
}
