//! In-memory Student Records API for trying the proxy by hand.
//!
//! ```text
//! cargo run --example mock_api
//! cargo run -- --bind 127.0.0.1:3000
//! ```
//! then open http://localhost:3000/.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Store {
    records: Arc<Mutex<BTreeMap<u64, Value>>>,
    next_id: Arc<Mutex<u64>>,
}

async fn list(State(store): State<Store>) -> impl IntoResponse {
    let records = store.records.lock().unwrap();
    Json(records.values().cloned().collect::<Vec<_>>())
}

async fn create(State(store): State<Store>, Json(mut record): Json<Map<String, Value>>) -> impl IntoResponse {
    let id = {
        let mut next = store.next_id.lock().unwrap();
        *next += 1;
        *next
    };
    record.insert("id".into(), json!(id.to_string()));
    let record = Value::Object(record);
    store.records.lock().unwrap().insert(id, record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn fetch(State(store): State<Store>, Path(id): Path<u64>) -> impl IntoResponse {
    match store.records.lock().unwrap().get(&id) {
        Some(record) => (StatusCode::OK, Json(record.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Étudiant introuvable"}))),
    }
}

async fn replace(
    State(store): State<Store>,
    Path(id): Path<u64>,
    Json(mut record): Json<Map<String, Value>>,
) -> impl IntoResponse {
    let mut records = store.records.lock().unwrap();
    if !records.contains_key(&id) {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Étudiant introuvable"})));
    }
    record.insert("id".into(), json!(id.to_string()));
    let record = Value::Object(record);
    records.insert(id, record.clone());
    (StatusCode::OK, Json(record))
}

async fn remove(State(store): State<Store>, Path(id): Path<u64>) -> StatusCode {
    match store.records.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/etudiants/", get(list).post(create))
        .route("/etudiants/{id}", get(fetch).put(replace).delete(remove))
        .with_state(Store::default());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
    println!("Student Records API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
