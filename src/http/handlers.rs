//! Route handlers: one per form action.

use axum::extract::State;

use crate::http::error::ProxyError;
use crate::http::extract::FormPayload;
use crate::http::server::AppState;
use crate::upstream::{Action, UpstreamTarget};
use crate::view::Page;

/// `GET /`
pub async fn home() -> Page {
    tracing::info!("Chargement page d'accueil");
    Page::home()
}

/// `POST /view`: one record when the form carries an id, the whole list otherwise.
pub async fn view(
    State(state): State<AppState>,
    target: UpstreamTarget,
    form: FormPayload,
) -> Result<Page, ProxyError> {
    let reply = match form.id() {
        Some(id) => state.api.fetch(&target, &id).await?,
        None => state.api.list(&target).await?,
    };

    tracing::info!(action = %Action::View, status = reply.status.as_u16(), "Statut view");
    Ok(Page::outcome(reply.status, reply.body.to_string()))
}

/// `POST /add`: echoes the submission, not the record the API returns.
pub async fn add(
    State(state): State<AppState>,
    target: UpstreamTarget,
    form: FormPayload,
) -> Result<Page, ProxyError> {
    let reply = state.api.create(&target, form.record()).await?;

    tracing::info!(action = %Action::Add, status = reply.status.as_u16(), "Statut ajout");
    Ok(Page::outcome(reply.status, format!("Ajout {}", form.to_json())))
}

/// `POST /update`
pub async fn update(
    State(state): State<AppState>,
    target: UpstreamTarget,
    form: FormPayload,
) -> Result<Page, ProxyError> {
    let id = form.id().ok_or(ProxyError::MissingId(Action::Update))?;
    let reply = state.api.update(&target, &id, form.record()).await?;

    tracing::info!(action = %Action::Update, status = reply.status.as_u16(), "Statut update");
    Ok(Page::outcome(
        reply.status,
        format!("Modification {}", form.to_json()),
    ))
}

/// `POST /delete`
pub async fn delete(
    State(state): State<AppState>,
    target: UpstreamTarget,
    form: FormPayload,
) -> Result<Page, ProxyError> {
    let id = form.id().ok_or(ProxyError::MissingId(Action::Delete))?;
    let reply = state.api.delete(&target, &id).await?;

    tracing::info!(action = %Action::Delete, status = reply.status.as_u16(), "Statut delete");
    Ok(Page::outcome(reply.status, format!("Suppression étudiant {id}")))
}
