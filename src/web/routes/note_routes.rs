use axum::{
    extract::{Extension, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::entities::note;
use crate::db::services::note_service;
use crate::db::services::note_service::UpsertNote;
use crate::web::models::AuthenticatedAccount;
use crate::web::{AppError, AppState};

#[derive(Deserialize)]
pub struct UpsertNoteRequest {
    id: Option<i32>,
    content: String,
    #[serde(rename = "type")]
    note_type: Option<i32>,
}

#[derive(Deserialize)]
pub struct BatchDeleteNotesRequest {
    ids: Vec<i32>,
}

#[derive(Deserialize)]
pub struct ListNotesRequest {
    #[serde(default = "default_page")]
    page: u64,
    #[serde(default = "default_size")]
    size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    30
}

/// POST /v1/notes/upsert — create or update a note and re-derive its tag
/// links from the content. New notes belong to the caller.
async fn upsert_note_handler(
    Extension(account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<UpsertNoteRequest>,
) -> Result<Json<note::Model>, AppError> {
    let saved = note_service::upsert_note(
        &app_state.db_pool,
        UpsertNote {
            id: payload.id,
            content: payload.content,
            note_type: payload.note_type,
            account_id: Some(account.id),
        },
    )
    .await?;
    Ok(Json(saved))
}

/// POST /v1/notes/batch-delete — the shared bulk deletion routine:
/// attachments, link rows and note rows go; orphaned tags are cleaned up.
async fn batch_delete_notes_handler(
    Extension(_account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<BatchDeleteNotesRequest>,
) -> Result<Json<bool>, AppError> {
    note_service::delete_notes(&app_state.db_pool, &payload.ids).await?;
    Ok(Json(true))
}

/// POST /v1/notes/list — the caller's notes plus ownerless ones, newest
/// first.
async fn list_notes_handler(
    Extension(account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ListNotesRequest>,
) -> Result<Json<Vec<note::Model>>, AppError> {
    let notes = note_service::list_notes_for_account(
        &app_state.db_pool,
        account.id,
        payload.page,
        payload.size,
    )
    .await?;
    Ok(Json(notes))
}

pub fn create_notes_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upsert", post(upsert_note_handler))
        .route("/batch-delete", post(batch_delete_notes_handler))
        .route("/list", post(list_notes_handler))
}
