use axum::{
    extract::{Extension, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::db::entities::tag;
use crate::db::services::{note_service, tag_service};
use crate::db::services::note_service::UpsertNote;
use crate::services::tag_text;
use crate::web::models::AuthenticatedAccount;
use crate::web::{AppError, AppState};

// --- Request Structs ---

#[derive(Deserialize)]
pub struct BatchUpdateTagsRequest {
    ids: Vec<i32>,
    tag: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagNameRequest {
    id: i32,
    old_name: String,
    new_name: String,
}

#[derive(Deserialize)]
pub struct UpdateTagIconRequest {
    id: i32,
    icon: String,
}

#[derive(Deserialize)]
pub struct TagIdRequest {
    id: i32,
}

// --- Route Handlers ---

/// GET /v1/tags/list — tags on the caller's notes and on ownerless notes,
/// deduplicated by id.
async fn list_tags_handler(
    Extension(account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<tag::Model>>, AppError> {
    let tags = tag_service::list_tags_for_account(&app_state.db_pool, account.id).await?;
    Ok(Json(tags))
}

/// POST /v1/tags/batch-update — append a `#tag` token to every listed note
/// and re-save each one through the shared upsert path. Notes that already
/// carry the token are left alone.
async fn batch_update_tags_handler(
    Extension(_account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<BatchUpdateTagsRequest>,
) -> Result<Json<bool>, AppError> {
    let notes = note_service::find_notes_by_ids(&app_state.db_pool, &payload.ids).await?;
    for note in notes {
        if tag_text::contains_tag_token(&note.content, &payload.tag) {
            continue;
        }
        let content = tag_text::append_tag_token(&note.content, &payload.tag);
        note_service::upsert_note(
            &app_state.db_pool,
            UpsertNote {
                id: Some(note.id),
                content,
                note_type: None,
                account_id: note.account_id,
            },
        )
        .await?;
    }
    Ok(Json(true))
}

/// POST /v1/tags/update-name — rewrite `#oldName` to `#newName` in every note
/// linked to the tag. The upsert path re-derives the link rows afterwards, so
/// the old tag disappears once its last token is gone.
async fn update_tag_name_handler(
    Extension(_account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<UpdateTagNameRequest>,
) -> Result<Json<bool>, AppError> {
    let note_ids = tag_service::linked_note_ids(&app_state.db_pool, payload.id).await?;
    let notes = note_service::find_notes_by_ids(&app_state.db_pool, &note_ids).await?;
    for note in notes {
        let content = tag_text::rename_tag_token(&note.content, &payload.old_name, &payload.new_name);
        note_service::upsert_note(
            &app_state.db_pool,
            UpsertNote {
                id: Some(note.id),
                content,
                note_type: Some(note.note_type),
                account_id: note.account_id,
            },
        )
        .await?;
    }
    info!(
        tag_id = payload.id,
        old_name = %payload.old_name,
        new_name = %payload.new_name,
        "Renamed tag across linked notes"
    );
    Ok(Json(true))
}

/// POST /v1/tags/update-icon — direct field update.
async fn update_tag_icon_handler(
    Extension(_account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<UpdateTagIconRequest>,
) -> Result<Json<tag::Model>, AppError> {
    match tag_service::update_tag_icon(&app_state.db_pool, payload.id, &payload.icon).await? {
        Some(updated) => Ok(Json(updated)),
        None => Err(AppError::NotFound("Tag not found".to_string())),
    }
}

/// POST /v1/tags/delete-only-tag — strip the `#name` token out of every
/// linked note (notes survive), then drop the link rows and the tag row.
async fn delete_only_tag_handler(
    Extension(_account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<TagIdRequest>,
) -> Result<Json<bool>, AppError> {
    let tag = tag_service::find_tag(&app_state.db_pool, payload.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

    let note_ids = tag_service::linked_note_ids(&app_state.db_pool, tag.id).await?;
    for note_id in note_ids {
        if let Some(note) = note_service::find_note(&app_state.db_pool, note_id).await? {
            let content = tag_text::strip_tag_token(&note.content, &tag.name);
            // Direct content update; this handler maintains the links itself.
            note_service::update_note_content(&app_state.db_pool, note, content).await?;
        }
    }

    tag_service::delete_tag_links(&app_state.db_pool, tag.id).await?;
    tag_service::delete_tag(&app_state.db_pool, tag.id).await?;
    info!(tag_id = payload.id, tag_name = %tag.name, "Deleted tag, notes kept");
    Ok(Json(true))
}

/// POST /v1/tags/delete-tag-with-notes — delete every note linked to the tag
/// through the shared bulk deletion routine; the tag row goes with them once
/// it has no links left.
async fn delete_tag_with_notes_handler(
    Extension(_account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<TagIdRequest>,
) -> Result<Json<bool>, AppError> {
    let tag = tag_service::find_tag(&app_state.db_pool, payload.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

    let note_ids = tag_service::linked_note_ids(&app_state.db_pool, tag.id).await?;
    let deleted = note_service::delete_notes(&app_state.db_pool, &note_ids).await?;
    // Covers the zero-note case, where the bulk routine never sees the tag.
    note_service::delete_orphan_tags(&app_state.db_pool, &[tag.id]).await?;
    info!(tag_id = payload.id, deleted_notes = deleted, "Deleted tag with all linked notes");
    Ok(Json(true))
}

// --- Router ---

pub fn create_tags_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(list_tags_handler))
        .route("/batch-update", post(batch_update_tags_handler))
        .route("/update-name", post(update_tag_name_handler))
        .route("/update-icon", post(update_tag_icon_handler))
        .route("/delete-only-tag", post(delete_only_tag_handler))
        .route("/delete-tag-with-notes", post(delete_tag_with_notes_handler))
}
