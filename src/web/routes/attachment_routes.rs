use axum::{
    extract::{Extension, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::entities::attachment;
use crate::db::services::attachment_service;
use crate::web::models::AuthenticatedAccount;
use crate::web::{AppError, AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttachmentsRequest {
    #[serde(default = "default_page")]
    page: u64,
    #[serde(default = "default_size")]
    size: u64,
    #[serde(default)]
    search_text: String,
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    10
}

/// POST /v1/attachments/list — one page of the caller's attachments, newest
/// first, optionally filtered by a case-insensitive substring of the path.
async fn list_attachments_handler(
    Extension(account): Extension<AuthenticatedAccount>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ListAttachmentsRequest>,
) -> Result<Json<Vec<attachment::Model>>, AppError> {
    let attachments = attachment_service::list_attachments(
        &app_state.db_pool,
        account.id,
        payload.page,
        payload.size,
        &payload.search_text,
    )
    .await?;
    Ok(Json(attachments))
}

pub fn create_attachments_router() -> Router<Arc<AppState>> {
    Router::new().route("/list", post(list_attachments_handler))
}
