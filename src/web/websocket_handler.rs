use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::web::models::editor_models::EditorEvent;
use crate::web::models::{AuthenticatedAccount, Claims};
use crate::web::{AppError, AppState};

#[derive(Deserialize, Debug)]
pub struct WebSocketAuthQuery {
    token: Option<String>,
}

// WebSocket clients cannot set headers, so the JWT arrives as a query param.
fn authenticate_ws_connection(
    app_state: &AppState,
    token_option: Option<String>,
) -> Result<AuthenticatedAccount, AppError> {
    let token = token_option
        .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

    let token_data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(app_state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!(error = ?e, "JWT decoding error on WebSocket connect.");
        AppError::Unauthorized("Invalid token".to_string())
    })?;

    Ok(AuthenticatedAccount {
        id: token_data.claims.account_id,
        name: token_data.claims.sub,
    })
}

/// GET /ws/editor — subscribes the client to the editor event bus. Events
/// published by any connected surface (for example a view-mode toggle) are
/// fanned out to every subscriber as JSON text frames.
pub async fn editor_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<WebSocketAuthQuery>,
) -> impl IntoResponse {
    let account = match authenticate_ws_connection(&app_state, query.token) {
        Ok(account) => account,
        Err(e) => return e.into_response(),
    };

    debug!(account_id = account.id, "Editor WebSocket authenticated");
    ws.on_upgrade(move |socket| handle_socket(socket, app_state, account))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>, account: AuthenticatedAccount) {
    let mut bus_rx = app_state.editor_bus_tx.subscribe();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = bus_rx.recv() => match event {
                Ok(event) => {
                    let Ok(json) = serde_json::to_string(&event) else { continue };
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(account_id = account.id, skipped, "Editor bus receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<EditorEvent>(&text) {
                        Ok(event) => {
                            // Re-broadcast; send only fails with no subscribers,
                            // and this connection is one.
                            let _ = app_state.editor_bus_tx.send(event);
                        }
                        Err(e) => {
                            debug!(account_id = account.id, error = %e, "Ignoring malformed editor event");
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(account_id = account.id, error = %e, "Editor WebSocket errored");
                    break;
                }
            },
        }
    }

    debug!(account_id = account.id, "Editor WebSocket closed");
}
