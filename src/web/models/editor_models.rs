//! The editor view-mode event bus.
//!
//! The editor toolbar's view-mode button is stateless: given the current
//! mode it publishes a single `editor:setViewMode` event requesting the
//! opposite one. Connected editor surfaces subscribe via `/ws/editor`.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Bus channel name, as exposed on the WebSocket wire format.
pub const EDITOR_SET_VIEW_MODE: &str = "editor:setViewMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    Source,
    RichText,
}

impl ViewMode {
    pub fn opposite(self) -> Self {
        match self {
            ViewMode::Source => ViewMode::RichText,
            ViewMode::RichText => ViewMode::Source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum EditorEvent {
    #[serde(rename = "editor:setViewMode")]
    SetViewMode(ViewMode),
}

/// Publishes a request to switch away from `current`. Exactly one event per
/// activation; returns the number of live subscribers that received it.
pub fn toggle_view_mode(
    bus: &broadcast::Sender<EditorEvent>,
    current: ViewMode,
) -> Result<usize, broadcast::error::SendError<EditorEvent>> {
    bus.send(EditorEvent::SetViewMode(current.opposite()))
}
