//! Note editing: a draft session per edit, reminder-name resolution, and the
//! HTTP surface that lets a client drive a session.

mod draft;
mod errors;
pub mod handlers;
mod resolver;
mod routes;
mod session;
mod store;

pub use draft::{validate_title, Draft};
pub use errors::{Error, Result, ValidationError};
pub use session::DraftSession;
pub use store::EditSessions;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{notes::NoteId, openapi::aide::axum::ApiRouter, state::AppState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditSessionView {
    pub session_id: Uuid,
    pub note_id: NoteId,
    pub draft: Draft,
}

/// Field edits sent by a client. Absent fields are left alone; a present
/// selection replaces the current one. Unknown fields are rejected.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditDraft {
    pub note_title: Option<String>,
    pub note_description: Option<String>,
    pub selected_reminder_names: Option<Vec<String>>,
}

pub fn router(state: AppState) -> ApiRouter {
    ApiRouter::new().merge(routes::router(state))
}
