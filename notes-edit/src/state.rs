use axum::extract::FromRef;

use crate::{db::DB, edit::EditSessions};

#[derive(FromRef, Clone)]
pub struct AppState {
    pub conn: DB,
    pub sessions: EditSessions,
}
