use crate::{
    ctx::BaseParams,
    notes::{Note, NoteId},
    openapi::{
        aide::{
            axum::{
                routing::{get, post, post_with},
                ApiRouter, IntoApiResponse,
            },
            NoApi,
        },
        Json, Path,
    },
    state::AppState,
};
use axum::{extract::State, http::StatusCode};

use schemars::JsonSchema;

use serde::Deserialize;
use uuid::Uuid;

use super::{handlers, EditDraft, EditSessionView, EditSessions};

#[derive(Debug, Deserialize, JsonSchema)]
struct NoteIdPath {
    note_id: NoteId,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SessionIdPath {
    session_id: Uuid,
}

pub fn router(state: AppState) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/api/v1/notes/{note_id}/edit",
            post_with(open_session, |t| t.response::<201, Json<EditSessionView>>()),
        )
        .api_route(
            "/api/v1/edit/{session_id}",
            get(get_session).patch(edit_session).delete(cancel_session),
        )
        .api_route("/api/v1/edit/{session_id}/commit", post(commit_session))
        .with_state(state)
}

async fn open_session(
    Path(NoteIdPath { note_id }): Path<NoteIdPath>,
    NoApi(State(sessions)): NoApi<State<EditSessions>>,
    NoApi(base): NoApi<BaseParams>,
) -> impl IntoApiResponse {
    handlers::open_session(note_id, sessions, base)
        .await
        .map(|view| (StatusCode::CREATED, Json(view)))
}

async fn get_session(
    Path(SessionIdPath { session_id }): Path<SessionIdPath>,
    NoApi(State(sessions)): NoApi<State<EditSessions>>,
) -> impl IntoApiResponse {
    handlers::get_session(session_id, &sessions).map(Json)
}

async fn edit_session(
    Path(SessionIdPath { session_id }): Path<SessionIdPath>,
    NoApi(State(sessions)): NoApi<State<EditSessions>>,
    Json(changes): Json<EditDraft>,
) -> impl IntoApiResponse {
    handlers::edit_session(session_id, changes, &sessions).map(Json)
}

async fn commit_session(
    Path(SessionIdPath { session_id }): Path<SessionIdPath>,
    NoApi(State(sessions)): NoApi<State<EditSessions>>,
    NoApi(base): NoApi<BaseParams>,
) -> impl IntoApiResponse {
    handlers::commit_session(session_id, sessions, base)
        .await
        .map(Json::<Note>)
}

async fn cancel_session(
    Path(SessionIdPath { session_id }): Path<SessionIdPath>,
    NoApi(State(sessions)): NoApi<State<EditSessions>>,
) -> impl IntoApiResponse {
    handlers::cancel_session(session_id, &sessions).map(|()| (StatusCode::NO_CONTENT, ()))
}
