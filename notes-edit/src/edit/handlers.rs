use uuid::Uuid;

use crate::{
    ctx::BaseParams,
    notes::{self, Note, NoteId},
    reminders, Error, Result,
};

use super::{DraftSession, EditDraft, EditSessionView, EditSessions};

/// Snapshots notes and reminders and opens a session on `note_id`.
///
/// The session works on this snapshot until it closes.
pub async fn open_session(note_id: NoteId, sessions: EditSessions, BaseParams { db, ctx }: BaseParams) -> Result<EditSessionView> {
    let (notes, reminders) = db
        .call(|conn| {
            let notes = notes::handlers::select_notes(conn)?;
            let reminders = reminders::handlers::select_reminders(conn, None)?;
            Ok((notes, reminders))
        })
        .await
        .map_err(Error::from)?;

    let session = DraftSession::initialize(&notes, note_id)?;
    let (session_id, view) = sessions.open(session, reminders);

    tracing::debug!(request_id = ?ctx.request_id, %session_id, note_id, "edit session stored");

    Ok(view)
}

pub fn get_session(session_id: Uuid, sessions: &EditSessions) -> Result<EditSessionView> {
    sessions.with(session_id, |edit| edit.view(session_id))
}

pub fn edit_session(session_id: Uuid, changes: EditDraft, sessions: &EditSessions) -> Result<EditSessionView> {
    let EditDraft {
        note_title,
        note_description,
        selected_reminder_names,
    } = changes;

    sessions.with(session_id, |edit| -> Result<EditSessionView> {
        if let Some(title) = note_title {
            edit.session.set_title(title)?;
        }
        if let Some(description) = note_description {
            edit.session.set_description(description)?;
        }
        if let Some(names) = selected_reminder_names {
            edit.session.replace_reminder_selection(names)?;
        }
        Ok(edit.view(session_id))
    })?
}

/// Commits the session and submits the resulting note.
///
/// The session is only dropped once the note is stored. Until then the commit
/// runs on a copy, so a failed validation or a failed store leaves the stored
/// session open with its draft.
pub async fn commit_session(session_id: Uuid, sessions: EditSessions, base: BaseParams) -> Result<Note> {
    let note = sessions.with(session_id, |edit| {
        let mut attempt = edit.session.clone();
        let committed = attempt.commit(&edit.reminders);
        if committed.is_err() {
            edit.session = attempt;
        }
        committed
    })??;

    tracing::debug!(request_id = ?base.ctx.request_id, %session_id, note_id = note.id, "submitting committed note");

    let stored = notes::handlers::update_note(note.id, note.into(), base)
        .await
        .inspect_err(|error| tracing::debug!(%session_id, ?error, "note not stored, edit session kept open"))?;
    sessions.remove(session_id);

    Ok(stored)
}

pub fn cancel_session(session_id: Uuid, sessions: &EditSessions) -> Result<()> {
    sessions.with(session_id, |edit| edit.session.cancel())??;
    sessions.remove(session_id);
    Ok(())
}
