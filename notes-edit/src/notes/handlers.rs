use std::collections::HashMap;

use rusqlite::{params, OptionalExtension, Row};

use crate::{ctx::BaseParams, edit::validate_title, reminders::Reminder, Error, Result};

use super::{CreateNote, Note, NoteId, UpdateNote};

impl<'a> TryFrom<&Row<'a>> for Note {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            note_title: row.get(1)?,
            note_description: row.get(2)?,
            reminders: Vec::new(),
        })
    }
}

const NOTE_REMINDERS: &str = r#"SELECT nr.note_id, r.reminder_id, r.reminder_name
    FROM note_reminders nr JOIN reminders r ON r.reminder_id = nr.reminder_id"#;

pub(crate) fn select_notes(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<Note>> {
    let mut notes = conn
        .prepare("SELECT id, note_title, note_description FROM notes ORDER BY id")?
        .query_map([], |row| Note::try_from(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut reminders = HashMap::<NoteId, Vec<Reminder>>::new();
    let mut stmt = conn.prepare(&format!("{NOTE_REMINDERS} ORDER BY nr.note_id, nr.position"))?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, NoteId>(0)?, Reminder::new(row.get::<_, String>(1)?, row.get::<_, String>(2)?)))
    })?;
    for row in rows {
        let (note_id, reminder) = row?;
        reminders.entry(note_id).or_default().push(reminder);
    }

    for note in &mut notes {
        note.reminders = reminders.remove(&note.id).unwrap_or_default();
    }
    Ok(notes)
}

pub(crate) fn select_note(conn: &rusqlite::Connection, note_id: NoteId) -> rusqlite::Result<Option<Note>> {
    let Some(mut note) = conn
        .query_row(
            "SELECT id, note_title, note_description FROM notes WHERE id = ?",
            params![note_id],
            |row| Note::try_from(row),
        )
        .optional()?
    else {
        return Ok(None);
    };

    note.reminders = conn
        .prepare(&format!("{NOTE_REMINDERS} WHERE nr.note_id = ? ORDER BY nr.position"))?
        .query_map(params![note_id], |row| Ok(Reminder::new(row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Some(note))
}

/// Replaces the note's reminder links. Every reminder must already exist.
fn replace_note_reminders(
    conn: &rusqlite::Connection,
    note_id: NoteId,
    reminders: &[Reminder],
) -> std::result::Result<(), tokio_rusqlite::Error> {
    conn.execute("DELETE FROM note_reminders WHERE note_id = ?", params![note_id])?;

    let mut exists = conn.prepare("SELECT 1 FROM reminders WHERE reminder_id = ?")?;
    let mut insert = conn.prepare("INSERT INTO note_reminders (note_id, position, reminder_id) VALUES (?, ?, ?)")?;
    for (position, reminder) in reminders.iter().enumerate() {
        if !exists.exists(params![reminder.reminder_id])? {
            return Err(Error::Validation(format!("Unknown reminder {}", reminder.reminder_id)).into());
        }
        insert.execute(params![note_id, position as i64, reminder.reminder_id])?;
    }
    Ok(())
}

fn not_found() -> tokio_rusqlite::Error {
    Error::NotFound("Note not found".into()).into()
}

pub async fn find_notes(BaseParams { db, .. }: BaseParams) -> Result<Vec<Note>> {
    db.call(|conn| Ok(select_notes(conn)?)).await.map_err(Error::from)
}

pub async fn get_note(note_id: NoteId, BaseParams { db, .. }: BaseParams) -> Result<Note> {
    db.call(move |conn| select_note(conn, note_id)?.ok_or_else(not_found))
        .await
        .map_err(Error::from)
}

pub async fn create_note(
    CreateNote {
        note_title,
        note_description,
        reminders,
    }: CreateNote,
    BaseParams { db, .. }: BaseParams,
) -> Result<Note> {
    validate_title(&note_title)?;

    db.call(move |conn| {
        let tx = conn.transaction()?;
        let note_id = tx.query_row(
            "INSERT INTO notes (note_title, note_description) VALUES (?, ?) RETURNING id",
            params![note_title, note_description],
            |row| row.get::<_, NoteId>(0),
        )?;
        replace_note_reminders(&tx, note_id, &reminders)?;
        let note = select_note(&tx, note_id)?.ok_or_else(not_found)?;
        tx.commit()?;
        Ok(note)
    })
    .await
    .map_err(Error::from)
}

/// Stores a complete note. Committed edit sessions are submitted through here.
pub async fn update_note(
    note_id: NoteId,
    UpdateNote {
        note_title,
        note_description,
        reminders,
    }: UpdateNote,
    BaseParams { db, ctx }: BaseParams,
) -> Result<Note> {
    validate_title(&note_title)?;

    let note = db
        .call(move |conn| {
            let tx = conn.transaction()?;
            let updated = tx.execute(
                "UPDATE notes SET note_title = ?, note_description = ?, updated_at = ? WHERE id = ?",
                params![note_title, note_description, chrono::Utc::now(), note_id],
            )?;
            if updated == 0 {
                return Err(not_found());
            }
            replace_note_reminders(&tx, note_id, &reminders)?;
            let note = select_note(&tx, note_id)?.ok_or_else(not_found)?;
            tx.commit()?;
            Ok(note)
        })
        .await
        .map_err(Error::from)?;

    tracing::debug!(request_id = ?ctx.request_id, note_id, "note updated");

    Ok(note)
}

pub async fn delete_note(note_id: NoteId, BaseParams { db, .. }: BaseParams) -> Result<Note> {
    db.call(move |conn| {
        let note = select_note(conn, note_id)?.ok_or_else(not_found)?;
        conn.execute("DELETE FROM notes WHERE id = ?", params![note_id])?;
        Ok(note)
    })
    .await
    .map_err(Error::from)
}

impl From<Note> for UpdateNote {
    fn from(note: Note) -> Self {
        Self {
            note_title: note.note_title,
            note_description: note.note_description,
            reminders: note.reminders,
        }
    }
}
