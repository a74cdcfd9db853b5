use crate::{
    notes::{Note, NoteId},
    reminders::Reminder,
};

use super::{Draft, Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Committed,
    Cancelled,
}

/// Edit lifecycle of a single note.
///
/// A session starts `Open` and ends either `Committed`, when a valid draft
/// produced a note, or `Cancelled`. Both end states are terminal: the draft is
/// discarded and every further call fails with [`Error::SessionClosed`]. A
/// failed validation keeps the session open with the message stored on the draft.
#[derive(Debug, Clone)]
pub struct DraftSession {
    note_id: NoteId,
    draft: Draft,
    state: SessionState,
}

impl DraftSession {
    pub fn initialize(notes: &[Note], target_id: NoteId) -> Result<Self> {
        let note = notes
            .iter()
            .find(|note| note.id == target_id)
            .ok_or(Error::NotFound(target_id))?;

        tracing::debug!(note_id = target_id, "edit session opened");

        Ok(Self {
            note_id: note.id,
            draft: Draft::from_note(note),
            state: SessionState::Open,
        })
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn set_title(&mut self, value: impl Into<String>) -> Result<()> {
        self.draft_mut()?.set_title(value);
        Ok(())
    }

    pub fn set_description(&mut self, value: impl Into<String>) -> Result<()> {
        self.draft_mut()?.set_description(value);
        Ok(())
    }

    pub fn toggle_reminder_selection(&mut self, name: impl Into<String>) -> Result<()> {
        self.draft_mut()?.toggle_reminder_selection(name);
        Ok(())
    }

    pub fn replace_reminder_selection<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.draft_mut()?.replace_reminder_selection(names);
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.draft.validate()
    }

    /// Validates the draft and builds the updated note against `reminders`.
    ///
    /// Forwarding the note to storage is left to the caller.
    pub fn commit(&mut self, reminders: &[Reminder]) -> Result<Note> {
        let note_id = self.note_id;
        let draft = self.draft_mut()?;

        if let Err(error) = draft.validate() {
            draft.validation_error = Some(error.to_string());
            return Err(error.into());
        }

        let note = draft.build_note(note_id, reminders);
        draft.validation_error = None;
        self.close(SessionState::Committed);

        tracing::debug!(note_id, reminders = note.reminders.len(), "edit session committed");

        Ok(note)
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.close(SessionState::Cancelled);

        tracing::debug!(note_id = self.note_id, "edit session cancelled");

        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(Error::SessionClosed)
        }
    }

    fn draft_mut(&mut self) -> Result<&mut Draft> {
        self.ensure_open()?;
        Ok(&mut self.draft)
    }

    fn close(&mut self, state: SessionState) {
        self.state = state;
        self.draft = Draft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes() -> Vec<Note> {
        vec![
            Note {
                id: 1,
                note_title: "Groceries".into(),
                note_description: "Milk".into(),
                reminders: vec![],
            },
            Note {
                id: 2,
                note_title: "Workout".into(),
                note_description: "Legs".into(),
                reminders: vec![],
            },
        ]
    }

    #[test]
    fn initialize_copies_matching_note() {
        for note in notes() {
            let session = DraftSession::initialize(&notes(), note.id).unwrap();

            assert_eq!(session.note_id(), note.id);
            assert_eq!(session.draft().note_title, note.note_title);
            assert_eq!(session.draft().note_description, note.note_description);
            assert!(session.is_open());
        }
    }

    #[test]
    fn initialize_unknown_note_fails() {
        assert_eq!(DraftSession::initialize(&notes(), 42).unwrap_err(), Error::NotFound(42));
        assert_eq!(DraftSession::initialize(&[], 1).unwrap_err(), Error::NotFound(1));
    }

    #[test]
    fn empty_title_keeps_session_open() {
        let mut session = DraftSession::initialize(&notes(), 1).unwrap();
        session.set_title("").unwrap();

        let error = session.commit(&[]).unwrap_err();

        assert_eq!(error, Error::Validation(ValidationError::EmptyTitle));
        assert_eq!(session.state(), SessionState::Open);
        assert_eq!(
            session.draft().validation_error.as_deref(),
            Some("Title is needed to update note")
        );
        assert_eq!(session.draft().note_description, "Milk");
    }

    #[test]
    fn successful_commit_clears_validation_error() {
        let mut session = DraftSession::initialize(&notes(), 1).unwrap();
        session.set_title("").unwrap();
        session.commit(&[]).unwrap_err();

        session.set_title("Groceries").unwrap();
        let note = session.commit(&[]).unwrap();

        assert_eq!(note.note_title, "Groceries");
        assert_eq!(session.state(), SessionState::Committed);
        assert_eq!(session.draft().validation_error, None);
    }

    #[test]
    fn commit_without_selection_has_no_reminders() {
        let reminders = [Reminder::new("1", "Weekly")];
        let mut first = DraftSession::initialize(&notes(), 2).unwrap();
        let mut second = first.clone();

        let a = first.commit(&reminders).unwrap();
        let b = second.commit(&reminders).unwrap();

        assert!(a.reminders.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn commit_builds_updated_note() {
        let notes = vec![Note {
            id: 1,
            note_title: "Groceries".into(),
            note_description: "Milk".into(),
            reminders: vec![],
        }];
        let reminders = [Reminder::new("1", "Weekly")];

        let mut session = DraftSession::initialize(&notes, 1).unwrap();
        session.replace_reminder_selection(["Weekly"]).unwrap();
        session.set_title("Groceries v2").unwrap();
        let note = session.commit(&reminders).unwrap();

        assert_eq!(
            note,
            Note {
                id: 1,
                note_title: "Groceries v2".into(),
                note_description: "Milk".into(),
                reminders: vec![Reminder::new("1", "Weekly")],
            }
        );
    }

    #[test]
    fn closed_session_rejects_everything() {
        let mut session = DraftSession::initialize(&notes(), 1).unwrap();
        session.commit(&[]).unwrap();

        assert_eq!(session.set_title("x"), Err(Error::SessionClosed));
        assert_eq!(session.toggle_reminder_selection("Gym"), Err(Error::SessionClosed));
        assert_eq!(session.commit(&[]), Err(Error::SessionClosed));
        assert_eq!(session.cancel(), Err(Error::SessionClosed));
    }

    #[test]
    fn cancel_discards_draft() {
        let notes = notes();
        let mut session = DraftSession::initialize(&notes, 1).unwrap();
        session.set_title("").unwrap();
        session.set_description("changed").unwrap();
        session.toggle_reminder_selection("Gym").unwrap();

        session.cancel().unwrap();

        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(session.draft(), &Draft::default());
        assert_eq!(session.set_description("again"), Err(Error::SessionClosed));
        assert_eq!(notes[0].note_title, "Groceries");
        assert_eq!(notes[0].note_description, "Milk");
    }
}
