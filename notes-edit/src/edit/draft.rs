use indexmap::IndexSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    notes::{Note, NoteId},
    reminders::Reminder,
};

use super::{resolver, ValidationError};

/// Only exact-empty titles are rejected; whitespace is accepted as is.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// In-progress copy of a note. Never persisted; only the note built from it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub note_title: String,
    pub note_description: String,
    pub selected_reminder_names: IndexSet<String>,
    pub validation_error: Option<String>,
}

impl Draft {
    /// Reminder selection starts empty, whatever the note currently holds.
    pub fn from_note(note: &Note) -> Self {
        Self {
            note_title: note.note_title.clone(),
            note_description: note.note_description.clone(),
            ..Default::default()
        }
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.note_title = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.note_description = value.into();
    }

    pub fn toggle_reminder_selection(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.selected_reminder_names.shift_remove(&name) {
            self.selected_reminder_names.insert(name);
        }
    }

    /// Replaces the whole selection. Hosts send the complete new set on every change.
    pub fn replace_reminder_selection<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_reminder_names = names.into_iter().map(Into::into).collect();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.note_title)
    }

    /// Builds the note this draft would commit. Unresolved names are dropped with a warning.
    pub fn build_note(&self, id: NoteId, reminders: &[Reminder]) -> Note {
        let names = self
            .selected_reminder_names
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();

        let reminders = resolver::resolve(&names, reminders)
            .into_iter()
            .zip(&names)
            .filter_map(|(reminder, name)| {
                if reminder.is_none() {
                    tracing::warn!(note_id = id, reminder_name = name, "selected reminder not found, skipping");
                }
                reminder
            })
            .collect();

        Note {
            id,
            note_title: self.note_title.clone(),
            note_description: self.note_description.clone(),
            reminders,
        }
    }
}
