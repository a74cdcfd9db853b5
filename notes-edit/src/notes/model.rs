use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::reminders::Reminder;

pub type NoteId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub note_title: String,
    pub note_description: String,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    pub note_title: String,
    #[serde(default)]
    pub note_description: String,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

/// Full replacement of a note. This is what a committed edit session submits.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub note_title: String,
    #[serde(default)]
    pub note_description: String,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindNotesResponse {
    pub results: Vec<Note>,
}
