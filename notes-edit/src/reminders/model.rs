use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub type ReminderId = String;

/// `reminder_name` is what users pick from; it is not unique. `reminder_id` is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub reminder_id: ReminderId,
    pub reminder_name: String,
}

impl Reminder {
    pub fn new(reminder_id: impl Into<ReminderId>, reminder_name: impl Into<String>) -> Self {
        Self {
            reminder_id: reminder_id.into(),
            reminder_name: reminder_name.into(),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReminder {
    pub reminder_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindRemindersResponse {
    pub results: Vec<Reminder>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct FindRemindersQuery {
    /// Only reminders with exactly this display name.
    pub name: Option<String>,
}
