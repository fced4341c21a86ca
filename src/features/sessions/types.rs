use crate::features::timestamps;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A yoga session as returned by `/api/session`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct YogaSession {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "timestamps")]
    pub date: NaiveDateTime,
    #[serde(rename = "teacher_id", default)]
    pub teacher_id: Option<u64>,
    #[serde(default)]
    pub users: Vec<u64>,
    #[serde(default, with = "timestamps::option")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamps::option")]
    pub updated_at: Option<NaiveDateTime>,
}

impl YogaSession {
    #[must_use]
    pub fn has_participant(&self, user_id: u64) -> bool {
        self.users.contains(&user_id)
    }

    #[must_use]
    pub fn attendees(&self) -> usize {
        self.users.len()
    }

    /// Pre-filled form for the update page.
    #[must_use]
    pub fn to_form(&self) -> SessionForm {
        SessionForm {
            name: self.name.clone(),
            date: Some(self.date.date()),
            teacher_id: self.teacher_id,
            description: self.description.clone(),
        }
    }
}

/// Payload of the admin create/update form.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SessionForm {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub teacher_id: Option<u64>,
    pub description: String,
}
