use crate::features::timestamps;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default, with = "timestamps::option")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamps::option")]
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    /// Name as shown on the profile page: last name upper-cased.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name.to_uppercase())
    }
}
