use crate::features::timestamps;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, with = "timestamps::option")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamps::option")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Teacher {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
