use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dashboard account. There is no authentication; the password is stored as given
/// and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: Uuid,
  pub username: String,
  #[serde(skip_serializing, default)]
  pub password: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UserDraft {
  pub username: String,
  pub password: String,
}

impl User {
  pub fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: UserDraft) -> Self {
    Self { id, username: draft.username, password: draft.password, created_at }
  }
}
