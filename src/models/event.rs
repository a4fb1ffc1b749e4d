use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Webhook payload Backlog POSTs on every issue change.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeEvent {
    pub id: i64,

    #[serde(rename = "type", default)]
    pub event_type: i64,

    pub project: ProjectRef,

    pub content: Content,

    #[serde(rename = "createdUser")]
    pub created_user: Option<UserRef>,

    #[serde(rename = "updatedUser")]
    pub updated_user: Option<UserRef>,

    #[serde(default)]
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    #[serde(rename = "projectKey")]
    pub project_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    pub key_id: i64,

    #[serde(default)]
    pub summary: String,

    pub description: Option<String>,

    pub comment: Option<Comment>,

    #[serde(default)]
    pub changes: Vec<Change>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    #[serde(rename = "startDate")]
    pub start_date: Option<String>,

    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,

    pub assignee: Option<UserRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub user: UserRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub name: String,
}

// Backlog sends change values as strings for most fields but as bare
// numbers for status/priority ids, so both forms land in one String.
#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    pub field: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub old_value: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub new_value: String,
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}
