use std::collections::HashMap;

use serde::Deserialize;

/// Current state of an issue as returned by `GET /api/v2/issues/{key}`.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueSnapshot {
    #[serde(default)]
    pub summary: String,

    pub status: Status,

    pub priority: Priority,

    pub assignee: Option<Assignee>,

    #[serde(rename = "issueType")]
    pub issue_type: IssueType,

    #[serde(rename = "updatedUser")]
    pub updated_user: Option<UpdatedUser>,
}

/// One entry of a project's status list. The same shape appears inline on
/// the issue itself, minus the color on older Backlog spaces.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub id: i64,
    pub name: String,

    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Priority {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignee {
    pub id: i64,

    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueType {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatedUser {
    #[serde(default)]
    pub name: String,
}

/// Project statuses indexed by id, rebuilt fresh for every event.
pub type StatusCatalog = HashMap<i64, Status>;

pub fn build_catalog(statuses: Vec<Status>) -> StatusCatalog {
    statuses.into_iter().map(|status| (status.id, status)).collect()
}
