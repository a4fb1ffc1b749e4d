use serde::Deserialize;

/// Entry of `GET /api/v2/projects`.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: i64,

    #[serde(rename = "projectKey")]
    pub project_key: String,

    pub name: String,
}
