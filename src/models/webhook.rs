use serde::Deserialize;

/// Registered webhook of a project, from
/// `GET /api/v2/projects/{key}/webhooks`.
#[derive(Debug, Clone, Deserialize)]
pub struct Webhook {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "hookUrl", default)]
    pub hook_url: String,
}
