use serde::Deserialize;

/// Member of the Backlog project, from `GET /api/v2/projects/{key}/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerUser {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "mailAddress")]
    pub mail_address: Option<String>,
}

/// Slack workspace member, from `users.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackUser {
    pub name: String,

    #[serde(default)]
    pub profile: SlackProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackProfile {
    pub email: Option<String>,
}
