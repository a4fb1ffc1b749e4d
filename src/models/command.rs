use serde::Deserialize;

/// Form body of the `/setup` slash command.
#[derive(Debug, Clone, Deserialize)]
pub struct SetupCommand {
    pub channel_id: String,

    #[serde(default)]
    pub channel_name: String,

    #[serde(default)]
    pub text: String,
}
