use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::errortype::SlackError;
use crate::models::message::OutboundMessage;
use crate::models::user::SlackUser;

#[derive(Debug, Deserialize)]
struct UsersListResponse {
    ok: bool,

    #[serde(default)]
    members: Vec<SlackUser>,

    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

/// Slack Web API client, bearer-token authenticated.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl Client {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.slack_api_base.trim_end_matches('/').to_owned(),
            token: config.slack_api_token.clone(),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<SlackUser>, SlackError> {
        let response = self
            .http
            .get(format!("{}/users.list", self.api_base))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let body: UsersListResponse = serde_json::from_str(&response.text().await?)?;
        if !body.ok {
            return Err(SlackError::Api(
                body.error.unwrap_or_else(|| "unknown error".to_owned()),
            ));
        }
        Ok(body.members)
    }

    /// Post a message to one channel. The channel id is merged into the
    /// payload here, keeping the message itself channel-agnostic.
    pub async fn post_message(
        &self,
        channel: &str,
        message: &OutboundMessage,
    ) -> Result<(), SlackError> {
        let mut payload = serde_json::to_value(message)?;
        payload["channel"] = json!(channel);
        log::debug!("slack payload: {}", payload);

        let response = self
            .http
            .post(format!("{}/chat.postMessage", self.api_base))
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        let body: PostMessageResponse = serde_json::from_str(&response.text().await?)?;
        if !body.ok {
            return Err(SlackError::Api(
                body.error.unwrap_or_else(|| "unknown error".to_owned()),
            ));
        }
        Ok(())
    }
}
