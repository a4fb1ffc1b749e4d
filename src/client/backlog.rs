use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::errortype::BacklogError;
use crate::models::issue::{IssueSnapshot, Status};
use crate::models::project::Project;
use crate::models::user::TrackerUser;
use crate::models::webhook::Webhook;

/// Backlog REST client. Every call authenticates with the space-wide API
/// key passed as the `apiKey` query parameter.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backlog_base_url.trim_end_matches('/').to_owned(),
            api_key: config.backlog_api_key.clone(),
        }
    }

    pub async fn get_issue(
        &self,
        project_key: &str,
        key_id: i64,
    ) -> Result<IssueSnapshot, BacklogError> {
        self.get_json(&format!(
            "{}/api/v2/issues/{}-{}",
            self.base_url, project_key, key_id
        ))
        .await
    }

    pub async fn get_project_users(
        &self,
        project_key: &str,
    ) -> Result<Vec<TrackerUser>, BacklogError> {
        self.get_json(&format!(
            "{}/api/v2/projects/{}/users",
            self.base_url, project_key
        ))
        .await
    }

    pub async fn get_statuses(&self, project_key: &str) -> Result<Vec<Status>, BacklogError> {
        self.get_json(&format!(
            "{}/api/v2/projects/{}/statuses",
            self.base_url, project_key
        ))
        .await
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>, BacklogError> {
        self.get_json(&format!("{}/api/v2/projects", self.base_url)).await
    }

    pub async fn get_webhooks(&self, project_key: &str) -> Result<Vec<Webhook>, BacklogError> {
        self.get_json(&format!(
            "{}/api/v2/projects/{}/webhooks",
            self.base_url, project_key
        ))
        .await
    }

    /// Register a webhook subscribed to every event type, pointing at this
    /// service's event endpoint.
    pub async fn add_webhook(
        &self,
        project_key: &str,
        hook_url: &str,
    ) -> Result<(), BacklogError> {
        let response = self
            .http
            .post(format!(
                "{}/api/v2/projects/{}/webhooks",
                self.base_url, project_key
            ))
            .query(&[("apiKey", self.api_key.as_str())])
            .form(&[
                ("name", "post message to slack"),
                ("hookUrl", hook_url),
                ("allEvent", "true"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BacklogError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, BacklogError> {
        let response = self
            .http
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BacklogError::Status(response.status().as_u16()));
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
