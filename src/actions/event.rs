use crate::client;
use crate::errortype::RelayError;
use crate::formatter;
use crate::models::event::ChangeEvent;
use crate::models::issue::build_catalog;
use crate::resolver;

/// Relay one change event: fetch the two directories and the issue state,
/// resolve mentions, format, post to the channel.
pub async fn process_event(
    backlog: &client::backlog::Client,
    slack: &client::slack::Client,
    backlog_base_url: &str,
    event: &ChangeEvent,
    channel_id: &str,
) -> Result<(), RelayError> {
    let project_key = event.project.project_key.as_str();
    log::info!("Start {}-{}", project_key, event.content.key_id);

    let (slack_users, backlog_users) = tokio::try_join!(
        async {
            slack
                .list_users()
                .await
                .map_err(|e| RelayError::Fetch(e.to_string()))
        },
        async {
            backlog
                .get_project_users(project_key)
                .await
                .map_err(|e| RelayError::Fetch(e.to_string()))
        },
    )?;

    let mentions = resolver::build_mentions(event, &backlog_users, &slack_users);

    let (issue, statuses) = tokio::try_join!(
        async {
            backlog
                .get_issue(project_key, event.content.key_id)
                .await
                .map_err(|e| RelayError::Fetch(e.to_string()))
        },
        async {
            backlog
                .get_statuses(project_key)
                .await
                .map_err(|e| RelayError::Fetch(e.to_string()))
        },
    )?;
    let catalog = build_catalog(statuses);

    log::info!("Start message post to {}", mentions.join(","));
    let message = formatter::generate_message(event, &issue, &mentions, &catalog, backlog_base_url);
    slack
        .post_message(channel_id, &message)
        .await
        .map_err(RelayError::Post)
}
