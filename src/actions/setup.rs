use crate::client;
use crate::config::Config;
use crate::errortype::SetupError;
use crate::models::command::SetupCommand;
use crate::models::message::OutboundMessage;

/// Run the deferred part of the setup flow and report the outcome into the
/// invoking channel. The HTTP response was already sent.
pub async fn run(
    config: &Config,
    backlog: &client::backlog::Client,
    slack: &client::slack::Client,
    command: SetupCommand,
) {
    log::info!("Start Setup To {}", command.channel_id);

    let outcome = register_webhook(config, backlog, &command).await;
    let notice = match outcome {
        Ok(()) => {
            log::info!("Start message post to {}", command.channel_id);
            OutboundMessage::notice("Slack - setup complete", "Completed setting webhook!".to_owned())
        }
        Err(error) => {
            log::error!("setup failed ({}): {}", error.status(), error);
            let name_or_key = if command.text.is_empty() {
                format!("channel_name: {}", command.channel_name)
            } else {
                format!("projectID or Key: {}", command.text)
            };
            OutboundMessage::notice(
                "Slack - setup fail",
                format!(
                    "Failed setting webhook: {}\nchannel_id: {}\n{}",
                    error, command.channel_id, name_or_key
                ),
            )
        }
    };

    if let Err(error) = slack.post_message(&command.channel_id, &notice).await {
        log::error!("cannot report setup outcome: {}", error);
    }
}

/// Resolve the target project, refuse duplicates, register the webhook.
async fn register_webhook(
    config: &Config,
    backlog: &client::backlog::Client,
    command: &SetupCommand,
) -> Result<(), SetupError> {
    let project_key = if command.text.is_empty() {
        backlog
            .get_projects()
            .await?
            .into_iter()
            .find(|project| project.name.to_uppercase() == command.channel_name.to_uppercase())
            .map(|project| project.project_key)
            .ok_or(SetupError::NoProject)?
    } else {
        command.text.clone()
    };

    let webhooks = backlog.get_webhooks(&project_key).await?;
    let channel_marker = format!("channelId={}", command.channel_id);
    let already_set = webhooks.iter().any(|webhook| {
        webhook.hook_url.starts_with(&config.base_url) && webhook.hook_url.contains(&channel_marker)
    });
    if already_set {
        return Err(SetupError::AlreadySet);
    }

    let hook_url = format!("{}/chat?channelId={}", config.base_url, command.channel_id);
    backlog.add_webhook(&project_key, &hook_url).await?;
    Ok(())
}
