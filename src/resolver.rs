//! Cross-system identity resolution: Backlog users are joined to Slack
//! members by email equality only, recomputed per event.

use crate::models::event::ChangeEvent;
use crate::models::user::{SlackUser, TrackerUser};

/// Look up the Slack handle for a Backlog user id. Misses on either side
/// are not an error, the mention is simply skipped.
pub fn resolve_chat_handle(
    tracker_id: i64,
    tracker_users: &[TrackerUser],
    slack_users: &[SlackUser],
) -> Option<String> {
    let tracker_user = tracker_users.iter().find(|user| user.id == tracker_id)?;
    let mail = tracker_user.mail_address.as_deref()?;
    let slack_user = slack_users
        .iter()
        .find(|member| member.profile.email.as_deref() == Some(mail))?;
    Some(slack_user.name.clone())
}

/// Build the mention list for one event: the assignee first, unless the
/// change was their own doing, then every notification target. Deduplicated
/// by resolved Slack handle.
pub fn build_mentions(
    event: &ChangeEvent,
    tracker_users: &[TrackerUser],
    slack_users: &[SlackUser],
) -> Vec<String> {
    let mut handles = Vec::new();

    if let Some(assignee) = &event.content.assignee {
        let self_update = event
            .created_user
            .as_ref()
            .is_some_and(|user| user.id == assignee.id)
            || event
                .updated_user
                .as_ref()
                .is_some_and(|user| user.id == assignee.id);
        if !self_update {
            if let Some(handle) = resolve_chat_handle(assignee.id, tracker_users, slack_users) {
                handles.push(handle);
            }
        }
    }

    for notification in &event.notifications {
        if let Some(handle) =
            resolve_chat_handle(notification.user.id, tracker_users, slack_users)
        {
            if !handles.contains(&handle) {
                handles.push(handle);
            }
        }
    }

    handles
}
