//! Turns a change event plus the fresh issue snapshot into the Slack
//! message payload.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::event::{Change, ChangeEvent};
use crate::models::issue::{IssueSnapshot, StatusCatalog};
use crate::models::message::{MessageAttachment, MessageField, OutboundMessage};

pub fn event_label(event_type: i64) -> &'static str {
    match event_type {
        1 => "Issue Created",
        2 => "Issue Updated",
        3 => "Issue Commented",
        _ => "Updated",
    }
}

fn priority_name(id: &str) -> String {
    match id {
        "2" => "High".to_owned(),
        "3" => "Normal".to_owned(),
        "4" => "Low".to_owned(),
        other => other.to_owned(),
    }
}

fn status_name(id: &str, catalog: &StatusCatalog) -> String {
    id.parse::<i64>()
        .ok()
        .and_then(|id| catalog.get(&id))
        .map(|status| status.name.clone())
        .unwrap_or_else(|| id.to_owned())
}

/// Translate Backlog markdown into Slack mrkdwn: collapse blank lines,
/// `**bold**` to `*bold*`, `~~strike~~` to `~strike~`. Anything else,
/// stray asterisks and backslashes included, passes through untouched.
pub fn parse_comment(text: &str) -> String {
    static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid regex"));
    static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+)\*\*").expect("valid regex"));
    static STRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+)~~").expect("valid regex"));

    let text = BLANK_LINES.replace_all(text, "\n");
    let text = BOLD.replace_all(&text, "*$1*");
    let text = STRIKE.replace_all(&text, "~$1~");
    text.into_owned()
}

fn find_change<'a>(changes: &'a [Change], field: &str) -> Option<&'a Change> {
    changes.iter().find(|change| change.field == field)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

pub fn generate_message(
    event: &ChangeEvent,
    issue: &IssueSnapshot,
    mentions: &[String],
    catalog: &StatusCatalog,
    backlog_base_url: &str,
) -> OutboundMessage {
    let content = &event.content;
    let issue_key = format!("{}-{}", event.project.project_key, content.key_id);

    let status_text = match find_change(&content.changes, "status") {
        Some(change) => format!(
            "{} → {}",
            status_name(&change.old_value, catalog),
            status_name(&change.new_value, catalog)
        ),
        None => issue.status.name.clone(),
    };

    let priority_text = match find_change(&content.changes, "priority") {
        Some(change) => format!(
            "{} → {}",
            priority_name(&change.old_value),
            priority_name(&change.new_value)
        ),
        None => issue.priority.name.clone(),
    };

    let mut fields = vec![
        MessageField {
            title: None,
            value: format!("*Status*: {}", status_text),
            short: true,
        },
        MessageField {
            title: None,
            value: format!("*Priority*: {}", priority_text),
            short: true,
        },
    ];

    if let Some(assignee) = &issue.assignee {
        // Backlog spells this change field "asigner"
        let assignee_text = match find_change(&content.changes, "asigner") {
            Some(change) => format!("{} → {}", change.old_value, change.new_value),
            None => assignee.name.clone(),
        };
        fields.push(MessageField {
            title: None,
            value: format!("*Assignee*: {}", assignee_text),
            short: true,
        });
    }

    if let Some(updated_user) = &issue.updated_user {
        fields.push(MessageField {
            title: None,
            value: format!("*Updated by*: {}", updated_user.name),
            short: true,
        });
    }

    if let Some(start_date) = present(&content.start_date) {
        fields.push(MessageField {
            title: None,
            value: format!("*Start date*: {}", start_date),
            short: true,
        });
    }

    if let Some(due_date) = present(&content.due_date) {
        let due_text = match find_change(&content.changes, "limitDate") {
            Some(change) => format!("{} → {}", change.old_value, change.new_value),
            None => due_date.to_owned(),
        };
        fields.push(MessageField {
            title: None,
            value: format!("*Due date*: {}", due_text),
            short: true,
        });
    }

    if !content.attachments.is_empty() {
        let links = content
            .attachments
            .iter()
            .map(|attachment| {
                format!(
                    "<{}/downloadAttachment/{}/{}|{}>",
                    backlog_base_url, attachment.id, attachment.name, attachment.name
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        fields.push(MessageField {
            title: None,
            value: format!("*Files*: {}", links),
            short: false,
        });
    }

    if event.event_type == 1 {
        if let Some(description) = present(&content.description) {
            fields.push(MessageField {
                title: Some("Description".to_owned()),
                value: parse_comment(description),
                short: false,
            });
        }
    }

    if let Some(comment) = &content.comment {
        fields.push(MessageField {
            title: Some("Comment".to_owned()),
            value: parse_comment(&comment.content),
            short: false,
        });
    }

    let label = event_label(event.event_type);

    let mut pretext = String::new();
    if !mentions.is_empty() {
        pretext = format!("<@{}>\n", mentions.join("> <@"));
    }
    pretext.push_str(&format!("Backlog - {}", label));

    let color = catalog
        .get(&issue.status.id)
        .and_then(|status| status.color.clone());

    OutboundMessage {
        as_user: true,
        attachments: vec![MessageAttachment {
            fallback: format!("Backlog - {}: {} {}", label, issue_key, content.summary),
            color,
            pretext: Some(pretext),
            text: format!(
                "【{}】<{}/view/{}|{}> {}",
                issue.issue_type.name, backlog_base_url, issue_key, issue_key, content.summary
            ),
            mrkdwn_in: vec!["pretext", "text", "fields"],
            fields,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::issue::build_catalog;

    fn sample_event(changes: serde_json::Value) -> ChangeEvent {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "type": 2,
            "project": {"projectKey": "PRJ"},
            "content": {
                "key_id": 42,
                "summary": "fix the flux capacitor",
                "changes": changes,
                "attachments": []
            },
            "createdUser": {"id": 1},
            "updatedUser": {"id": 1},
            "notifications": []
        }))
        .expect("event should deserialize")
    }

    fn sample_issue() -> IssueSnapshot {
        serde_json::from_value(serde_json::json!({
            "summary": "fix the flux capacitor",
            "status": {"id": 1, "name": "Open"},
            "priority": {"id": 3, "name": "Normal"},
            "issueType": {"name": "Bug"},
            "updatedUser": {"name": "Alice"}
        }))
        .expect("issue should deserialize")
    }

    fn sample_catalog() -> StatusCatalog {
        build_catalog(
            serde_json::from_value(serde_json::json!([
                {"id": 1, "name": "Open", "color": "#ed8077"},
                {"id": 2, "name": "Closed", "color": "#b0be3c"}
            ]))
            .expect("statuses should deserialize"),
        )
    }

    fn field_values(message: &OutboundMessage) -> Vec<String> {
        message.attachments[0]
            .fields
            .iter()
            .map(|field| field.value.clone())
            .collect()
    }

    #[test]
    fn status_change_renders_old_and_new_names() {
        let event = sample_event(serde_json::json!([
            {"field": "status", "old_value": 1, "new_value": 2}
        ]));
        let message =
            generate_message(&event, &sample_issue(), &[], &sample_catalog(), "https://bl.example.com");

        assert_eq!(field_values(&message)[0], "*Status*: Open → Closed");
    }

    #[test]
    fn no_status_change_renders_snapshot_status() {
        let event = sample_event(serde_json::json!([]));
        let message =
            generate_message(&event, &sample_issue(), &[], &sample_catalog(), "https://bl.example.com");

        assert_eq!(field_values(&message)[0], "*Status*: Open");
    }

    #[test]
    fn unknown_status_id_falls_back_to_raw_id() {
        let event = sample_event(serde_json::json!([
            {"field": "status", "old_value": 1, "new_value": 99}
        ]));
        let message =
            generate_message(&event, &sample_issue(), &[], &sample_catalog(), "https://bl.example.com");

        assert_eq!(field_values(&message)[0], "*Status*: Open → 99");
    }

    #[test]
    fn priority_change_uses_static_table() {
        let event = sample_event(serde_json::json!([
            {"field": "priority", "old_value": 3, "new_value": 2}
        ]));
        let message =
            generate_message(&event, &sample_issue(), &[], &sample_catalog(), "https://bl.example.com");

        assert_eq!(field_values(&message)[1], "*Priority*: Normal → High");
    }

    #[test]
    fn color_comes_from_catalog_entry_of_current_status() {
        let event = sample_event(serde_json::json!([]));
        let message =
            generate_message(&event, &sample_issue(), &[], &sample_catalog(), "https://bl.example.com");

        assert_eq!(
            message.attachments[0].color.as_deref(),
            Some("#ed8077")
        );
    }

    #[test]
    fn missing_catalog_entry_for_current_status_drops_color() {
        let event = sample_event(serde_json::json!([]));
        let message =
            generate_message(&event, &sample_issue(), &[], &StatusCatalog::new(), "https://bl.example.com");

        assert!(message.attachments[0].color.is_none());
    }

    #[test]
    fn pretext_lists_mentions_before_event_label() {
        let event = sample_event(serde_json::json!([]));
        let mentions = vec!["alice".to_owned(), "bob".to_owned()];
        let message = generate_message(
            &event,
            &sample_issue(),
            &mentions,
            &sample_catalog(),
            "https://bl.example.com",
        );

        assert_eq!(
            message.attachments[0].pretext.as_deref(),
            Some("<@alice> <@bob>\nBacklog - Issue Updated")
        );
    }

    #[test]
    fn text_links_the_issue_key() {
        let event = sample_event(serde_json::json!([]));
        let message =
            generate_message(&event, &sample_issue(), &[], &sample_catalog(), "https://bl.example.com");

        assert_eq!(
            message.attachments[0].text,
            "【Bug】<https://bl.example.com/view/PRJ-42|PRJ-42> fix the flux capacitor"
        );
        assert_eq!(
            message.attachments[0].fallback,
            "Backlog - Issue Updated: PRJ-42 fix the flux capacitor"
        );
    }

    #[test]
    fn description_appears_only_for_created_events() {
        let mut event = sample_event(serde_json::json!([]));
        event.content.description = Some("details here".to_owned());

        let updated = generate_message(
            &event,
            &sample_issue(),
            &[],
            &sample_catalog(),
            "https://bl.example.com",
        );
        assert!(!field_values(&updated).iter().any(|v| v == "details here"));

        event.event_type = 1;
        let created = generate_message(
            &event,
            &sample_issue(),
            &[],
            &sample_catalog(),
            "https://bl.example.com",
        );
        let description = created.attachments[0]
            .fields
            .iter()
            .find(|field| field.title.as_deref() == Some("Description"))
            .expect("description field");
        assert_eq!(description.value, "details here");
    }

    #[test]
    fn attachments_render_as_download_links() {
        let mut event = sample_event(serde_json::json!([]));
        event.content.attachments = serde_json::from_value(serde_json::json!([
            {"id": 5, "name": "log.txt"}
        ]))
        .expect("attachments should deserialize");

        let message =
            generate_message(&event, &sample_issue(), &[], &sample_catalog(), "https://bl.example.com");
        let files = field_values(&message)
            .into_iter()
            .find(|value| value.starts_with("*Files*"))
            .expect("files field");
        assert_eq!(
            files,
            "*Files*: <https://bl.example.com/downloadAttachment/5/log.txt|log.txt>"
        );
    }

    #[test]
    fn markdown_dialect_is_translated() {
        assert_eq!(parse_comment("**bold** and ~~gone~~"), "*bold* and ~gone~");
        assert_eq!(parse_comment("a\n\n\nb"), "a\nb");
        // non-matching markers stay untouched
        assert_eq!(parse_comment(r"keep \* and * alone"), r"keep \* and * alone");
        assert_eq!(parse_comment(r"c:\path\to\file"), r"c:\path\to\file");
    }

    #[test]
    fn comment_body_is_translated_and_titled() {
        let mut event = sample_event(serde_json::json!([]));
        event.event_type = 3;
        event.content.comment = serde_json::from_value(serde_json::json!({
            "content": "please **check** this"
        }))
        .expect("comment should deserialize");

        let message =
            generate_message(&event, &sample_issue(), &[], &sample_catalog(), "https://bl.example.com");
        let comment = message.attachments[0]
            .fields
            .iter()
            .find(|field| field.title.as_deref() == Some("Comment"))
            .expect("comment field");
        assert_eq!(comment.value, "please *check* this");
        assert_eq!(
            message.attachments[0].pretext.as_deref(),
            Some("Backlog - Issue Commented")
        );
    }

    #[test]
    fn due_date_change_renders_old_and_new() {
        let mut event = sample_event(serde_json::json!([
            {"field": "limitDate", "old_value": "2026-08-01", "new_value": "2026-08-15"}
        ]));
        event.content.due_date = Some("2026-08-15".to_owned());

        let message =
            generate_message(&event, &sample_issue(), &[], &sample_catalog(), "https://bl.example.com");
        assert!(field_values(&message)
            .iter()
            .any(|value| value == "*Due date*: 2026-08-01 → 2026-08-15"));
    }
}
