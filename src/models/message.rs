use serde::Serialize;

/// Message payload for `chat.postMessage`. The channel is merged in by the
/// Slack client at post time.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    pub as_user: bool,
    pub attachments: Vec<MessageAttachment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageAttachment {
    pub fallback: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,

    pub text: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mrkdwn_in: Vec<&'static str>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<MessageField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub value: String,

    pub short: bool,
}

impl OutboundMessage {
    /// Bare text notice, used for setup outcome reports.
    pub fn notice(fallback: &str, text: String) -> Self {
        OutboundMessage {
            as_user: true,
            attachments: vec![MessageAttachment {
                fallback: fallback.to_owned(),
                color: None,
                pretext: None,
                text,
                mrkdwn_in: Vec::new(),
                fields: Vec::new(),
            }],
        }
    }
}
