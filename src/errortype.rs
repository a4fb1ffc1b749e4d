use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacklogError {
    #[error("backlog request failed: {0}")] Request(#[from] reqwest::Error),
    #[error("backlog returned status {0}")] Status(u16),
    #[error("cannot decode backlog response: {0}")] Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SlackError {
    #[error("slack request failed: {0}")] Request(#[from] reqwest::Error),
    #[error("cannot decode slack response: {0}")] Decode(#[from] serde_json::Error),
    #[error("slack api error: {0}")] Api(String),
}

/// Failure of the event relay path. Fetch failures answer 400, post
/// failures answer 500 with the underlying error surfaced.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("cannot fetch: {0}")] Fetch(String),
    #[error("{0}")] Post(SlackError),
}

/// Failure of the setup flow. The HTTP response is already gone when these
/// surface, so they are reported into the Slack channel instead.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("cannot fetch projectKey.")] NoProject,
    #[error("webhook is already set.")] AlreadySet,
    #[error("{0}")] Backlog(#[from] BacklogError),
}

impl SetupError {
    pub fn status(&self) -> u16 {
        500
    }
}
