use std::env;

/// Process-wide configuration, read from the environment once at startup
/// and shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backlog space root, also the base for issue/attachment links.
    pub backlog_base_url: String,
    pub backlog_api_key: String,
    pub slack_api_base: String,
    pub slack_api_token: String,
    pub slack_signing_secret: String,
    /// Externally reachable base of this service, used to build and match
    /// webhook callback URLs.
    pub base_url: String,
    pub bind_ip: String,
    pub bind_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            backlog_base_url: env::var("BACKLOG_BASE_URL")
                .expect("BACKLOG_BASE_URL must be defined"),
            backlog_api_key: env::var("BACKLOG_API_KEY")
                .expect("BACKLOG_API_KEY must be defined"),
            slack_api_base: env::var("SLACK_API_BASE")
                .unwrap_or_else(|_| "https://slack.com/api".to_owned()),
            slack_api_token: env::var("SLACK_API_TOKEN")
                .expect("SLACK_API_TOKEN must be defined"),
            slack_signing_secret: env::var("SLACK_SIGNING_SECRET")
                .expect("SLACK_SIGNING_SECRET must be defined"),
            base_url: env::var("BASE_URL").expect("BASE_URL must be defined"),
            bind_ip: env::var("BIND_IP").expect("BIND_IP must be defined"),
            bind_port: env::var("BIND_PORT")
                .expect("BIND_PORT must be defined")
                .parse::<u16>()
                .unwrap_or(8082),
        }
    }
}
