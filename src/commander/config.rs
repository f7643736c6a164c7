use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Shared secret the chat platform sends with every request. Must not be empty.
    #[serde(default)]
    pub token: String,

    /// Strips `*bold*`, `~strike~` and `_italic_` wrapping from command text.
    #[serde(default)]
    pub ignore_formatting: bool,

    /// Disables callback requests, payloads are only recorded. Useful for development and testing.
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default = "default_serving_addr")]
    pub serving_addr: String,

    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    /// Token for Slack Web API calls made on behalf of the bot. Empty disables them.
    #[serde(default)]
    pub post_token: String,

    #[serde(default = "default_slack_api_url")]
    pub slack_api_url: String,
}

fn default_serving_addr() -> String {
    "0.0.0.0:8080".into()
}

fn default_webhook_path() -> String {
    "/".into()
}

fn default_slack_api_url() -> String {
    "https://slack.com/api".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: Default::default(),
            ignore_formatting: false,
            dry_run: false,
            serving_addr: default_serving_addr(),
            webhook_path: default_webhook_path(),
            post_token: Default::default(),
            slack_api_url: default_slack_api_url(),
        }
    }
}

impl Config {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// Webhook path in the form the router expects.
    pub fn effective_webhook_path(&self) -> String {
        if self.webhook_path.starts_with('/') {
            self.webhook_path.clone()
        } else {
            format!("/{}", self.webhook_path)
        }
    }
}
