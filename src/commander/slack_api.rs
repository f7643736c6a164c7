use http::StatusCode;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use slackcommander_model::web_api::{ChannelInfoReply, PostMessageReply, UserInfoReply};
use slackcommander_model::{ChannelId, UserName};
use thiserror::Error;

use super::config::Config;
use super::ConfigError;

#[derive(Debug, Error)]
pub enum SlackApiError {
    #[error("Cannot call {method}: {source}")]
    Transport {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} replied with {status}")]
    Status {
        method: &'static str,
        status: StatusCode,
    },
    #[error("Cannot decode {method} reply: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{method} failed: {error}")]
    Api { method: &'static str, error: String },
}

/// Slack Web API calls made with the bot's post token.
pub struct SlackApi {
    client: Client,
    base_url: String,
    post_token: String,
}

impl SlackApi {
    pub fn new(client: Client, config: &Config) -> Result<Self, ConfigError> {
        if config.post_token.is_empty() {
            return Err(ConfigError::MissingPostToken);
        }
        Ok(Self {
            client,
            base_url: config.slack_api_url.trim_end_matches('/').to_string(),
            post_token: config.post_token.clone(),
        })
    }

    /// Posts `text` to `channel` as the bot user.
    pub async fn send_callback(&self, text: &str, channel: &ChannelId) -> Result<(), SlackApiError> {
        const METHOD: &str = "chat.postMessage";
        let reply: PostMessageReply = self
            .call(
                METHOD,
                &[("channel", channel.as_str()), ("text", text), ("as_user", "true")],
            )
            .await?;
        check(METHOD, reply.ok, reply.error)
    }

    /// Names of the channel's members, without deleted accounts and bots.
    pub async fn channel_members(&self, channel: &ChannelId) -> Result<Vec<UserName>, SlackApiError> {
        const CHANNEL_METHOD: &str = "channels.info";
        const USER_METHOD: &str = "users.info";
        let reply: ChannelInfoReply = self
            .call(CHANNEL_METHOD, &[("channel", channel.as_str())])
            .await?;
        check(CHANNEL_METHOD, reply.ok, reply.error)?;

        let mut names = Vec::new();
        for user_id in reply.channel.unwrap_or_default().members {
            let reply: UserInfoReply = self
                .call(USER_METHOD, &[("user", user_id.as_str())])
                .await?;
            check(USER_METHOD, reply.ok, reply.error)?;
            match reply.user {
                Some(user) if user.is_human() => names.push(user.name),
                _ => debug!("Skipping member {user_id} of {channel}"),
            }
        }
        Ok(names)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T, SlackApiError> {
        debug!("Calling {method}");
        let reply = self
            .client
            .get(format!("{}/{method}", self.base_url))
            .query(&[("token", self.post_token.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|source| SlackApiError::Transport { method, source })?;
        let status = reply.status();
        if status.as_u16() >= 400 {
            return Err(SlackApiError::Status { method, status });
        }
        let body = reply
            .text()
            .await
            .map_err(|source| SlackApiError::Transport { method, source })?;
        serde_json::from_str(&body).map_err(|source| SlackApiError::Decode { method, source })
    }
}

fn check(method: &'static str, ok: bool, error: Option<String>) -> Result<(), SlackApiError> {
    if ok {
        Ok(())
    } else {
        Err(SlackApiError::Api {
            method,
            error: error.unwrap_or_else(|| "unknown error".into()),
        })
    }
}
