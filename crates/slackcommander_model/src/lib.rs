use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod request;
pub mod response;
pub mod web_api;

pub use request::SlashRequest;
pub use response::{Attachment, CommandResponse};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
pub struct UserName(String);

impl UserName {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for UserName {
    fn from(value: String) -> Self {
        UserName(value)
    }
}

impl From<&str> for UserName {
    fn from(value: &str) -> Self {
        UserName(String::from(value))
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash, Default)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId(value.to_string())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash, Default)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        ChannelId(value.to_string())
    }
}

impl Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Visibility of a reply inside the channel the command was issued from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Ephemeral,
    InChannel,
}

impl Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ResponseType::Ephemeral => "ephemeral",
            ResponseType::InChannel => "in_channel",
        })
    }
}

#[derive(Error, Debug)]
#[error("Invalid value: {0}")]
pub struct FromStrError(String);

impl TryFrom<&str> for ResponseType {
    type Error = FromStrError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "ephemeral" => Ok(ResponseType::Ephemeral),
            "in_channel" => Ok(ResponseType::InChannel),
            other => Err(FromStrError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_str_error() {
        assert_eq!(
            &ResponseType::try_from("broadcast").unwrap_err().to_string(),
            "Invalid value: broadcast"
        );
    }

    #[test]
    fn response_type_round_trips_through_display() {
        for t in [ResponseType::Ephemeral, ResponseType::InChannel] {
            assert_eq!(ResponseType::try_from(t.to_string().as_str()).unwrap(), t);
        }
    }
}
