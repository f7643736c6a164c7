use serde::{Deserialize, Serialize};

use crate::{ChannelId, UserId, UserName};

/// Form fields posted by the chat platform when a user issues a slash command.
///
/// Every field is optional on the wire; missing ones are left empty and it's up to the
/// dispatcher to decide what an empty value means.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlashRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user_name: UserName,
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    pub channel_id: ChannelId,
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub team_id: String,
    /// Slash command as typed by the user, e.g. `/deploy`.
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub response_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn deserialize_form() -> Result<()> {
        let body = "token=secret&user_name=tarik&user_id=U123&channel_id=C42\
                    &command=%2Fdeploy&text=start+%22hello+world%22\
                    &response_url=https%3A%2F%2Fhooks.example.com%2Fcommands%2F1";
        let request: SlashRequest = serde_urlencoded::from_str(body)?;
        assert_eq!(request.token, "secret");
        assert_eq!(request.user_name, UserName::from("tarik"));
        assert_eq!(request.user_id, UserId::from("U123"));
        assert_eq!(request.channel_id, ChannelId::from("C42"));
        assert_eq!(request.command, "/deploy");
        assert_eq!(request.text, "start \"hello world\"");
        assert_eq!(
            request.response_url,
            "https://hooks.example.com/commands/1"
        );
        assert_eq!(request.team_id, "");
        Ok(())
    }

    #[test]
    fn deserialize_empty_form() -> Result<()> {
        let request: SlashRequest = serde_urlencoded::from_str("")?;
        assert_eq!(request, SlashRequest::default());
        Ok(())
    }
}
