use serde::Deserialize;

use crate::{UserId, UserName};

/// Reply of `chat.postMessage`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PostMessageReply {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of `channels.info`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChannelInfoReply {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub channel: Option<ChannelInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChannelInfo {
    #[serde(default)]
    pub members: Vec<UserId>,
}

/// Reply of `users.info`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UserInfoReply {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UserInfo {
    pub name: UserName,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub is_bot: bool,
}

impl UserInfo {
    /// Active account of a person.
    pub fn is_human(&self) -> bool {
        !self.deleted && !self.is_bot
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn test_channel_info() -> Result<()> {
        let reply: ChannelInfoReply = serde_json::from_str(
            r#"{"ok": true, "channel": {"id": "C1", "name": "general", "members": ["U1", "U2"]}}"#,
        )?;
        assert!(reply.ok);
        assert_eq!(
            reply.channel.unwrap_or_default().members,
            vec![UserId::from("U1"), UserId::from("U2")]
        );
        Ok(())
    }

    #[test]
    fn test_error_reply() -> Result<()> {
        let reply: ChannelInfoReply =
            serde_json::from_str(r#"{"ok": false, "error": "channel_not_found"}"#)?;
        assert!(!reply.ok);
        assert_eq!(reply.error.as_deref(), Some("channel_not_found"));
        assert_eq!(reply.channel, None);
        Ok(())
    }

    #[test]
    fn test_user_info() -> Result<()> {
        let reply: UserInfoReply = serde_json::from_str(
            r#"{"ok": true, "user": {"id": "U1", "name": "tarik", "is_bot": true}}"#,
        )?;
        let user = reply.user.unwrap_or_default();
        assert_eq!(user.name, UserName::from("tarik"));
        assert!(!user.deleted);
        assert!(!user.is_human());
        Ok(())
    }
}
