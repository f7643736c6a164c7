use log::warn;
use serde::{Deserialize, Serialize};

use crate::ResponseType;

/// Reply to a slash command.
///
/// Serializes to one of the two shapes the chat platform understands:
/// `{"text": "..."}` or `{"attachments": [{"text": "..."}], "markdown": false}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandResponse {
    Attachments {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        response_type: Option<ResponseType>,
        attachments: Vec<Attachment>,
        #[serde(default)]
        markdown: bool,
    },
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        response_type: Option<ResponseType>,
        text: String,
    },
}

impl CommandResponse {
    /// Plain `{"text": ...}` reply.
    pub fn text(text: impl Into<String>) -> Self {
        CommandResponse::Text {
            response_type: None,
            text: text.into(),
        }
    }

    /// Single attachment reply without any extra formatting.
    pub fn simple_text(text: impl Into<String>) -> Self {
        Self::with_attachments(vec![Attachment::new(text)])
    }

    pub fn with_attachments(attachments: Vec<Attachment>) -> Self {
        CommandResponse::Attachments {
            response_type: None,
            attachments,
            markdown: false,
        }
    }

    /// Enables platform markdown. Has no effect on plain text replies.
    pub fn markdown(self, enabled: bool) -> Self {
        match self {
            CommandResponse::Attachments {
                response_type,
                attachments,
                ..
            } => CommandResponse::Attachments {
                response_type,
                attachments,
                markdown: enabled,
            },
            text @ CommandResponse::Text { .. } => {
                warn!("Markdown flag ignored for plain text response");
                text
            }
        }
    }

    pub fn response_type(mut self, value: ResponseType) -> Self {
        match &mut self {
            CommandResponse::Attachments { response_type, .. }
            | CommandResponse::Text { response_type, .. } => *response_type = Some(value),
        }
        self
    }

    pub fn attachments(&self) -> &[Attachment] {
        match self {
            CommandResponse::Attachments { attachments, .. } => attachments,
            CommandResponse::Text { .. } => &[],
        }
    }

    /// True when there is nothing a user could read in this response.
    pub fn is_empty(&self) -> bool {
        match self {
            CommandResponse::Attachments { attachments, .. } => {
                attachments.iter().all(Attachment::is_empty)
            }
            CommandResponse::Text { text, .. } => text.is_empty(),
        }
    }

    /// Readable text of the response, attachments separated with new lines.
    pub fn plain_text(&self) -> String {
        match self {
            CommandResponse::Attachments { attachments, .. } => attachments
                .iter()
                .map(|a| a.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            CommandResponse::Text { text, .. } => text.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Shown by clients that can't render attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mrkdwn_in: Vec<String>,
}

impl Attachment {
    pub fn new(text: impl Into<String>) -> Self {
        Attachment {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        Attachment {
            title: Some(title.into()),
            ..self
        }
    }

    pub fn color(self, color: impl Into<String>) -> Self {
        Attachment {
            color: Some(color.into()),
            ..self
        }
    }

    pub fn fallback(self, fallback: impl Into<String>) -> Self {
        Attachment {
            fallback: Some(fallback.into()),
            ..self
        }
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty() && self.title.as_deref().unwrap_or_default().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::{json, Value};

    #[test]
    fn serialize_simple_text() -> Result<()> {
        let value = serde_json::to_value(CommandResponse::simple_text("Hello, tarik"))?;
        assert_eq!(
            value,
            json!({ "attachments": [{ "text": "Hello, tarik" }], "markdown": false })
        );
        Ok(())
    }

    #[test]
    fn serialize_plain_text() -> Result<()> {
        let value = serde_json::to_value(CommandResponse::text("pong"))?;
        assert_eq!(value, json!({ "text": "pong" }));
        Ok(())
    }

    #[test]
    fn serialize_rich_attachment() -> Result<()> {
        let response = CommandResponse::with_attachments(vec![Attachment::new("*deployed*")
            .title("Deploy")
            .color("good")])
        .markdown(true)
        .response_type(ResponseType::InChannel);
        let expected_json: Value = serde_json::from_str(
            r#"{
                "response_type": "in_channel",
                "attachments": [
                    {
                        "text": "*deployed*",
                        "title": "Deploy",
                        "color": "good"
                    }
                ],
                "markdown": true
            }"#,
        )?;
        assert_eq!(serde_json::to_value(response)?, expected_json);
        Ok(())
    }

    #[test]
    fn deserialize_both_shapes() -> Result<()> {
        assert_eq!(
            serde_json::from_str::<CommandResponse>(r#"{"text": "pong"}"#)?,
            CommandResponse::text("pong")
        );
        assert_eq!(
            serde_json::from_str::<CommandResponse>(r#"{"attachments": [{"text": "a"}]}"#)?,
            CommandResponse::simple_text("a")
        );
        Ok(())
    }

    #[test]
    fn markdown_is_ignored_for_text() {
        assert_eq!(
            CommandResponse::text("pong").markdown(true),
            CommandResponse::text("pong")
        );
    }

    #[test]
    fn empty_responses() {
        assert!(CommandResponse::text("").is_empty());
        assert!(CommandResponse::with_attachments(vec![]).is_empty());
        assert!(CommandResponse::simple_text("").is_empty());
        assert!(!CommandResponse::simple_text("x").is_empty());
        assert!(!CommandResponse::with_attachments(vec![Attachment::new("").title("t")]).is_empty());
    }

    #[test]
    fn plain_text_joins_attachments() {
        let response =
            CommandResponse::with_attachments(vec![Attachment::new("one"), Attachment::new("two")]);
        assert_eq!(response.plain_text(), "one\ntwo");
        assert_eq!(CommandResponse::text("three").plain_text(), "three");
    }
}
