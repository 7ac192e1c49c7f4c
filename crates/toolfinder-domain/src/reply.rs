//! Chat replies as returned by a chat service

use serde::{Deserialize, Serialize};

/// A message nested inside a structured chat reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker role, usually "assistant"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Message text
    pub content: String,
}

/// What a chat service answers with
///
/// Services answer either with a bare string or with an object carrying a
/// nested `message.content`. Extra fields on the object are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatReply {
    /// Object with a nested message
    Message {
        /// The nested message
        message: ChatMessage,
    },
    /// Plain text
    Text(String),
}

impl ChatReply {
    /// Plain text reply
    pub fn text(content: impl Into<String>) -> Self {
        ChatReply::Text(content.into())
    }

    /// Structured reply from the assistant
    pub fn message(content: impl Into<String>) -> Self {
        ChatReply::Message {
            message: ChatMessage {
                role: Some("assistant".to_string()),
                content: content.into(),
            },
        }
    }

    /// Borrow the reply text
    pub fn as_text(&self) -> &str {
        match self {
            ChatReply::Message { message } => &message.content,
            ChatReply::Text(text) => text,
        }
    }

    /// Normalize the reply to plain text
    ///
    /// # Examples
    ///
    /// ```
    /// use toolfinder_domain::ChatReply;
    ///
    /// assert_eq!(ChatReply::message("hi").into_text(), "hi");
    /// assert_eq!(ChatReply::text("hi").into_text(), "hi");
    /// ```
    pub fn into_text(self) -> String {
        match self {
            ChatReply::Message { message } => message.content,
            ChatReply::Text(text) => text,
        }
    }
}

impl From<String> for ChatReply {
    fn from(text: String) -> Self {
        ChatReply::Text(text)
    }
}

impl From<&str> for ChatReply {
    fn from(text: &str) -> Self {
        ChatReply::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_string_reply() {
        let reply: ChatReply = serde_json::from_str(r#""just text""#).unwrap();
        assert_eq!(reply, ChatReply::text("just text"));
        assert_eq!(reply.as_text(), "just text");
    }

    #[test]
    fn test_nested_message_reply_ignores_extra_fields() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"model":"llama3","message":{"role":"assistant","content":"hello"},"done":true}"#,
        )
        .unwrap();
        assert_eq!(reply.clone().into_text(), "hello");
        assert!(matches!(reply, ChatReply::Message { .. }));
    }

    #[test]
    fn test_message_without_role() {
        let reply: ChatReply = serde_json::from_str(r#"{"message":{"content":"x"}}"#).unwrap();
        assert_eq!(reply.into_text(), "x");
    }
}
