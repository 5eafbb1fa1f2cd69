//! Message types for model communication.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A message in a conversation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Optional participant name. When present the role token is omitted
    /// from the wire framing, which the token estimator accounts for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
            name: None,
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            name: None,
        }
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            name: None,
        }
    }

    /// Attach a participant name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Service-reported explanation for why a candidate stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
pub enum FinishReason {
    #[strum(serialize = "stop")]
    Stop,
    #[strum(serialize = "length")]
    Length,
    #[strum(serialize = "content_filter")]
    ContentFilter,
    /// Any reason this client does not recognize.
    #[strum(default)]
    Other(String),
}

impl FinishReason {
    /// Whether generation reached a natural end token.
    pub fn is_natural_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let msg = ChatMessage::system("S");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "S");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn finish_reason_parses_known_and_unknown() {
        assert_eq!("stop".parse::<FinishReason>().unwrap(), FinishReason::Stop);
        assert_eq!(
            "length".parse::<FinishReason>().unwrap(),
            FinishReason::Length
        );
        assert_eq!(
            "function_call".parse::<FinishReason>().unwrap(),
            FinishReason::Other("function_call".to_string())
        );
    }

    #[test]
    fn finish_reason_displays_wire_form() {
        assert_eq!(FinishReason::Stop.to_string(), "stop");
        assert_eq!(FinishReason::ContentFilter.to_string(), "content_filter");
    }
}
