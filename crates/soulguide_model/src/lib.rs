use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod table;

pub use table::{Keyword, KeywordEntry, KeywordTable, Replies, ResponseTable, TableError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sender {
    User,
    Assistant,
}

/// Single transcript line. Never modified once appended to a transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        ChatMessage {
            text: text.into(),
            sender: Sender::Assistant,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
pub struct TurnId(u64);

impl TurnId {
    pub fn next(self) -> Self {
        TurnId(self.0 + 1)
    }
}

impl Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn chat_message_serializes_sender_in_camel_case() -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(&ChatMessage::assistant("Namaste"))?;
        assert_eq!(yaml, "text: Namaste\nsender: assistant\n");
        Ok(())
    }

    #[test]
    fn turn_ids_increase() {
        let first = TurnId::default();
        assert!(first.next() > first);
        assert_eq!(first.next().to_string(), "#1");
    }
}
