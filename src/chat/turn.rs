use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a conversation, in the wire shape the completion API and
/// the chat widget both use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The message intent routing looks at: the newest user turn, or the newest
/// turn of any role when the user has not spoken.
pub fn latest_utterance(history: &[ChatTurn]) -> &str {
    history
        .iter()
        .rev()
        .find(|turn| turn.role == Role::User)
        .or_else(|| history.last())
        .map(|turn| turn.content.as_str())
        .unwrap_or("")
}
