use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single message in the conversation.
///
/// Serializes to the `{ "role": ..., "content": ... }` shape the backend
/// expects in a query's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Append-only, chronologically ordered conversation transcript.
///
/// The log may start with a synthetic greeting from the assistant. That
/// greeting is shown to the user but never sent back to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    messages: Vec<Message>,
    has_greeting: bool,
}

impl ConversationLog {
    /// An empty log with no greeting.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log whose first entry is a synthetic assistant greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
            has_greeting: true,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Messages to send as `history`: everything except the greeting.
    pub fn history(&self) -> &[Message] {
        if self.has_greeting {
            &self.messages[1..]
        } else {
            &self.messages
        }
    }
}

impl<'a> IntoIterator for &'a ConversationLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialization_shape() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));

        let json = serde_json::to_value(Message::assistant("hello")).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_history_excludes_greeting() {
        let mut log = ConversationLog::with_greeting("Ready to chat!");
        assert_eq!(log.len(), 1);
        assert!(log.history().is_empty());

        log.push(Message::user("q"));
        log.push(Message::assistant("a"));
        assert_eq!(log.len(), 3);
        assert_eq!(log.history(), &[Message::user("q"), Message::assistant("a")]);
    }

    #[test]
    fn test_history_without_greeting_is_everything() {
        let mut log = ConversationLog::new();
        log.push(Message::user("q"));
        assert_eq!(log.history().len(), 1);
        assert_eq!(log.last(), Some(&Message::user("q")));
    }
}
