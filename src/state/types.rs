use std::sync::mpsc::Receiver;

use crate::net::ChatReply;

/// Active tab in the central panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Simulator,
    Inspector,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

/// One entry in the assistant transcript
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Manual page backing the answer, rendered as an "open manual" button
    pub manual_page: Option<u32>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            manual_page: None,
        }
    }

    pub fn bot(text: impl Into<String>, manual_page: Option<u32>) -> Self {
        Self {
            role: ChatRole::Bot,
            text: text.into(),
            manual_page,
        }
    }
}

/// In-flight chat request; the original message is kept so the local fallback
/// can answer it if the transport fails
pub struct PendingChat {
    pub message: String,
    pub receiver: Receiver<Result<ChatReply, String>>,
}
