//! Messaging transport boundary.
//!
//! Everything that actually talks to Messages.app sits behind [`Transport`]:
//! delivering one message to one recipient, listing conversations, and
//! releasing whatever the transport holds open. The dispatcher and the
//! interactive session only ever see this trait.
//!
//! CHANGELOG:
//! - 01/12/2026 - Initial implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TransportError;
use crate::recipient::Recipient;

pub mod messages;

#[cfg(test)]
pub(crate) mod testing;

pub use messages::MessagesTransport;

/// Conversation type filter for [`ChatQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Group,
    Direct,
}

/// Options for [`Transport::list_chats`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatQuery {
    /// Max chats to return (`None` for all)
    pub limit: Option<u32>,
    /// Only return chats of this kind
    pub kind: Option<ChatKind>,
    /// Only return chats with unread messages
    pub unread_only: bool,
}

impl ChatQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

/// A conversation as reported by the transport. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSummary {
    pub display_name: String,
    pub chat_id: String,
    pub is_group: bool,
    pub unread_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<DateTime<Utc>>,
}

/// The messaging service as seen by this crate.
///
/// Implementations must be safe to share between concurrently running sends.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Make exactly one delivery attempt of `content` to `to`.
    async fn send(&self, to: &Recipient, content: &str) -> Result<(), TransportError>;

    /// List existing conversations.
    async fn list_chats(&self, query: &ChatQuery) -> Result<Vec<ChatSummary>, TransportError>;

    /// Release held resources. Safe to call more than once.
    async fn close(&self) -> Result<(), TransportError>;
}
