//! Recipient tokens.
//!
//! A recipient is whatever the caller typed: a phone number, an email-like
//! handle, or a chat identifier. This layer only trims it and refuses empty
//! input; whether the destination exists is the transport's problem.
//!
//! CHANGELOG:
//! - 01/12/2026 - Replaced contact-name resolution with passthrough tokens

use serde::Serialize;
use std::fmt;

use crate::error::{DispatchError, Result};

/// What a recipient token looks like. Purely advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientKind {
    /// `chat123...` identifier or a full `iMessage;+;chat...` guid
    ChatId,
    Email,
    Phone,
    Other,
}

/// A trimmed, non-empty destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Recipient(String);

impl Recipient {
    /// Resolve a caller-supplied token.
    pub fn resolve(token: &str) -> Result<Self> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(DispatchError::EmptyRecipient);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the token so a transport can choose how to address it.
    pub fn kind(&self) -> RecipientKind {
        let token = self.0.as_str();

        let bare_chat_id = token
            .strip_prefix("chat")
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()));
        if bare_chat_id || token.contains(";+;") {
            return RecipientKind::ChatId;
        }
        if token.contains('@') {
            return RecipientKind::Email;
        }

        let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
        let phone_like = token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' ' | '.'));
        if phone_like && digits >= 3 {
            RecipientKind::Phone
        } else {
            RecipientKind::Other
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Recipient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
