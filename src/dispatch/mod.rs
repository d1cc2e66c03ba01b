//! Message requests and the single-send operation.
//!
//! CHANGELOG:
//! - 01/12/2026 - Initial implementation

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::recipient::Recipient;
use crate::transport::Transport;

pub mod batch;

pub use batch::{BatchDispatcher, BatchReport};

/// One message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRequest {
    pub to: Recipient,
    pub content: String,
}

impl MessageRequest {
    pub fn new(to: Recipient, content: impl Into<String>) -> Self {
        Self {
            to,
            content: content.into(),
        }
    }

    /// Resolve `to` and build a request.
    pub fn parse(to: &str, content: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Recipient::resolve(to)?, content))
    }
}

/// Terminal result of a single send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DispatchOutcome {
    Sent,
    Failed { reason: String },
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent)
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Sent => None,
            DispatchOutcome::Failed { reason } => Some(reason),
        }
    }
}

/// Make exactly one delivery attempt. Never retries, never panics on a
/// transport error: the cause is carried in [`DispatchOutcome::Failed`].
pub async fn send_one<T>(transport: &T, request: &MessageRequest) -> DispatchOutcome
where
    T: Transport + ?Sized,
{
    match transport.send(&request.to, &request.content).await {
        Ok(()) => {
            debug!(recipient = %request.to, "message sent");
            DispatchOutcome::Sent
        }
        Err(e) => {
            warn!(recipient = %request.to, error = %e, "message failed");
            DispatchOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::RecordingTransport;

    #[tokio::test]
    async fn test_send_one_success() {
        let transport = RecordingTransport::new();
        let request = MessageRequest::parse("+14155551234", "Hello from CLI!").unwrap();

        let outcome = send_one(&transport, &request).await;

        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(
            transport.sent(),
            vec![("+14155551234".to_string(), "Hello from CLI!".to_string())]
        );
    }

    #[tokio::test]
    async fn test_send_one_failure_carries_cause() {
        let transport = RecordingTransport::new().fail_for("nobody");
        let request = MessageRequest::parse("nobody", "hi").unwrap();

        let outcome = send_one(&transport, &request).await;

        assert!(!outcome.is_sent());
        assert_eq!(outcome.failure_reason(), Some("unknown recipient nobody"));
        // Exactly one attempt
        assert_eq!(transport.started().len(), 1);
    }

    #[test]
    fn test_parse_rejects_empty_recipient() {
        assert!(MessageRequest::parse("  ", "hi").is_err());
    }

    #[test]
    fn test_outcome_json() {
        let failed = DispatchOutcome::Failed {
            reason: "boom".into(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"status": "failed", "reason": "boom"})
        );
        assert_eq!(
            serde_json::to_value(DispatchOutcome::Sent).unwrap(),
            serde_json::json!({"status": "sent"})
        );
    }
}
