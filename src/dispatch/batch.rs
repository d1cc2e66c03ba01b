//! Bounded-concurrency batch dispatcher.
//!
//! Keeps at most `max_concurrent` sends in flight. Items are admitted in
//! input order; whenever one finishes, the next pending item takes its slot.
//! The call returns only once every item has a terminal outcome, and a
//! failure never stops the rest of the batch.
//!
//! There is no timeout: a send that never returns holds its slot forever.
//!
//! CHANGELOG:
//! - 01/12/2026 - Initial implementation

use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use super::{send_one, DispatchOutcome, MessageRequest};
use crate::error::{DispatchError, Result};
use crate::recipient::Recipient;
use crate::transport::Transport;

/// Schedules sends over a shared transport.
pub struct BatchDispatcher<T: ?Sized> {
    transport: Arc<T>,
    max_concurrent: usize,
}

impl<T> BatchDispatcher<T>
where
    T: Transport + ?Sized + 'static,
{
    /// Create a dispatcher. `max_concurrent` must be at least 1.
    pub fn new(transport: Arc<T>, max_concurrent: usize) -> Result<Self> {
        if max_concurrent == 0 {
            return Err(DispatchError::InvalidConcurrency(max_concurrent));
        }
        Ok(Self {
            transport,
            max_concurrent,
        })
    }

    /// Send every item, returning outcomes in input order.
    pub async fn dispatch(&self, items: Vec<MessageRequest>) -> Vec<DispatchOutcome> {
        let span = info_span!(
            "batch",
            batch_id = %Uuid::new_v4(),
            size = items.len(),
            max_concurrent = self.max_concurrent
        );
        self.run(items).instrument(span).await
    }

    /// Like [`dispatch`](Self::dispatch), pairing each outcome with its recipient.
    pub async fn dispatch_report(&self, items: Vec<MessageRequest>) -> BatchReport {
        let recipients: Vec<Recipient> = items.iter().map(|item| item.to.clone()).collect();
        let outcomes = self.dispatch(items).await;
        BatchReport::new(recipients, outcomes)
    }

    async fn run(&self, items: Vec<MessageRequest>) -> Vec<DispatchOutcome> {
        let total = items.len();
        if total == 0 {
            return Vec::new();
        }

        let mut outcomes: Vec<Option<DispatchOutcome>> = vec![None; total];
        let mut pending = items.into_iter().enumerate();
        let mut in_flight = JoinSet::new();

        for (index, request) in pending.by_ref().take(self.max_concurrent) {
            self.admit(&mut in_flight, index, request);
        }

        while let Some(joined) = in_flight.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                // The slot is lost with the task; it shows up as None below.
                Err(e) => error!(error = %e, "send task did not complete"),
            }

            if let Some((index, request)) = pending.next() {
                self.admit(&mut in_flight, index, request);
            }
        }

        let outcomes: Vec<DispatchOutcome> = outcomes
            .into_iter()
            .map(|outcome| {
                outcome.unwrap_or_else(|| DispatchOutcome::Failed {
                    reason: "send task panicked".to_string(),
                })
            })
            .collect();

        let sent = outcomes.iter().filter(|o| o.is_sent()).count();
        info!(sent, failed = total - sent, "batch complete");
        outcomes
    }

    fn admit(
        &self,
        in_flight: &mut JoinSet<(usize, DispatchOutcome)>,
        index: usize,
        request: MessageRequest,
    ) {
        let transport = Arc::clone(&self.transport);
        in_flight.spawn(
            async move {
                let outcome = send_one(transport.as_ref(), &request).await;
                (index, outcome)
            }
            .in_current_span(),
        );
    }
}

/// One recipient's result within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItem {
    pub to: Recipient,
    pub outcome: DispatchOutcome,
}

/// Outcomes of a whole batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn new(recipients: Vec<Recipient>, outcomes: Vec<DispatchOutcome>) -> Self {
        let items = recipients
            .into_iter()
            .zip(outcomes)
            .map(|(to, outcome)| BatchItem { to, outcome })
            .collect();
        Self { items }
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn sent(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_sent()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.sent()
    }

    /// Failed recipients with their causes.
    pub fn failures(&self) -> impl Iterator<Item = (&Recipient, &str)> {
        self.items
            .iter()
            .filter_map(|i| i.outcome.failure_reason().map(|reason| (&i.to, reason)))
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}
