//! In-memory transport double shared by the unit tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;

use super::{ChatQuery, ChatSummary, Transport};
use crate::error::TransportError;
use crate::recipient::Recipient;

/// Records every call and lets a test script failures, delays and hangs.
#[derive(Default)]
pub struct RecordingTransport {
    failing: HashSet<String>,
    hanging: HashSet<String>,
    panicking: HashSet<String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    barrier: Option<Arc<Barrier>>,
    chats: Vec<ChatSummary>,
    fail_listing: bool,

    started: Mutex<Vec<String>>,
    sent: Mutex<Vec<(String, String)>>,
    queries: Mutex<Vec<ChatQuery>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    closes: AtomicUsize,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(mut self, recipient: &str) -> Self {
        self.failing.insert(recipient.to_string());
        self
    }

    pub fn hang_for(mut self, recipient: &str) -> Self {
        self.hanging.insert(recipient.to_string());
        self
    }

    pub fn panic_for(mut self, recipient: &str) -> Self {
        self.panicking.insert(recipient.to_string());
        self
    }

    pub fn delay_for(mut self, recipient: &str, delay: Duration) -> Self {
        self.delays.insert(recipient.to_string(), delay);
        self
    }

    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Every send waits until `parties` sends have started.
    pub fn with_barrier(mut self, parties: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn with_chats(mut self, chats: Vec<ChatSummary>) -> Self {
        self.chats = chats;
        self
    }

    pub fn fail_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Recipients in the order their sends started.
    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    /// Successful deliveries in completion order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<ChatQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, to: &Recipient, content: &str) -> Result<(), TransportError> {
        let key = to.as_str().to_string();
        self.started.lock().unwrap().push(key.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if self.hanging.contains(&key) {
            std::future::pending::<()>().await;
        }
        let delay = self.delays.get(&key).copied().unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking.contains(&key) {
            panic!("transport blew up for {}", key);
        }
        if self.failing.contains(&key) {
            return Err(TransportError::Other(format!("unknown recipient {}", key)));
        }

        self.sent.lock().unwrap().push((key, content.to_string()));
        Ok(())
    }

    async fn list_chats(&self, query: &ChatQuery) -> Result<Vec<ChatSummary>, TransportError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail_listing {
            return Err(TransportError::Other("database is locked".into()));
        }
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(self.chats.iter().take(limit).cloned().collect())
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn chat(display_name: &str, chat_id: &str, is_group: bool, unread_count: u32) -> ChatSummary {
    ChatSummary {
        display_name: display_name.to_string(),
        chat_id: chat_id.to_string(),
        is_group,
        unread_count,
        last_message_at: None,
    }
}
