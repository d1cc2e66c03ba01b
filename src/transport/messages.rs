//! Messages.app transport for macOS.
//!
//! Sends go through osascript; chat listing reads chat.db directly.
//!
//! CHANGELOG:
//! - 01/12/2026 - Initial implementation

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

use super::{ChatQuery, ChatSummary, Transport};
use crate::applescript;
use crate::db::{connection::open_db, helpers};
use crate::error::TransportError;
use crate::recipient::Recipient;

/// Transport backed by Messages.app and its SQLite store.
pub struct MessagesTransport {
    db_path: PathBuf,
    conn: Mutex<Option<Connection>>, // Opened on first list, dropped on close
    closed: AtomicBool,
}

impl MessagesTransport {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            conn: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<(), TransportError> {
        if self.closed.load(Ordering::SeqCst) {
            Err(TransportError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Transport for MessagesTransport {
    async fn send(&self, to: &Recipient, content: &str) -> Result<(), TransportError> {
        self.ensure_open()?;
        applescript::send_imessage(to, content).await
    }

    async fn list_chats(&self, query: &ChatQuery) -> Result<Vec<ChatSummary>, TransportError> {
        self.ensure_open()?;

        let mut guard = self
            .conn
            .lock()
            .map_err(|_| TransportError::Other("database connection lock poisoned".into()))?;

        let conn = match guard.take() {
            Some(conn) => conn,
            None => {
                debug!(path = ?self.db_path, "opening Messages database");
                open_db(&self.db_path)?
            }
        };
        let result = helpers::query_chats(&conn, query);
        *guard = Some(conn);

        Ok(result?)
    }

    async fn close(&self) -> Result<(), TransportError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let conn = self
            .conn
            .lock()
            .map_err(|_| TransportError::Other("database connection lock poisoned".into()))?
            .take();
        if let Some(conn) = conn {
            conn.close().map_err(|(_, e)| TransportError::Database(e))?;
        }

        info!("transport closed");
        Ok(())
    }
}
