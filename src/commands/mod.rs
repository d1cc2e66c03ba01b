//! Command implementations.
//!
//! Each command takes the transport owned by `main`. [`run_and_close`] wraps
//! whichever one runs so the transport is released on every exit path.
//!
//! CHANGELOG:
//! - 01/12/2026 - Bulk, send, chats and interactive commands; run_and_close
//! - 01/10/2026 - Initial module structure

use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

use crate::transport::Transport;

pub mod chats;
pub mod interactive;
pub mod messaging;

/// Await `command`, then close `transport` whatever the outcome.
///
/// A close failure is logged and never replaces the command's own result.
/// Closing after the session already did so on `/quit` is a no-op.
pub async fn run_and_close<T, F>(transport: &Arc<T>, command: F) -> Result<()>
where
    T: Transport + ?Sized,
    F: Future<Output = Result<()>>,
{
    let result = command.await;

    if let Err(e) = transport.close().await {
        warn!(error = %e, "failed to close transport");
    }

    result
}
