//! Interactive mode over stdin.
//!
//! CHANGELOG:
//! - 01/12/2026 - Initial implementation

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::warn;

use crate::output::Console;
use crate::session::Session;
use crate::transport::Transport;

/// Run the session until `/quit`, end of input, or Ctrl+C.
///
/// A failed read of stdin is an error; the session has already closed the
/// transport by then.
pub async fn run<T>(transport: &Arc<T>) -> Result<()>
where
    T: Transport + ?Sized,
{
    let mut session = Session::new(Arc::clone(transport), Console::stdio());
    let stdin = BufReader::new(tokio::io::stdin());

    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // Without a handler, Ctrl+C falls back to the default and kills us
            warn!(error = %e, "could not listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    session
        .run(stdin, interrupt)
        .await
        .context("Error reading input")
}
