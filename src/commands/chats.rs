//! Chat listing command.
//!
//! CHANGELOG:
//! - 01/12/2026 - Replaced group listing with transport-backed chat listing
//! - 01/10/2026 - Implemented list groups command

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::output::{render_chat_list, OutputControls};
use crate::transport::{ChatQuery, Transport};

/// List recent chats.
pub async fn list<T>(transport: &Arc<T>, query: &ChatQuery, output: &OutputControls) -> Result<()>
where
    T: Transport + ?Sized,
{
    let chats = transport
        .list_chats(query)
        .await
        .context("Error listing chats")?;

    if output.json {
        output.print(&chats);
    } else {
        println!("📋 Recent Chats:");
        print!("{}", render_chat_list(&chats));
    }

    Ok(())
}
