//! Messaging commands: send, bulk.
//!
//! CHANGELOG:
//! - 01/12/2026 - Bulk send through the batch dispatcher
//! - 01/10/2026 - Implemented send with AppleScript

use anyhow::{anyhow, bail, Context, Result};
use serde_json::json;
use std::sync::Arc;

use crate::dispatch::{send_one, BatchDispatcher, DispatchOutcome, MessageRequest};
use crate::output::OutputControls;
use crate::transport::Transport;

/// Send one message to one recipient.
pub async fn send<T>(
    transport: &Arc<T>,
    recipient: &str,
    message: &str,
    output: &OutputControls,
) -> Result<()>
where
    T: Transport + ?Sized,
{
    let request = MessageRequest::parse(recipient, message).context("Invalid recipient")?;

    if !output.json {
        println!("📤 Sending message to {}...", request.to);
        println!("📝 Message: {}", request.content);
    }

    match send_one(transport.as_ref(), &request).await {
        DispatchOutcome::Sent => {
            if output.json {
                output.print(&json!({
                    "success": true,
                    "recipient": request.to,
                    "message": request.content
                }));
            } else {
                println!("✅ Message sent successfully!");
            }
            Ok(())
        }
        DispatchOutcome::Failed { reason } => {
            if output.json {
                output.print(&json!({
                    "success": false,
                    "recipient": request.to,
                    "error": reason
                }));
            }
            Err(anyhow!("Error sending message: {}", reason))
        }
    }
}

/// Send the same message to every recipient, `max_concurrent` at a time.
///
/// Every recipient is attempted; the command fails afterwards if any
/// single send failed.
pub async fn bulk<T>(
    transport: &Arc<T>,
    max_concurrent: usize,
    message: &str,
    recipients: &[String],
    output: &OutputControls,
) -> Result<()>
where
    T: Transport + ?Sized + 'static,
{
    let items = recipients
        .iter()
        .map(|recipient| MessageRequest::parse(recipient, message))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid recipient")?;

    let dispatcher = BatchDispatcher::new(Arc::clone(transport), max_concurrent)?;

    if !output.json {
        println!("📤 Bulk Message Sender");
        println!("📝 Message: {}", message);
        println!("👥 Recipients: {}", items.len());
        println!();
        println!("Sending messages...\n");
    }

    let report = dispatcher.dispatch_report(items).await;

    if output.json {
        output.print(&json!({
            "success": report.is_success(),
            "total": report.total(),
            "sent": report.sent(),
            "failed": report.failed(),
            "results": &report.items,
        }));
    } else {
        for item in &report.items {
            match &item.outcome {
                DispatchOutcome::Sent => println!("  ✅ {}", item.to),
                DispatchOutcome::Failed { reason } => println!("  ❌ {}: {}", item.to, reason),
            }
        }
        println!();
        if report.is_success() {
            println!("✅ All messages sent successfully!");
        }
        println!("📊 Total sent: {}/{}", report.sent(), report.total());
    }

    if !report.is_success() {
        bail!(
            "Error sending messages: {} of {} failed",
            report.failed(),
            report.total()
        );
    }
    Ok(())
}
