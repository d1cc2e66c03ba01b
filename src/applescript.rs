//! AppleScript execution for sending iMessages.
//!
//! Uses osascript to communicate with Messages.app. Sends run as child
//! processes under tokio so several can be in flight at once.
//!
//! CHANGELOG:
//! - 01/12/2026 - Async send via tokio::process, chat id targets for groups
//! - 01/10/2026 - Initial implementation

use tokio::process::Command;
use tracing::debug;

use crate::error::TransportError;
use crate::recipient::{Recipient, RecipientKind};

/// Escape a string for safe inclusion in AppleScript.
///
/// CRITICAL: Order matters!
/// 1. Escape backslashes FIRST
/// 2. Then escape quotes
///
/// This prevents injection attacks where user data breaks the string context.
pub fn escape_applescript_string(s: &str) -> String {
    s.replace('\\', "\\\\") // Backslashes FIRST
        .replace('"', "\\\"") // Then quotes
}

/// Build the script that sends `message` to `recipient`.
///
/// Group chats are addressed by chat id; everything else is treated as a
/// participant of the iMessage service.
pub fn build_send_script(recipient: &Recipient, message: &str) -> String {
    let safe_msg = escape_applescript_string(message);

    match recipient.kind() {
        RecipientKind::ChatId => {
            let raw = recipient.as_str();
            // chat.db stores bare identifiers; Messages.app wants the full guid.
            let guid = if raw.contains(";+;") {
                raw.to_string()
            } else {
                format!("iMessage;+;{}", raw)
            };
            format!(
                r#"
tell application "Messages"
    set targetChat to chat id "{}"
    send "{}" to targetChat
end tell
"#,
                escape_applescript_string(&guid),
                safe_msg
            )
        }
        _ => format!(
            r#"
tell application "Messages"
    set targetService to 1st account whose service type = iMessage
    set targetBuddy to participant "{}" of targetService
    send "{}" to targetBuddy
end tell
"#,
            escape_applescript_string(recipient.as_str()),
            safe_msg
        ),
    }
}

/// Send an iMessage via Messages.app.
///
/// # Returns
/// * `Ok(())` on success
/// * `Err(TransportError::Script)` with osascript's stderr on failure
pub async fn send_imessage(recipient: &Recipient, message: &str) -> Result<(), TransportError> {
    let script = build_send_script(recipient, message);

    debug!(recipient = %recipient, "running osascript");
    let output = Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .output()
        .await?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(TransportError::Script {
            stderr: stderr.trim().to_string(),
        })
    }
}
