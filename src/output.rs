//! Output formatting and control utilities.
//!
//! CHANGELOG:
//! - 01/12/2026 - Console for the interactive session, shared chat list rendering
//! - 01/10/2026 - Initial implementation

use serde::Serialize;
use serde_json::json;
use std::fmt::Display;
use std::io::{self, Write};

use crate::transport::ChatSummary;

/// Output control settings from CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputControls {
    pub json: bool,
    pub compact: bool,
}

impl OutputControls {
    /// Render data as JSON according to output controls.
    pub fn emit<T: Serialize>(&self, data: &T) -> String {
        let rendered = if self.compact {
            serde_json::to_string(data)
        } else {
            serde_json::to_string_pretty(data)
        };
        rendered.unwrap_or_else(|e| format_error(&e.to_string()))
    }

    /// Print data to stdout according to output controls.
    pub fn print<T: Serialize>(&self, data: &T) {
        println!("{}", self.emit(data));
    }
}

/// Format error as JSON.
pub fn format_error(error: &str) -> String {
    serde_json::to_string(&json!({
        "error": error,
        "success": false
    }))
    .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, error))
}

/// Render chats the way `/list` and `chats` show them.
///
/// Unread counts are appended only when non-zero; group chats get their
/// identifier on a second line so it can be pasted into `/to`.
pub fn render_chat_list(chats: &[ChatSummary]) -> String {
    if chats.is_empty() {
        return "  No chats found\n".to_string();
    }

    let mut out = String::new();
    for chat in chats {
        let unread = if chat.unread_count > 0 {
            format!(" ({} unread)", chat.unread_count)
        } else {
            String::new()
        };
        out.push_str(&format!("  • {}{}\n", chat.display_name, unread));
        if chat.is_group {
            out.push_str(&format!("    ChatID: {}\n", chat.chat_id));
        }
    }
    out
}

/// Line-oriented user-facing output with a separate error stream.
///
/// Write failures on a terminal are not actionable, so they are dropped.
pub struct Console<O, E> {
    out: O,
    err: E,
}

impl Console<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Console<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn say(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{}", text);
    }

    /// Report a failure with the `❌` indicator on the error stream.
    pub fn error(&mut self, text: impl Display) {
        let _ = writeln!(self.err, "❌ {}", text);
    }

    pub fn prompt(&mut self) {
        let _ = self.out.write_all(b"> ");
        let _ = self.out.flush();
    }
}

#[cfg(test)]
impl Console<Vec<u8>, Vec<u8>> {
    pub fn buffered() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn out_text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    pub fn err_text(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }
}
