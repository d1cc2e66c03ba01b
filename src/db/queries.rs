//! SQL queries for Messages.db.
//!
//! CHANGELOG:
//! - 01/12/2026 - Chat listing with unread counts and style filter
//! - 01/10/2026 - Initial stub with query constants

/// `chat.style` value for group conversations.
pub const CHAT_STYLE_GROUP: i64 = 43;

/// `chat.style` value for one-to-one conversations.
pub const CHAT_STYLE_DIRECT: i64 = 45;

/// Query to list chats, most recently active first.
///
/// Params:
/// 1. style filter (NULL for any)
/// 2. 1 to keep only chats with unread messages, 0 otherwise
/// 3. row limit (-1 for no limit)
pub const LIST_CHATS: &str = r#"
SELECT chat_identifier, display_name, style, last_date, unread_count
FROM (
    SELECT
        c.chat_identifier,
        c.display_name,
        c.style,
        (SELECT MAX(m.date) FROM message m
         JOIN chat_message_join cmj ON m.ROWID = cmj.message_id
         WHERE cmj.chat_id = c.ROWID) AS last_date,
        (SELECT COUNT(*) FROM message m
         JOIN chat_message_join cmj ON m.ROWID = cmj.message_id
         WHERE cmj.chat_id = c.ROWID
           AND m.is_from_me = 0
           AND m.is_read = 0) AS unread_count
    FROM chat c
    WHERE ?1 IS NULL OR c.style = ?1
)
WHERE ?2 = 0 OR unread_count > 0
ORDER BY last_date DESC
LIMIT ?3
"#;

// ============================================================================
// Timestamp Helpers
// ============================================================================

/// Seconds between the Unix epoch and the Cocoa epoch (2001-01-01).
pub const COCOA_EPOCH_OFFSET: i64 = 978_307_200;

/// Convert Cocoa nanoseconds timestamp to Unix timestamp.
pub fn cocoa_to_unix(cocoa_ns: i64) -> i64 {
    (cocoa_ns / 1_000_000_000) + COCOA_EPOCH_OFFSET
}

/// Convert a Cocoa nanoseconds timestamp to a UTC datetime.
///
/// Zero means "never" in chat.db and maps to `None`.
pub fn cocoa_to_datetime(cocoa_ns: i64) -> Option<chrono::DateTime<chrono::Utc>> {
    if cocoa_ns == 0 {
        return None;
    }
    chrono::DateTime::from_timestamp(cocoa_to_unix(cocoa_ns), 0)
}
