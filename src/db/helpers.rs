//! Database query helpers.
//!
//! These functions accept `&Connection` so the transport can keep one hot
//! connection open for the whole session.
//!
//! CHANGELOG:
//! - 01/12/2026 - Replaced analytics helpers with chat listing
//! - 01/10/2026 - Initial extraction from analytics.rs

use rusqlite::{self, params, Connection};

use super::queries;
use crate::transport::{ChatKind, ChatQuery, ChatSummary};

/// List chats matching `query`, most recently active first.
pub fn query_chats(conn: &Connection, query: &ChatQuery) -> rusqlite::Result<Vec<ChatSummary>> {
    let style = query.kind.map(|kind| match kind {
        ChatKind::Group => queries::CHAT_STYLE_GROUP,
        ChatKind::Direct => queries::CHAT_STYLE_DIRECT,
    });
    let limit = query.limit.map(i64::from).unwrap_or(-1);

    let mut stmt = conn.prepare(queries::LIST_CHATS)?;
    let rows = stmt.query_map(
        params![style, query.unread_only as i64, limit],
        |row: &rusqlite::Row| {
            let chat_id: String = row.get(0)?;
            let display_name: Option<String> = row.get(1)?;
            let style: Option<i64> = row.get(2)?;
            let last_date: Option<i64> = row.get(3)?;
            let unread_count: i64 = row.get(4)?;

            // Unnamed chats fall back to their identifier
            let display_name = display_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| chat_id.clone());

            Ok(ChatSummary {
                display_name,
                chat_id,
                is_group: style == Some(queries::CHAT_STYLE_GROUP),
                unread_count: unread_count.max(0) as u32,
                last_message_at: last_date.and_then(queries::cocoa_to_datetime),
            })
        },
    )?;

    let chats = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(chats)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal slice of the chat.db schema.
    fn fixture() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE chat (
                ROWID INTEGER PRIMARY KEY,
                chat_identifier TEXT NOT NULL,
                display_name TEXT,
                style INTEGER
            );
            CREATE TABLE message (
                ROWID INTEGER PRIMARY KEY,
                date INTEGER,
                is_from_me INTEGER,
                is_read INTEGER
            );
            CREATE TABLE chat_message_join (chat_id INTEGER, message_id INTEGER);

            INSERT INTO chat VALUES (1, '+14155551234', '', 45);
            INSERT INTO chat VALUES (2, 'chat111', 'Family', 43);
            INSERT INTO chat VALUES (3, 'friend@example.com', NULL, 45);

            -- chat 1: two unread incoming, newest overall
            INSERT INTO message VALUES (1, 757382400000000000, 0, 0);
            INSERT INTO message VALUES (2, 757382500000000000, 0, 0);
            -- chat 2: read incoming plus an outgoing message
            INSERT INTO message VALUES (3, 757382300000000000, 0, 1);
            INSERT INTO message VALUES (4, 757382350000000000, 1, 0);
            -- chat 3: oldest, one unread
            INSERT INTO message VALUES (5, 757382000000000000, 0, 0);

            INSERT INTO chat_message_join VALUES (1, 1), (1, 2), (2, 3), (2, 4), (3, 5);
            "#,
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_query_chats_orders_by_recency() {
        let conn = fixture();
        let chats = query_chats(&conn, &ChatQuery::default()).unwrap();
        let ids: Vec<&str> = chats.iter().map(|c| c.chat_id.as_str()).collect();
        assert_eq!(ids, vec!["+14155551234", "chat111", "friend@example.com"]);
    }

    #[test]
    fn test_query_chats_unread_and_names() {
        let conn = fixture();
        let chats = query_chats(&conn, &ChatQuery::default()).unwrap();

        assert_eq!(chats[0].unread_count, 2);
        assert_eq!(chats[0].display_name, "+14155551234");
        assert!(!chats[0].is_group);

        // Outgoing messages never count as unread
        assert_eq!(chats[1].unread_count, 0);
        assert_eq!(chats[1].display_name, "Family");
        assert!(chats[1].is_group);
        assert!(chats[1].last_message_at.is_some());
    }

    #[test]
    fn test_query_chats_limit() {
        let conn = fixture();
        let chats = query_chats(&conn, &ChatQuery::with_limit(1)).unwrap();
        assert_eq!(chats.len(), 1);
    }

    #[test]
    fn test_query_chats_filters() {
        let conn = fixture();

        let groups = query_chats(
            &conn,
            &ChatQuery {
                kind: Some(ChatKind::Group),
                ..ChatQuery::default()
            },
        )
        .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].chat_id, "chat111");

        let unread = query_chats(
            &conn,
            &ChatQuery {
                unread_only: true,
                ..ChatQuery::default()
            },
        )
        .unwrap();
        let ids: Vec<&str> = unread.iter().map(|c| c.chat_id.as_str()).collect();
        assert_eq!(ids, vec!["+14155551234", "friend@example.com"]);
    }
}
