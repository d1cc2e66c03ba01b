//! SQLite connection management for Messages.db.
//!
//! CHANGELOG:
//! - 01/12/2026 - Path comes from Config instead of being hardcoded
//! - 01/10/2026 - Initial stub

use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Default Messages.db path.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Library")
        .join("Messages")
        .join("chat.db")
}

/// Open a read-only connection to Messages.db.
pub fn open_db(db_path: &Path) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(
        db_path,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}
