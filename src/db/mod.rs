//! Database module for SQLite access to Messages.db.
//!
//! CHANGELOG:
//! - 01/12/2026 - Trimmed to chat listing
//! - 01/10/2026 - Initial module structure

pub mod connection;
pub mod helpers;
pub mod queries;
