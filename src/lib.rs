//! imessage-dispatch library
//!
//! Bounded-concurrency bulk sending and an interactive session on top of a
//! pluggable messaging transport. The binary wires these to Messages.app.
//!
//! CHANGELOG:
//! - 01/12/2026 - Dispatcher, session and transport modules
//! - 01/10/2026 - Initial library structure

pub mod applescript;
pub mod commands;
pub mod config;
pub mod db;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod recipient;
pub mod session;
pub mod transport;

pub use dispatch::{send_one, BatchDispatcher, BatchReport, DispatchOutcome, MessageRequest};
pub use error::{DispatchError, SessionError, TransportError};
pub use recipient::Recipient;
pub use session::{Session, SessionState};
pub use transport::{ChatKind, ChatQuery, ChatSummary, MessagesTransport, Transport};
