//! Interactive session.
//!
//! Reads one line at a time and turns it into a send, a chat listing, or a
//! change of the default recipient. A line is fully handled (including any
//! send it triggers) before the next one is read. Failures are reported and
//! the session keeps going; only `/quit`, end of input, or an interrupt
//! close it, and each of those releases the transport.
//!
//! CHANGELOG:
//! - 01/12/2026 - Initial implementation

use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::dispatch::{send_one, DispatchOutcome, MessageRequest};
use crate::error::SessionError;
use crate::output::{render_chat_list, Console};
use crate::recipient::Recipient;
use crate::transport::{ChatQuery, Transport};

pub mod directive;

pub use directive::{help_text, parse_line, Directive, DirectiveKind, Input};

/// Chats shown by `/list`.
pub const LIST_LIMIT: u32 = 10;

/// State carried between lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Target for plain message lines. Last `/to` wins.
    pub default_recipient: Option<Recipient>,
}

/// What the caller should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Closed,
}

pub struct Session<T: ?Sized, O, E> {
    transport: Arc<T>,
    state: SessionState,
    console: Console<O, E>,
    closed: bool,
}

impl<T, O, E> Session<T, O, E>
where
    T: Transport + ?Sized,
    O: Write,
    E: Write,
{
    pub fn new(transport: Arc<T>, console: Console<O, E>) -> Self {
        Self {
            transport,
            state: SessionState::default(),
            console,
            closed: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn console(&self) -> &Console<O, E> {
        &self.console
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drive the session until `/quit`, end of input, or `interrupt` fires.
    ///
    /// `interrupt` is only watched while waiting for input. A line that is
    /// not valid UTF-8 is reported and skipped; a failed read ends the
    /// session and is returned after the transport is released.
    pub async fn run<R, S>(&mut self, mut input: R, interrupt: S) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        self.console.say("🤖 Interactive Texting Bot");
        self.console.say("Type /help for commands\n");

        let mut buf = Vec::new();
        let mut result = Ok(());
        tokio::pin!(interrupt);

        while !self.closed {
            self.console.prompt();
            buf.clear();

            let read = tokio::select! {
                read = input.read_until(b'\n', &mut buf) => read,
                _ = &mut interrupt => {
                    info!("interrupted");
                    break;
                }
            };

            match read {
                Ok(0) => {
                    debug!("end of input");
                    break;
                }
                Ok(_) => match std::str::from_utf8(&buf) {
                    Ok(line) => {
                        let line = line.strip_suffix('\n').unwrap_or(line);
                        let line = line.strip_suffix('\r').unwrap_or(line);
                        self.handle_line(line).await;
                    }
                    Err(_) => {
                        debug!(bytes = buf.len(), "skipping non-UTF-8 line");
                        self.console.error(SessionError::InvalidUtf8);
                    }
                },
                Err(e) => {
                    self.console.error(format!("Error reading input: {}", e));
                    result = Err(e);
                    break;
                }
            }
        }

        self.shutdown().await;
        result
    }

    /// Handle one line. Does nothing once the session is closed.
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        if self.closed {
            return Flow::Closed;
        }

        match parse_line(line) {
            Ok(Input::Empty) => {}
            Ok(Input::Message(text)) => match self.state.default_recipient.clone() {
                Some(to) => self.send(MessageRequest::new(to, text)).await,
                None => self.console.error(SessionError::NoDefaultRecipient),
            },
            Ok(Input::Directive(directive)) => return self.run_directive(directive).await,
            Err(e @ SessionError::UnknownCommand(_)) => {
                self.console.error(e);
                self.console.say("Type /help for available commands");
            }
            Err(e) => self.console.error(e),
        }

        Flow::Continue
    }

    async fn run_directive(&mut self, directive: Directive) -> Flow {
        debug!(directive = ?directive.kind(), "directive");

        match directive {
            Directive::Help => self.console.say(help_text()),
            Directive::Quit => {
                self.shutdown().await;
                return Flow::Closed;
            }
            Directive::To(to) => {
                self.console.say(format!("✅ Default recipient set to: {}", to));
                self.state.default_recipient = Some(to);
            }
            Directive::Send(request) => self.send(request).await,
            Directive::List => self.list_chats().await,
        }

        Flow::Continue
    }

    async fn send(&mut self, request: MessageRequest) {
        self.console.say(format!("📤 Sending to {}...", request.to));
        match send_one(self.transport.as_ref(), &request).await {
            DispatchOutcome::Sent => self.console.say("✅ Message sent!"),
            DispatchOutcome::Failed { reason } => {
                self.console.error(format!("Error sending message: {}", reason))
            }
        }
    }

    async fn list_chats(&mut self) {
        self.console.say("\n📋 Recent Chats:");
        match self
            .transport
            .list_chats(&ChatQuery::with_limit(LIST_LIMIT))
            .await
        {
            Ok(chats) => self.console.say(render_chat_list(&chats)),
            Err(e) => self.console.error(format!("Error listing chats: {}", e)),
        }
    }

    /// Release the transport exactly once and enter the closed state.
    async fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        self.console.say("\n👋 Goodbye!");
        if let Err(e) = self.transport.close().await {
            self.console.error(format!("Error closing transport: {}", e));
        }
    }
}
