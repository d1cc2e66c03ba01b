//! Line classification for the interactive session.
//!
//! A line is either empty, a slash directive, or a plain message. The set
//! of directives is closed: [`DirectiveKind::ALL`] lists every one of them
//! and the help text is generated from it.
//!
//! CHANGELOG:
//! - 01/12/2026 - Initial implementation

use crate::dispatch::MessageRequest;
use crate::error::SessionError;
use crate::recipient::Recipient;

/// Every directive the session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Send,
    To,
    List,
    Help,
    Quit,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 5] = [
        DirectiveKind::Send,
        DirectiveKind::To,
        DirectiveKind::List,
        DirectiveKind::Help,
        DirectiveKind::Quit,
    ];

    /// Accepted spellings, primary first.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            DirectiveKind::Send => &["/send"],
            DirectiveKind::To => &["/to"],
            DirectiveKind::List => &["/list"],
            DirectiveKind::Help => &["/help"],
            DirectiveKind::Quit => &["/quit", "/exit"],
        }
    }

    /// Case-insensitive lookup of a `/command` token.
    pub fn from_command(command: &str) -> Option<Self> {
        let command = command.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.names().contains(&command.as_str()))
    }

    pub fn usage(self) -> &'static str {
        match self {
            DirectiveKind::Send => "/send <recipient> <message>",
            DirectiveKind::To => "/to <recipient>",
            DirectiveKind::List => "/list",
            DirectiveKind::Help => "/help",
            DirectiveKind::Quit => "/quit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DirectiveKind::Send => "Send a message to a recipient",
            DirectiveKind::To => "Set default recipient for quick messages",
            DirectiveKind::List => "List your recent chats",
            DirectiveKind::Help => "Show this help message",
            DirectiveKind::Quit => "Exit the bot",
        }
    }

    /// Minimum number of arguments after the command token.
    fn min_args(self) -> usize {
        match self {
            DirectiveKind::Send => 2,
            DirectiveKind::To => 1,
            DirectiveKind::List | DirectiveKind::Help | DirectiveKind::Quit => 0,
        }
    }
}

/// A parsed directive with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Send(MessageRequest),
    To(Recipient),
    List,
    Help,
    Quit,
}

impl Directive {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::Send(_) => DirectiveKind::Send,
            Directive::To(_) => DirectiveKind::To,
            Directive::List => DirectiveKind::List,
            Directive::Help => DirectiveKind::Help,
            Directive::Quit => DirectiveKind::Quit,
        }
    }
}

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Directive(Directive),
    Message(String),
}

/// Classify a raw input line.
pub fn parse_line(line: &str) -> Result<Input, SessionError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Input::Empty);
    }
    if !trimmed.starts_with('/') {
        return Ok(Input::Message(trimmed.to_string()));
    }

    let mut tokens = trimmed.split_whitespace();
    // Non-empty after trim, so there is a first token
    let command = tokens.next().unwrap_or_default();
    let args: Vec<&str> = tokens.collect();

    let kind = DirectiveKind::from_command(command)
        .ok_or_else(|| SessionError::UnknownCommand(command.to_lowercase()))?;
    if args.len() < kind.min_args() {
        return Err(SessionError::Usage(kind));
    }

    let directive = match kind {
        DirectiveKind::Send => {
            let to = resolve_arg(kind, args[0])?;
            Directive::Send(MessageRequest::new(to, args[1..].join(" ")))
        }
        DirectiveKind::To => Directive::To(resolve_arg(kind, args[0])?),
        DirectiveKind::List => Directive::List,
        DirectiveKind::Help => Directive::Help,
        DirectiveKind::Quit => Directive::Quit,
    };
    Ok(Input::Directive(directive))
}

/// Whitespace-split tokens are never blank, so a rejected token means bad usage.
fn resolve_arg(kind: DirectiveKind, token: &str) -> Result<Recipient, SessionError> {
    Recipient::resolve(token).map_err(|_| SessionError::Usage(kind))
}

/// Help text listing every directive.
pub fn help_text() -> String {
    let mut text = String::from("\n📚 Available Commands:\n");
    for kind in DirectiveKind::ALL {
        text.push_str(&format!("  {:<29}- {}\n", kind.usage(), kind.description()));
    }
    text.push_str("\nWhen a default recipient is set, just type your message directly.\n");
    text.push_str("Examples:\n");
    text.push_str("  /to +1234567890\n");
    text.push_str("  Hello there!                 (sends to +1234567890)\n");
    text.push_str("  /send user@example.com Hi!   (sends to user@example.com)\n");
    text
}
