//! Intent classification for inbound text.

/// User intent derived from one inbound message. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Fact,
    Weather,
    Exchange,
    Settings,
    Help,
    Unknown,
}

impl Intent {
    /// Get the intent as a string, for logging.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fact => "fact",
            Self::Weather => "weather",
            Self::Exchange => "exchange",
            Self::Settings => "settings",
            Self::Help => "help",
            Self::Unknown => "unknown",
        }
    }
}

/// Trigger words in precedence order; the first substring match wins.
const TRIGGERS: &[(&str, Intent)] = &[
    ("факт", Intent::Fact),
    ("погода", Intent::Weather),
    ("курс", Intent::Exchange),
    ("настройки", Intent::Settings),
    ("помощь", Intent::Help),
];

/// Classify one message into an [`Intent`].
///
/// Matching is case-insensitive over the whole message (Unicode lowercasing,
/// so Cyrillic input folds correctly). No trigger → [`Intent::Unknown`].
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    for (trigger, intent) in TRIGGERS {
        if lowered.contains(trigger) {
            return *intent;
        }
    }
    Intent::Unknown
}

/// Slash commands delivered by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Cancel,
}

/// Parse a leading slash command, if any.
///
/// A `@botname` suffix is stripped, as Telegram appends one in group chats.
/// Unknown commands return `None` and are ignored upstream.
pub fn parse_command(text: &str) -> Option<Command> {
    let first = text.trim().split_whitespace().next()?;
    if !first.starts_with('/') {
        return None;
    }

    let command = first.split('@').next().unwrap_or(first);
    match command {
        "/start" => Some(Command::Start),
        "/help" => Some(Command::Help),
        "/cancel" => Some(Command::Cancel),
        _ => None,
    }
}
