//! Sputnik Channels - channel adapters for the Sputnik bot.
//!
//! Adapters turn a transport's updates into [`IncomingMessage`]s and render
//! core [`Reply`](sputnik_core::Reply)s back into the transport's markup:
//! - Telegram (Bot API long-polling)
//! - CLI (stdin/stdout, for local development)
//!
//! ```text
//! Telegram ──getUpdates──▶ TelegramChannel ──mpsc──▶ BotService ──▶ Router
//!     ▲                                                   │
//!     └───────────────── sendMessage ◀────────────────────┘
//! ```

#![warn(clippy::all)]

pub mod bot;
pub mod cli;
pub mod message;
pub mod telegram;
pub mod traits;

pub use bot::BotService;
pub use cli::CliChannel;
pub use message::IncomingMessage;
pub use telegram::TelegramChannel;
pub use traits::{Channel, ChannelError, ChannelResult};
