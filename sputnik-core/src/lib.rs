//! Sputnik Core - command dispatch and the settings conversation state machine.
//!
//! The core is transport-neutral: it consumes one line of user text plus the
//! chat's [`Session`], and produces an optional [`Reply`] (text and keyboard).
//! Channel adapters own delivery; providers own the upstream calls.
//!
//! ```text
//! text ──▶ Router ──▶ command? ──▶ greeting / help / cancel
//!             │
//!             ├──▶ in settings flow? ──▶ SettingsFlow transition
//!             │
//!             └──▶ classify ──▶ fact / weather / exchange / settings / help
//! ```

#![warn(clippy::all)]

pub mod intent;
pub mod reply;
pub mod router;
pub mod session;

pub use intent::{classify, parse_command, Command, Intent};
pub use reply::{Keyboard, Reply};
pub use router::Router;
pub use session::{Session, SessionSettings, SessionState, SettingsField};
