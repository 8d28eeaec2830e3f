//! Sputnik Common - shared configuration and logging.
//!
//! Every Sputnik crate pulls its settings from the single config file loaded
//! here and logs through the subscriber installed by [`logging::init_logging`].

#![warn(clippy::all)]

pub mod config;
pub mod logging;

pub use config::{Config, ObservabilityConfig, ProvidersConfig, TelegramConfig};
pub use logging::init_logging;
