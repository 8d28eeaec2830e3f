//! Channel traits for implementing channel adapters.

use crate::message::IncomingMessage;
use async_trait::async_trait;
use sputnik_core::Reply;

/// Result type for channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Channel error type.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Message send failed: {0}")]
    SendFailed(String),

    #[error("Channel not ready")]
    NotReady,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Channel adapter trait.
///
/// Implement this trait to add support for a new messaging transport.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Get the channel name.
    fn name(&self) -> &'static str;

    /// Initialize the channel (connect, authenticate, etc.).
    async fn init(&mut self) -> ChannelResult<()>;

    /// Send a reply to the given chat.
    async fn send(&self, chat_id: &str, reply: Reply) -> ChannelResult<String>;

    /// Start listening for incoming messages, invoking the callback per update.
    async fn listen<F>(&self, callback: F) -> ChannelResult<()>
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static;

    /// Check if the channel is healthy.
    async fn health_check(&self) -> ChannelResult<()>;

    /// Shutdown the channel gracefully.
    async fn shutdown(&self) -> ChannelResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_error_display() {
        assert_eq!(
            ChannelError::Auth("bad token".into()).to_string(),
            "Authentication failed: bad token"
        );
        assert_eq!(ChannelError::NotReady.to_string(), "Channel not ready");
    }
}
