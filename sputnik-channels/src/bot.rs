//! The bot service: per-chat sessions around the core router.
//!
//! Updates are consumed **sequentially** from one queue, so no two updates
//! for the same chat are ever in flight and the settings flow always sees
//! messages in order.

use crate::message::IncomingMessage;
use crate::traits::Channel;
use sputnik_core::{Router, Session};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Routes incoming messages through the core and sends replies back.
pub struct BotService {
    router: Router,
    /// Per-chat conversation state, keyed by chat ID.
    sessions: HashMap<String, Session>,
}

impl BotService {
    /// Create a new bot service.
    pub fn new(router: Router) -> Self {
        Self {
            router,
            sessions: HashMap::new(),
        }
    }

    /// Number of chats with a session.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Process one update and send the reply, if any, through the channel.
    ///
    /// Send failures are logged and swallowed so one bad delivery cannot
    /// stall the poll loop.
    pub async fn process<C: Channel>(&mut self, channel: &C, message: IncomingMessage) {
        let session = self.sessions.entry(message.chat_id.clone()).or_default();

        let reply = self
            .router
            .handle(&message.text, message.first_name.as_deref(), session)
            .await;

        match reply {
            Some(reply) => {
                if let Err(e) = channel.send(&message.chat_id, reply).await {
                    tracing::error!(
                        chat_id = %message.chat_id,
                        error = %e,
                        "Failed to send reply"
                    );
                }
            }
            None => {
                tracing::debug!(chat_id = %message.chat_id, "Message ignored");
            }
        }
    }

    /// Start a background processor that drains messages from a channel.
    pub fn spawn_processor<C>(
        mut service: Self,
        channel: Arc<C>,
        mut rx: mpsc::Receiver<IncomingMessage>,
    ) -> tokio::task::JoinHandle<()>
    where
        C: Channel + 'static,
    {
        tokio::spawn(async move {
            tracing::info!("Bot processor started");

            while let Some(message) = rx.recv().await {
                service.process(channel.as_ref(), message).await;
            }

            tracing::info!("Bot processor stopped");
        })
    }
}
