//! Telegram channel adapter.
//!
//! Talks to the Telegram Bot API directly over HTTP: long-polls `getUpdates`
//! for incoming text messages and sends replies through `sendMessage`,
//! rendering core keyboards as `ReplyKeyboardMarkup`.

use crate::message::IncomingMessage;
use crate::traits::{Channel, ChannelError, ChannelResult};
use async_trait::async_trait;
use sputnik_common::config::TelegramConfig;
use sputnik_core::{Keyboard, Reply};

/// Telegram caps message text at 4096 characters.
const MAX_MESSAGE_LEN: usize = 4096;

/// Telegram channel - long-polls the Bot API for updates.
pub struct TelegramChannel {
    bot_token: String,
    client: reqwest::Client,
    poll_timeout_secs: u64,
    error_backoff_secs: u64,
}

impl TelegramChannel {
    /// Create a new Telegram channel.
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot_token: config.bot_token.clone(),
            client: reqwest::Client::new(),
            poll_timeout_secs: config.poll_timeout_secs,
            error_backoff_secs: config.error_backoff_secs,
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{method}", self.bot_token)
    }

    /// Send a single message chunk, attaching the keyboard when given.
    async fn send_single_chunk(
        &self,
        chat_id: &str,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> anyhow::Result<()> {
        let mut body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        if let Some(keyboard) = keyboard {
            body["reply_markup"] = render_keyboard(keyboard);
        }

        let resp = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let err = resp.text().await.unwrap_or_default();
            anyhow::bail!("Telegram sendMessage failed: {err}");
        }

        Ok(())
    }

    async fn backoff(&self) {
        tokio::time::sleep(std::time::Duration::from_secs(self.error_backoff_secs)).await;
    }
}

/// Render a core keyboard as Telegram `ReplyKeyboardMarkup` JSON.
fn render_keyboard(keyboard: &Keyboard) -> serde_json::Value {
    serde_json::json!({
        "keyboard": keyboard.rows,
        "resize_keyboard": true,
    })
}

/// Split a message into chunks that fit within Telegram's limit.
fn split_message(message: &str, max_len: usize) -> Vec<String> {
    if message.len() <= max_len {
        return vec![message.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = message;

    while !remaining.is_empty() {
        if remaining.len() <= max_len {
            chunks.push(remaining.to_string());
            break;
        }

        let mut end = max_len;
        while !remaining.is_char_boundary(end) {
            end -= 1;
        }
        let chunk = &remaining[..end];
        let split_pos = chunk
            .rfind("\n\n")
            .or_else(|| chunk.rfind('\n'))
            .or_else(|| chunk.rfind(". "))
            .or_else(|| chunk.rfind(' '))
            .unwrap_or(end);

        let actual_split = if split_pos == 0 { end } else { split_pos };

        chunks.push(remaining[..actual_split].to_string());
        remaining = remaining[actual_split..].trim_start();
    }

    chunks
}

/// Extract an [`IncomingMessage`] from one `getUpdates` entry.
///
/// Only plain text messages are handled; anything else is skipped.
fn parse_update(update: &serde_json::Value) -> Option<IncomingMessage> {
    let message = update.get("message")?;
    let text = message.get("text").and_then(|t| t.as_str())?;

    let chat_id = message
        .get("chat")
        .and_then(|c| c.get("id"))
        .and_then(serde_json::Value::as_i64)?
        .to_string();

    let from = message.get("from");
    let user_id = from
        .and_then(|f| f.get("id"))
        .and_then(serde_json::Value::as_i64)
        .map_or_else(|| chat_id.clone(), |id| id.to_string());
    let first_name = from
        .and_then(|f| f.get("first_name"))
        .and_then(|n| n.as_str())
        .map(String::from);

    Some(IncomingMessage::now(chat_id, user_id, first_name, text))
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn init(&mut self) -> ChannelResult<()> {
        // Verify bot token by calling getMe
        let resp = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map_err(|e| ChannelError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let err = resp.text().await.unwrap_or_default();
            return Err(ChannelError::Auth(format!("Invalid bot token: {err}")));
        }

        tracing::info!("Telegram channel initialized");
        Ok(())
    }

    async fn send(&self, chat_id: &str, reply: Reply) -> ChannelResult<String> {
        let chunks = split_message(&reply.text, MAX_MESSAGE_LEN);
        let last = chunks.len() - 1;

        for (i, chunk) in chunks.iter().enumerate() {
            // The keyboard rides on the final chunk so it stays on screen
            let keyboard = if i == last { reply.keyboard.as_ref() } else { None };
            self.send_single_chunk(chat_id, chunk, keyboard)
                .await
                .map_err(|e| ChannelError::SendFailed(e.to_string()))?;
        }

        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn listen<F>(&self, callback: F) -> ChannelResult<()>
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        let mut offset: i64 = 0;

        tracing::info!("Telegram channel listening for messages...");

        loop {
            let body = serde_json::json!({
                "offset": offset,
                "timeout": self.poll_timeout_secs,
                "allowed_updates": ["message"],
            });

            let resp = match self
                .client
                .post(self.api_url("getUpdates"))
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Telegram poll error: {e}");
                    self.backoff().await;
                    continue;
                }
            };

            let data: serde_json::Value = match resp.json().await {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("Telegram parse error: {e}");
                    self.backoff().await;
                    continue;
                }
            };

            if let Some(results) = data.get("result").and_then(serde_json::Value::as_array) {
                for update in results {
                    if let Some(uid) = update.get("update_id").and_then(serde_json::Value::as_i64) {
                        offset = uid + 1;
                    }

                    let Some(msg) = parse_update(update) else {
                        continue;
                    };

                    tracing::info!(
                        message_id = %msg.id,
                        chat_id = %msg.chat_id,
                        user_id = %msg.user_id,
                        text = %msg.text,
                        "Telegram message received"
                    );

                    callback(msg);
                }
            }
        }
    }

    async fn health_check(&self) -> ChannelResult<()> {
        let resp = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map_err(|e| ChannelError::Connection(e.to_string()))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ChannelError::NotReady)
        }
    }

    async fn shutdown(&self) -> ChannelResult<()> {
        tracing::info!("Telegram channel shutting down");
        Ok(())
    }
}
