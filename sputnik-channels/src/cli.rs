//! CLI channel adapter for interactive terminal sessions.
//!
//! Provides a simple stdin/stdout based channel for local testing and
//! development. Keyboards are rendered as bracketed label rows.

use crate::message::IncomingMessage;
use crate::traits::{Channel, ChannelResult};
use async_trait::async_trait;
use sputnik_core::Reply;
use tokio::io::{self, AsyncBufReadExt, BufReader};

/// CLI channel - stdin/stdout, always available, zero deps.
pub struct CliChannel;

impl CliChannel {
    /// Create a new CLI channel.
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &'static str {
        "cli"
    }

    async fn init(&mut self) -> ChannelResult<()> {
        Ok(())
    }

    async fn send(&self, _chat_id: &str, reply: Reply) -> ChannelResult<String> {
        println!("{}", reply.text);
        if let Some(keyboard) = reply.keyboard {
            for row in keyboard.rows {
                let labels: Vec<String> = row.into_iter().map(|l| format!("[{l}]")).collect();
                println!("{}", labels.join(" "));
            }
        }
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn listen<F>(&self, callback: F) -> ChannelResult<()>
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        let stdin = io::stdin();
        let reader = BufReader::new(stdin);
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if line == "/quit" || line == "/exit" {
                break;
            }

            callback(IncomingMessage::now("cli", "user", None, line));
        }
        Ok(())
    }

    async fn health_check(&self) -> ChannelResult<()> {
        Ok(())
    }

    async fn shutdown(&self) -> ChannelResult<()> {
        Ok(())
    }
}
