//! `programSubscribe` account-change feed.
//!
//! Subscribes to every account owned by one program and yields each changed
//! account as a [`KeyedAccount`]. A dropped socket is re-established after the
//! reconnect delay on the next call.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use solana_account_decoder::UiAccount;
use solana_sdk::{account::Account, pubkey::Pubkey};
use std::str::FromStr;
use tokio::time::{sleep, Duration};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::AccountChangeSource;
use crate::config::CommitmentLevel;
use crate::types::KeyedAccount;
use crate::utils::error::{MetaIndexerError, Result};
use crate::utils::logging::{self, redact_endpoint, LogLevel};

/// Live account changes for one program over the RPC pubsub websocket.
///
/// # Example
///
/// ```no_run
/// use metaplex_meta_indexer::config::{CommitmentLevel, METAPLEX_PROGRAM_ID};
/// use metaplex_meta_indexer::streams::websocket::WebSocketSource;
///
/// let source = WebSocketSource::new(
///     "wss://api.metaplex.solana.com/",
///     METAPLEX_PROGRAM_ID,
///     CommitmentLevel::Confirmed,
///     5,
/// );
/// ```
pub struct WebSocketSource {
    ws_url: String,
    program_id: Pubkey,
    commitment: CommitmentLevel,
    reconnect_delay_secs: u64,
    name: String,
    state: WebSocketState,
}

enum WebSocketState {
    Disconnected,
    Connected {
        subscription_id: u64,
        receiver: tokio::sync::mpsc::UnboundedReceiver<KeyedAccount>,
    },
}

#[derive(Debug, Deserialize)]
struct ProgramNotification {
    params: ProgramNotificationParams,
}

#[derive(Debug, Deserialize)]
struct ProgramNotificationParams {
    result: ProgramNotificationResult,
}

#[derive(Debug, Deserialize)]
struct ProgramNotificationResult {
    value: KeyedUiAccount,
}

#[derive(Debug, Deserialize)]
struct KeyedUiAccount {
    pubkey: String,
    account: UiAccount,
}

#[derive(Debug, Deserialize)]
struct SubscriptionResponse {
    result: u64,
}

/// Parses one `programNotification` frame; `None` for anything else.
fn parse_notification(text: &str) -> Option<KeyedAccount> {
    let notification: ProgramNotification = serde_json::from_str(text).ok()?;
    let value = notification.params.result.value;
    let pubkey = Pubkey::from_str(&value.pubkey).ok()?;
    let account: Account = value.account.decode()?;
    Some(KeyedAccount::new(pubkey, account))
}

fn subscribe_request(program_id: &Pubkey, commitment: CommitmentLevel) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "programSubscribe",
        "params": [
            program_id.to_string(),
            {
                "encoding": "base64",
                "commitment": commitment,
            }
        ]
    })
}

impl WebSocketSource {
    pub fn new(
        ws_url: impl Into<String>,
        program_id: Pubkey,
        commitment: CommitmentLevel,
        reconnect_delay_secs: u64,
    ) -> Self {
        Self {
            ws_url: ws_url.into(),
            program_id,
            commitment,
            reconnect_delay_secs,
            name: format!("programSubscribe:{program_id}"),
            state: WebSocketState::Disconnected,
        }
    }

    #[must_use]
    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Active subscription id, if connected.
    #[must_use]
    pub fn subscription_id(&self) -> Option<u64> {
        match &self.state {
            WebSocketState::Connected {
                subscription_id, ..
            } => Some(*subscription_id),
            WebSocketState::Disconnected => None,
        }
    }

    /// Connects, subscribes and spawns the frame reader.
    async fn connect(&mut self) -> Result<()> {
        logging::log(
            LogLevel::Info,
            &format!("Connecting to WebSocket: {}", redact_endpoint(&self.ws_url)),
        );

        let (ws_stream, _) = connect_async(&self.ws_url).await.map_err(|e| {
            MetaIndexerError::ConnectionError(format!("WebSocket connection failed: {e}"))
        })?;

        let (mut write, mut read) = ws_stream.split();

        write
            .send(Message::Text(
                subscribe_request(&self.program_id, self.commitment).to_string(),
            ))
            .await
            .map_err(|e| {
                MetaIndexerError::ConnectionError(format!("Failed to send subscription: {e}"))
            })?;

        let subscription_id = loop {
            match read.next().await {
                Some(Ok(Message::Text(text))) => {
                    if let Ok(response) = serde_json::from_str::<SubscriptionResponse>(&text) {
                        break response.result;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    return Err(MetaIndexerError::ConnectionError(format!(
                        "WebSocket closed before subscribing: {e}"
                    )))
                }
                None => {
                    return Err(MetaIndexerError::ConnectionError(
                        "WebSocket closed before subscribing".to_string(),
                    ))
                }
            }
        };

        tracing::info!(
            program = %self.program_id,
            subscription_id,
            "Program subscription established"
        );

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        // Keeps the write half alive so the socket is not half-closed.
        tokio::spawn(async move {
            let _write = write;
            while let Some(Ok(message)) = read.next().await {
                let Message::Text(text) = message else {
                    continue;
                };
                if let Some(account) = parse_notification(&text) {
                    if tx.send(account).is_err() {
                        break;
                    }
                }
            }
        });

        self.state = WebSocketState::Connected {
            subscription_id,
            receiver: rx,
        };

        Ok(())
    }

    /// Ensures connection is established, reconnecting if necessary
    async fn ensure_connected(&mut self) -> Result<()> {
        match &self.state {
            WebSocketState::Disconnected => {
                self.connect().await?;
            }
            WebSocketState::Connected { receiver, .. } => {
                if receiver.is_closed() && receiver.is_empty() {
                    logging::log(LogLevel::Warning, "WebSocket disconnected, reconnecting...");
                    sleep(Duration::from_secs(self.reconnect_delay_secs)).await;
                    self.state = WebSocketState::Disconnected;
                    self.connect().await?;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AccountChangeSource for WebSocketSource {
    async fn next_change(&mut self) -> Result<Option<KeyedAccount>> {
        loop {
            self.ensure_connected().await?;

            let WebSocketState::Connected { receiver, .. } = &mut self.state else {
                return Err(MetaIndexerError::InternalError(
                    "WebSocket not connected".to_string(),
                ));
            };

            match receiver.recv().await {
                Some(account) => return Ok(Some(account)),
                // Reader task ended; the next pass reconnects.
                None => continue,
            }
        }
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
