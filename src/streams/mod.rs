//! Account-change feeds for the incremental updater.
//!
//! The [`AccountChangeSource`] trait lets the updater consume a live
//! websocket subscription or any other producer of changed accounts.

use crate::types::KeyedAccount;
use crate::utils::error::Result;
use async_trait::async_trait;

/// A stream of accounts whose on-chain data changed.
#[async_trait]
pub trait AccountChangeSource: Send {
    /// Waits for the next changed account.
    ///
    /// Returns `Ok(None)` once the source is exhausted for good.
    async fn next_change(&mut self) -> Result<Option<KeyedAccount>>;

    /// Human-readable name for logs.
    fn source_name(&self) -> &str;
}

pub mod websocket;
