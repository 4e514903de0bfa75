//! Retry policy for transient RPC failures.
//!
//! - [`compute_backoff`] derives the delay before a retry.
//! - [`is_transient`] decides whether an error is worth retrying.
//! - [`retry_with_backoff`] drives any fallible async operation (a single RPC
//!   call or a whole bulk load) under a [`RetryConfig`].
//! - [`RetryingRpcProvider`] applies the policy to every [`RpcProvider`] call.

use crate::config::RetryConfig;
use crate::types::KeyedAccount;
use crate::utils::error::{MetaIndexerError, Result};
use crate::utils::rpc::RpcProvider;
use async_trait::async_trait;
use solana_client::rpc_filter::RpcFilterType;
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

// ─────────────────────────────────────────────────────────────────────────────
// Backoff calculation
// ─────────────────────────────────────────────────────────────────────────────

/// Computes the delay before retry number `attempt` (1-indexed).
///
/// `initial_backoff_ms * backoff_multiplier^(attempt - 1)`, capped at
/// `max_backoff_ms`, then scaled into [0.75, 1.25] when jitter is on.
#[must_use]
pub fn compute_backoff(cfg: &RetryConfig, attempt: u32) -> Duration {
    let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
    let base = cfg.initial_backoff_ms as f64 * cfg.backoff_multiplier.powi(exponent);
    let capped = base.min(cfg.max_backoff_ms as f64);

    let ms = if cfg.jitter {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos();
        let factor = 0.75 + f64::from(nanos % 1_000_000) / 1_000_000.0 * 0.5;
        capped * factor
    } else {
        capped
    };

    Duration::from_millis(ms as u64)
}

// ─────────────────────────────────────────────────────────────────────────────
// Error classification
// ─────────────────────────────────────────────────────────────────────────────

/// Returns `true` if `err` is a transient failure that is safe to retry.
///
/// | Error variant            | Retried |
/// |--------------------------|---------|
/// | `RpcError`               | yes     |
/// | `RpcClientError`         | yes     |
/// | `ConnectionError`        | yes     |
/// | `InternalError`          | yes     |
/// | `DatabaseError`          | no      |
/// | `DecodingError`          | no      |
/// | `ConfigError`            | no      |
/// | `PersistenceError`       | no      |
/// | `RetryExhausted`         | no      |
#[must_use]
pub fn is_transient(err: &MetaIndexerError) -> bool {
    matches!(
        err,
        MetaIndexerError::RpcError(_)
            | MetaIndexerError::RpcClientError(_)
            | MetaIndexerError::ConnectionError(_)
            | MetaIndexerError::InternalError(_)
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Retry loop
// ─────────────────────────────────────────────────────────────────────────────

/// Calls `op` until it succeeds, fails permanently, or `max_retries` retries
/// have been spent. Exhaustion yields [`MetaIndexerError::RetryExhausted`].
pub async fn retry_with_backoff<F, Fut, T>(cfg: &RetryConfig, label: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match op().await {
            Ok(val) => return Ok(val),
            Err(err) if !is_transient(&err) => return Err(err),
            Err(err) => err,
        };

        attempt += 1;
        if attempt > cfg.max_retries {
            return Err(MetaIndexerError::RetryExhausted {
                attempts: attempt,
                last_error: err.to_string(),
            });
        }

        let delay = compute_backoff(cfg, attempt);
        tracing::warn!(
            operation = label,
            attempt,
            max = cfg.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Transient error, retrying"
        );
        sleep(delay).await;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RetryingRpcProvider
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps any [`RpcProvider`] so transient failures are retried transparently.
///
/// # Example
///
/// ```no_run
/// use metaplex_meta_indexer::RetryConfig;
/// use metaplex_meta_indexer::utils::retry::RetryingRpcProvider;
/// use metaplex_meta_indexer::utils::rpc::{DefaultRpcProvider, RpcProvider};
/// use std::sync::Arc;
///
/// let raw = DefaultRpcProvider::new("http://127.0.0.1:8899");
/// let rpc: Arc<dyn RpcProvider> = Arc::new(RetryingRpcProvider::new(raw, RetryConfig::default()));
/// ```
pub struct RetryingRpcProvider<P> {
    inner: P,
    config: RetryConfig,
}

impl<P: RpcProvider> RetryingRpcProvider<P> {
    /// Wraps `inner` with the given retry `config`.
    pub fn new(inner: P, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl<P: RpcProvider> RpcProvider for RetryingRpcProvider<P> {
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Option<Vec<RpcFilterType>>,
        commitment: Option<CommitmentConfig>,
    ) -> Result<Vec<KeyedAccount>> {
        retry_with_backoff(&self.config, "getProgramAccounts", || {
            self.inner
                .get_program_accounts(program_id, filters.clone(), commitment)
        })
        .await
    }

    async fn get_multiple_accounts(
        &self,
        pubkeys: &[Pubkey],
        commitment: Option<CommitmentConfig>,
    ) -> Result<Vec<Option<Account>>> {
        retry_with_backoff(&self.config, "getMultipleAccounts", || {
            self.inner.get_multiple_accounts(pubkeys, commitment)
        })
        .await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
