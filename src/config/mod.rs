//! Configuration for the meta indexer.
//!
//! Built with [`MetaIndexerConfigBuilder`] or read from the environment with
//! [`MetaIndexerConfig::from_env`].

use crate::utils::error::{MetaIndexerError, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Token-metadata program.
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
/// Token-vault (fractionalization) program.
pub const VAULT_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("vau1zxA2LbssAUEF7Gpw91zMM1LvXrvpzJtmZ58rPsn");
/// Auction program.
pub const AUCTION_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("auctxRXPeJoc4817jDhf4HbjnhEcr1cCXenosMhK5R8");
/// Metaplex marketplace program.
pub const METAPLEX_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("p1exdMJcjVao65QdewkaZRUnU6VPSXhus9n2GzWfh98");
/// SPL token program.
pub const TOKEN_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

const DEFAULT_ENDPOINT_NAME: &str = "mainnet-beta";
const DEFAULT_ENDPOINT_URL: &str = "https://api.metaplex.solana.com/";

/// Transaction commitment level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<CommitmentLevel> for solana_sdk::commitment_config::CommitmentConfig {
    fn from(level: CommitmentLevel) -> Self {
        use solana_sdk::commitment_config::CommitmentConfig;
        match level {
            CommitmentLevel::Processed => CommitmentConfig::processed(),
            CommitmentLevel::Confirmed => CommitmentConfig::confirmed(),
            CommitmentLevel::Finalized => CommitmentConfig::finalized(),
        }
    }
}

impl FromStr for CommitmentLevel {
    type Err = MetaIndexerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" | "recent" => Ok(Self::Processed),
            "confirmed" | "single" => Ok(Self::Confirmed),
            "finalized" | "max" => Ok(Self::Finalized),
            other => Err(MetaIndexerError::ConfigError(format!(
                "Unknown commitment level '{other}'"
            ))),
        }
    }
}

/// Exponential backoff policy for transient failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt (0 disables retrying).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff_ms: u64,
    /// Growth factor applied per attempt.
    pub backoff_multiplier: f64,
    /// Upper bound on any single delay.
    pub max_backoff_ms: u64,
    /// Randomize each delay by ±25 %.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 500,
            backoff_multiplier: 2.0,
            max_backoff_ms: 10_000,
            jitter: true,
        }
    }
}

/// Program ids the loaders scan. Defaults to the mainnet deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramIds {
    pub token_metadata: Pubkey,
    pub vault: Pubkey,
    pub auction: Pubkey,
    pub metaplex: Pubkey,
    pub token: Pubkey,
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            token_metadata: TOKEN_METADATA_PROGRAM_ID,
            vault: VAULT_PROGRAM_ID,
            auction: AUCTION_PROGRAM_ID,
            metaplex: METAPLEX_PROGRAM_ID,
            token: TOKEN_PROGRAM_ID,
        }
    }
}

/// One RPC endpoint and the websocket used for its change subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Human-readable connection name used in logs.
    pub name: String,
    /// JSON-RPC url.
    pub rpc_url: String,
    /// Pubsub url; derived from `rpc_url` when not given.
    pub ws_url: String,
}

impl EndpointConfig {
    /// Creates an endpoint whose websocket url is derived from `rpc_url`.
    pub fn new(name: impl Into<String>, rpc_url: impl Into<String>) -> Self {
        let rpc_url = rpc_url.into();
        let ws_url = derive_ws_url(&rpc_url);
        Self {
            name: name.into(),
            rpc_url,
            ws_url,
        }
    }

    /// Overrides the derived websocket url.
    #[must_use]
    pub fn with_ws_url(mut self, ws_url: impl Into<String>) -> Self {
        self.ws_url = ws_url.into();
        self
    }
}

/// `http(s)://host:8899` becomes `ws(s)://host:8900`; other ports are kept.
#[must_use]
pub fn derive_ws_url(rpc_url: &str) -> String {
    let swapped = if let Some(rest) = rpc_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = rpc_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        rpc_url.to_string()
    };
    swapped.replacen(":8899", ":8900", 1)
}

/// Worker counts and pacing for the bulk-load pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Concurrent workers routing raw program accounts (default: 2).
    pub data_jobs: usize,
    /// Concurrent workers re-evaluating metadata membership (default: 3).
    pub metadata_jobs: usize,
    /// Concurrent workers flushing persistence batches (default: 2).
    pub persist_jobs: usize,
    /// Pause between items pulled by one worker, in milliseconds (default: 0).
    pub item_delay_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_jobs: 2,
            metadata_jobs: 3,
            persist_jobs: 2,
            item_delay_ms: 0,
        }
    }
}

/// Settings for one meta indexer process.
///
/// Use [`MetaIndexerConfigBuilder`] to construct instances of this struct.
#[derive(Debug, Clone)]
pub struct MetaIndexerConfig {
    /// Endpoints loaded one after another through flow control.
    pub endpoints: Vec<EndpointConfig>,

    /// Postgres url for the document store; persistence is off when absent.
    pub database_url: Option<String>,

    /// Marketplace store that scopes creators, auction managers and metadata.
    pub store_id: Option<Pubkey>,

    /// Disable store scoping entirely.
    pub include_all: bool,

    /// Scan the whole metadata program in the first phase instead of per creator.
    pub big_store: bool,

    /// Commitment used for RPC reads and subscriptions (default: Confirmed).
    pub commitment_level: CommitmentLevel,

    /// Program ids to scan.
    pub programs: ProgramIds,

    /// Retry policy for individual RPC calls.
    pub rpc_retry: RetryConfig,

    /// Retry policy for a whole bulk load.
    pub load_retry: RetryConfig,

    /// Pipeline worker counts.
    pub pipeline: PipelineConfig,

    /// Keys per `getMultipleAccounts` call in the editions pass (default: 100).
    pub edition_batch_size: usize,

    /// Whitelisted creator count above which metadata is fully scanned (default: 3).
    pub creator_scan_threshold: usize,

    /// Seconds to wait before re-subscribing a dropped websocket (default: 5).
    pub reconnect_delay_secs: u64,
}

impl MetaIndexerConfig {
    /// Reads configuration from `.env` and the process environment.
    ///
    /// | Variable         | Meaning                                              |
    /// |------------------|------------------------------------------------------|
    /// | `META_ENDPOINTS` | `name=url,name=url` or bare urls (default mainnet)   |
    /// | `DATABASE_URL`   | enables persistence                                  |
    /// | `STORE_ID`       | marketplace store pubkey                             |
    /// | `INCLUDE_ALL`    | `true` disables store scoping                        |
    /// | `BIG_STORE`      | `true` scans all metadata up front                   |
    /// | `COMMITMENT`     | processed / confirmed / finalized                    |
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on unparsable values.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = MetaIndexerConfigBuilder::new();

        let endpoints = std::env::var("META_ENDPOINTS")
            .unwrap_or_else(|_| format!("{DEFAULT_ENDPOINT_NAME}={DEFAULT_ENDPOINT_URL}"));
        for endpoint in parse_endpoints(&endpoints) {
            builder = builder.with_endpoint(endpoint);
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.with_database(url);
        }
        if let Ok(store) = std::env::var("STORE_ID") {
            builder = builder.with_store(store);
        }
        if let Ok(commitment) = std::env::var("COMMITMENT") {
            builder = builder.with_commitment(commitment.parse()?);
        }

        builder
            .include_all(env_flag("INCLUDE_ALL"))
            .big_store(env_flag("BIG_STORE"))
            .build()
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Parses `name=url` pairs separated by commas; bare urls get positional names.
#[must_use]
pub fn parse_endpoints(raw: &str) -> Vec<EndpointConfig> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(index, entry)| match entry.split_once('=') {
            Some((name, url)) if !name.contains("://") => {
                EndpointConfig::new(name.trim(), url.trim())
            }
            _ => EndpointConfig::new(format!("endpoint-{index}"), entry),
        })
        .collect()
}

/// Builder for [`MetaIndexerConfig`].
///
/// # Example
///
/// ```no_run
/// use metaplex_meta_indexer::MetaIndexerConfigBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MetaIndexerConfigBuilder::new()
///     .with_rpc("mainnet-beta", "https://api.metaplex.solana.com/")
///     .with_store("AzzC7t3QKC4dt3vfYk5c41D7Mu3sXQtoyzzAvSpPSeC2")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MetaIndexerConfigBuilder {
    endpoints: Vec<EndpointConfig>,
    database_url: Option<String>,
    store_id: Option<String>,
    include_all: bool,
    big_store: bool,
    commitment_level: Option<CommitmentLevel>,
    programs: Option<ProgramIds>,
    rpc_retry: Option<RetryConfig>,
    load_retry: Option<RetryConfig>,
    pipeline: Option<PipelineConfig>,
    edition_batch_size: Option<usize>,
    creator_scan_threshold: Option<usize>,
    reconnect_delay_secs: Option<u64>,
}

impl MetaIndexerConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an RPC endpoint; its websocket url is derived from `url`.
    ///
    /// ```no_run
    /// # use metaplex_meta_indexer::MetaIndexerConfigBuilder;
    /// let builder = MetaIndexerConfigBuilder::new()
    ///     .with_rpc("local", "http://127.0.0.1:8899");
    /// ```
    #[must_use]
    pub fn with_rpc(self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.with_endpoint(EndpointConfig::new(name, url))
    }

    /// Adds a fully specified endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: EndpointConfig) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Sets the Postgres url used by the document store.
    #[must_use]
    pub fn with_database(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Sets the marketplace store id (parsed into a `Pubkey` on build).
    #[must_use]
    pub fn with_store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Keeps every metadata record regardless of store membership.
    #[must_use]
    pub fn include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    /// Scans the complete metadata program during the first load phase.
    #[must_use]
    pub fn big_store(mut self, big_store: bool) -> Self {
        self.big_store = big_store;
        self
    }

    /// Sets the commitment level.
    #[must_use]
    pub fn with_commitment(mut self, level: CommitmentLevel) -> Self {
        self.commitment_level = Some(level);
        self
    }

    /// Overrides the program ids (useful against a local validator).
    #[must_use]
    pub fn with_programs(mut self, programs: ProgramIds) -> Self {
        self.programs = Some(programs);
        self
    }

    /// Sets the retry policy for individual RPC calls.
    #[must_use]
    pub fn with_rpc_retry(mut self, retry: RetryConfig) -> Self {
        self.rpc_retry = Some(retry);
        self
    }

    /// Sets the retry policy for whole bulk loads.
    #[must_use]
    pub fn with_load_retry(mut self, retry: RetryConfig) -> Self {
        self.load_retry = Some(retry);
        self
    }

    /// Sets pipeline worker counts and pacing.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Sets the `getMultipleAccounts` batch size for the editions pass.
    #[must_use]
    pub fn with_edition_batch_size(mut self, size: usize) -> Self {
        self.edition_batch_size = Some(size);
        self
    }

    /// Sets the creator count above which the metadata program is fully scanned.
    #[must_use]
    pub fn with_creator_scan_threshold(mut self, threshold: usize) -> Self {
        self.creator_scan_threshold = Some(threshold);
        self
    }

    /// Sets the websocket reconnect delay.
    #[must_use]
    pub fn with_reconnect_delay(mut self, secs: u64) -> Self {
        self.reconnect_delay_secs = Some(secs);
        self
    }

    /// Validates the settings and produces a [`MetaIndexerConfig`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when no endpoint is configured, the store id is
    /// not a valid public key, or a batch size / worker count is zero.
    pub fn build(self) -> Result<MetaIndexerConfig> {
        if self.endpoints.is_empty() {
            return Err(MetaIndexerError::ConfigError(
                "At least one RPC endpoint is required".to_string(),
            ));
        }

        let store_id = self
            .store_id
            .map(|s| {
                Pubkey::from_str(&s).map_err(|e| {
                    MetaIndexerError::ConfigError(format!("Invalid store ID '{s}': {e}"))
                })
            })
            .transpose()?;

        let edition_batch_size = self.edition_batch_size.unwrap_or(100);
        if edition_batch_size == 0 {
            return Err(MetaIndexerError::ConfigError(
                "Edition batch size must be greater than zero".to_string(),
            ));
        }

        let pipeline = self.pipeline.unwrap_or_default();
        if pipeline.data_jobs == 0 || pipeline.metadata_jobs == 0 || pipeline.persist_jobs == 0 {
            return Err(MetaIndexerError::ConfigError(
                "Pipeline job counts must be greater than zero".to_string(),
            ));
        }

        Ok(MetaIndexerConfig {
            endpoints: self.endpoints,
            database_url: self.database_url,
            store_id,
            include_all: self.include_all,
            big_store: self.big_store,
            commitment_level: self.commitment_level.unwrap_or_default(),
            programs: self.programs.unwrap_or_default(),
            rpc_retry: self.rpc_retry.unwrap_or_default(),
            load_retry: self.load_retry.unwrap_or_default(),
            pipeline,
            edition_batch_size,
            creator_scan_threshold: self.creator_scan_threshold.unwrap_or(3),
            reconnect_delay_secs: self.reconnect_delay_secs.unwrap_or(5),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_missing_endpoint() {
        let result = MetaIndexerConfigBuilder::new().build();
        assert!(matches!(result, Err(MetaIndexerError::ConfigError(_))));
    }

    #[test]
    fn test_builder_invalid_store_id() {
        let result = MetaIndexerConfigBuilder::new()
            .with_rpc("local", "http://127.0.0.1:8899")
            .with_store("not-a-pubkey")
            .build();

        match result {
            Err(MetaIndexerError::ConfigError(msg)) => assert!(msg.contains("Invalid store ID")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_defaults() -> Result<()> {
        let config = MetaIndexerConfigBuilder::new()
            .with_rpc("local", "http://127.0.0.1:8899")
            .build()?;

        assert_eq!(config.edition_batch_size, 100);
        assert_eq!(config.creator_scan_threshold, 3);
        assert_eq!(config.pipeline.data_jobs, 2);
        assert_eq!(config.pipeline.metadata_jobs, 3);
        assert_eq!(config.commitment_level, CommitmentLevel::Confirmed);
        assert_eq!(config.programs, ProgramIds::default());
        assert!(config.store_id.is_none());
        assert!(!config.include_all);
        assert_eq!(config.endpoints[0].ws_url, "ws://127.0.0.1:8900");
        Ok(())
    }

    #[test]
    fn test_builder_rejects_zero_batch() {
        let result = MetaIndexerConfigBuilder::new()
            .with_rpc("local", "http://127.0.0.1:8899")
            .with_edition_batch_size(0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_derive_ws_url() {
        assert_eq!(
            derive_ws_url("https://api.metaplex.solana.com/"),
            "wss://api.metaplex.solana.com/"
        );
        assert_eq!(derive_ws_url("http://localhost:8899"), "ws://localhost:8900");
    }

    #[test]
    fn test_parse_endpoints() {
        let parsed = parse_endpoints(
            "mainnet-beta=https://api.metaplex.solana.com/, https://api.devnet.solana.com",
        );
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "mainnet-beta");
        assert_eq!(parsed[0].rpc_url, "https://api.metaplex.solana.com/");
        assert_eq!(parsed[1].name, "endpoint-1");
        assert_eq!(parsed[1].rpc_url, "https://api.devnet.solana.com");
    }

    #[test]
    fn test_commitment_from_str() {
        assert_eq!("recent".parse::<CommitmentLevel>().unwrap(), CommitmentLevel::Processed);
        assert_eq!("Finalized".parse::<CommitmentLevel>().unwrap(), CommitmentLevel::Finalized);
        assert!("eventually".parse::<CommitmentLevel>().is_err());
    }
}
