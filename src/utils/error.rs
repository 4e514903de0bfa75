//! Error types for the meta indexer.
//!
//! RPC, persistence and configuration failures surface as [`MetaIndexerError`].
//! Account decoding has its own lightweight [`DecodeError`]: a bad account is
//! skipped where it is decoded and never aborts a load.

use thiserror::Error;

/// Errors raised by loaders, adapters and configuration.
#[derive(Debug, Error)]
pub enum MetaIndexerError {
    /// Errors encountered during database operations.
    ///
    /// Wraps `sqlx::Error` so queries can use the `?` operator directly.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// A payload could not be interpreted (RPC response, stored document).
    #[error("Decoding error: {0}")]
    DecodingError(String),

    /// Errors interacting with the Solana RPC.
    ///
    /// Covers network failures, timeouts and unexpected responses.
    #[error("RPC error: {0}")]
    RpcError(String),

    /// Errors from the Solana RPC client.
    #[error("RPC client error: {0}")]
    RpcClientError(Box<solana_client::client_error::ClientError>),

    /// Errors related to configuration.
    ///
    /// Missing endpoints, invalid store id, unparsable environment values.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Errors from environment variable operations.
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),

    /// Errors during Solana public key parsing.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(#[from] solana_sdk::pubkey::ParsePubkeyError),

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// WebSocket subscription failure or a dropped stream.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A bulk write for one collection failed during a flush.
    #[error("Persistence error in '{collection}': {message}")]
    PersistenceError {
        /// Collection the failed batch targeted.
        collection: String,
        /// Underlying driver message.
        message: String,
    },

    /// Catch-all for task join failures and other runtime errors.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// All retry attempts were exhausted on a transient error.
    #[error("Retry exhausted after {attempts} attempts: {last_error}")]
    RetryExhausted {
        /// Total number of attempts (initial call + retries).
        attempts: u32,
        /// String representation of the last error.
        last_error: String,
    },
}

/// Type alias for Results using `MetaIndexerError`.
pub type Result<T> = std::result::Result<T, MetaIndexerError>;

impl From<solana_client::client_error::ClientError> for MetaIndexerError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        MetaIndexerError::RpcClientError(Box::new(err))
    }
}

impl From<tokio::task::JoinError> for MetaIndexerError {
    fn from(err: tokio::task::JoinError) -> Self {
        MetaIndexerError::InternalError(err.to_string())
    }
}

/// Why an account could not be decoded.
///
/// Decoders return this instead of panicking on foreign or truncated data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The account is owned by a program other than the one expected.
    #[error("account owned by {actual}, expected {expected}")]
    WrongOwner { expected: String, actual: String },

    /// The leading tag byte is not one this decoder understands.
    #[error("unknown account tag {0}")]
    UnknownTag(u8),

    /// The payload ended before the layout was complete.
    #[error("account data too short: need {needed} bytes, have {actual}")]
    TooShort { needed: usize, actual: usize },

    /// Borsh rejected the payload (bad bool, bad enum tag, invalid utf-8...).
    #[error("malformed account data: {0}")]
    Malformed(String),

    /// The record decoded but fails a data-quality gate.
    #[error("rejected: {0}")]
    Rejected(&'static str),
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}
