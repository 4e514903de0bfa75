//! `metaplex-meta-indexer` - ingestion and caching for Metaplex marketplace state.
//!
//! The crate bulk-loads every account of the token-metadata, vault, auction and
//! metaplex programs that belongs to one store, decodes them into a typed
//! in-memory [`MetaState`], then keeps that state current from program
//! subscriptions. Optional adapters persist the state as JSON documents and
//! serve the artwork queries a marketplace front end needs.
//!
//! # Quick Start
//!
//! ```no_run
//! use metaplex_meta_indexer::{
//!     flow_control_chain, MetaConnection, MetaIndexerConfigBuilder, Result, StateProp,
//! };
//! use futures_util::StreamExt;
//!
//! # async fn example() -> Result<()> {
//! let config = MetaIndexerConfigBuilder::new()
//!     .with_rpc("mainnet-beta", "https://api.metaplex.solana.com/")
//!     .with_store("6USwtimcZPssjzkBWJjprv9Jz3PjEypAsrKQUwxSn5e8")
//!     .build()?;
//!
//! let endpoint = config.endpoints[0].clone();
//! let connection = MetaConnection::new(endpoint, &config);
//!
//! let mut token = flow_control_chain(1).remove(0);
//! connection.load_in_turn(&mut token).await?;
//! println!("{} artworks", connection.state().await.metadata().len());
//!
//! connection.start_subscriptions().await?;
//! let mut auctions = Box::pin(connection.subscribe(StateProp::Auctions, None));
//! while let Some(event) = auctions.next().await {
//!     println!("auction {} changed", event.key);
//! }
//! connection.teardown().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Persistence
//!
//! ```no_run
//! use metaplex_meta_indexer::storage::{
//!     ArtworksInput, DocumentStore, MetaReader, MetaWriter, PostgresDocumentStore,
//! };
//! use metaplex_meta_indexer::utils::rpc::DefaultRpcProvider;
//! use metaplex_meta_indexer::{MetaState, Result};
//! use std::sync::Arc;
//!
//! # async fn example(state: &MetaState) -> Result<()> {
//! let store = Arc::new(PostgresDocumentStore::new("postgresql://localhost/meta").await?);
//! store.initialize().await?;
//!
//! let writer = MetaWriter::new(store.clone());
//! writer.persist_state(state)?;
//! writer.flush().await?;
//!
//! let rpc = Arc::new(DefaultRpcProvider::new("https://api.metaplex.solana.com/"));
//! let reader = MetaReader::new(store, rpc);
//! let artworks = reader
//!     .get_artworks(&ArtworksInput {
//!         store_id: Some("6USwtimcZPssjzkBWJjprv9Jz3PjEypAsrKQUwxSn5e8".into()),
//!         only_verified: true,
//!         ..ArtworksInput::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Public API exports
pub use config::{
    CommitmentLevel, EndpointConfig, MetaIndexerConfig, MetaIndexerConfigBuilder, PipelineConfig,
    ProgramIds, RetryConfig,
};
pub use core::{
    flow_control_chain, load_accounts, run_pipeline, AccountProcessor, BulkLoader, FlowToken,
    IncrementalUpdater, LoadOptions, MetaConnection, MetaState, PipelineOptions, StateMutation,
};
pub use storage::{
    ArtworksInput, Collection, DocumentStore, Filter, MemoryDocumentStore, MetaReader, MetaWriter,
    PostgresDocumentStore,
};
pub use streams::AccountChangeSource;
pub use types::{ChangeEvent, KeyedAccount, ParsedAccount, StateProp};
pub use utils::error::{MetaIndexerError, Result};

// Module declarations
pub mod config;
pub mod core;
pub mod storage;
pub mod streams;
pub mod telemetry;
pub mod types;
pub mod utils;
