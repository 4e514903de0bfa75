//! Persistent document storage for the read and write adapters.
//!
//! Records are stored as JSON documents keyed by `_id`, one collection per
//! record kind. [`DocumentStore`] is the seam between the adapters and a
//! backend: [`postgres::PostgresDocumentStore`] keeps one JSONB table per
//! collection, [`memory::MemoryDocumentStore`] keeps everything in process.

use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

pub mod documents;
pub mod filter;
pub mod memory;
pub mod postgres;
pub mod reader;
pub mod writer;

pub use filter::Filter;
pub use memory::MemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use reader::{ArtworksInput, MasterEditionRecord, MetaReader};
pub use writer::MetaWriter;

/// Record kinds with a persistent collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Stores,
    Creators,
    Metadata,
    Auctions,
    Editions,
    MasterEditions,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Stores,
        Collection::Creators,
        Collection::Metadata,
        Collection::Auctions,
        Collection::Editions,
        Collection::MasterEditions,
    ];

    /// Collection name as exposed to readers.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Collection::Stores => "stores",
            Collection::Creators => "creators",
            Collection::Metadata => "metadata",
            Collection::Auctions => "auctions",
            Collection::Editions => "editions",
            Collection::MasterEditions => "masterEditions",
        }
    }

    /// SQL table backing the collection.
    #[must_use]
    pub fn table(self) -> &'static str {
        match self {
            Collection::Stores => "meta_stores",
            Collection::Creators => "meta_creators",
            Collection::Metadata => "meta_metadata",
            Collection::Auctions => "meta_auctions",
            Collection::Editions => "meta_editions",
            Collection::MasterEditions => "meta_master_editions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Abstract interface over a document database.
///
/// Every document carries its key in an `_id` field. A `None` filter matches
/// the whole collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates the collections if they do not exist.
    async fn initialize(&self) -> Result<()>;

    async fn count(&self, collection: Collection, filter: Option<&Filter>) -> Result<u64>;

    /// Matching documents ordered by `_id`.
    async fn find(&self, collection: Collection, filter: Option<&Filter>) -> Result<Vec<Value>>;

    /// Every `_id` in the collection, ordered.
    async fn ids(&self, collection: Collection) -> Result<Vec<String>>;

    /// Inserts or fully replaces each `(id, document)` pair.
    ///
    /// Returns the number of documents written.
    async fn bulk_upsert(&self, collection: Collection, documents: Vec<(String, Value)>)
        -> Result<usize>;

    /// Removes the documents with these ids; missing ids are ignored.
    ///
    /// Returns the number of documents removed.
    async fn delete(&self, collection: Collection, ids: Vec<String>) -> Result<usize>;

    /// First matching document by `_id` order.
    async fn find_one(&self, collection: Collection, filter: Option<&Filter>) -> Result<Option<Value>> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }
}
