//! In-process [`DocumentStore`] for tests and single-run tooling.

use super::{Collection, DocumentStore, Filter};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// Documents held in ordered maps, one per collection.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Value>>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matching<'a>(
    documents: Option<&'a BTreeMap<String, Value>>,
    filter: Option<&'a Filter>,
) -> impl Iterator<Item = &'a Value> + 'a {
    documents
        .into_iter()
        .flat_map(BTreeMap::values)
        .filter(move |doc| filter.map_or(true, |f| f.matches(doc)))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn initialize(&self) -> Result<()> {
        let mut collections = self.collections.write().await;
        for collection in Collection::ALL {
            collections.entry(collection).or_default();
        }
        Ok(())
    }

    async fn count(&self, collection: Collection, filter: Option<&Filter>) -> Result<u64> {
        let collections = self.collections.read().await;
        Ok(matching(collections.get(&collection), filter).count() as u64)
    }

    async fn find(&self, collection: Collection, filter: Option<&Filter>) -> Result<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(matching(collections.get(&collection), filter).cloned().collect())
    }

    async fn ids(&self, collection: Collection) -> Result<Vec<String>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn bulk_upsert(
        &self,
        collection: Collection,
        documents: Vec<(String, Value)>,
    ) -> Result<usize> {
        let mut collections = self.collections.write().await;
        let target = collections.entry(collection).or_default();
        let written = documents.len();
        for (id, mut document) in documents {
            if let Value::Object(fields) = &mut document {
                fields.insert("_id".to_string(), Value::String(id.clone()));
            }
            target.insert(id, document);
        }
        Ok(written)
    }

    async fn delete(&self, collection: Collection, ids: Vec<String>) -> Result<usize> {
        let mut collections = self.collections.write().await;
        let Some(target) = collections.get_mut(&collection) else {
            return Ok(0);
        };
        Ok(ids.iter().filter(|id| target.remove(*id).is_some()).count())
    }
}
