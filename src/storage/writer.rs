//! Write adapter: buffered per-collection bulk upserts.
//!
//! [`MetaWriter::persist`] and [`MetaWriter::remove`] only queue work.
//! [`MetaWriter::flush`] drains the queue and issues one `bulk_upsert` (then
//! one `delete`) per collection through the pipeline executor. Collections
//! written before a failing one stay written.

use super::documents::{document_for, state_documents};
use super::{Collection, DocumentStore};
use crate::config::PipelineConfig;
use crate::core::pipeline::{run_pipeline, PipelineOptions};
use crate::core::state::{MetaState, StateMutation};
use crate::types::ChangeEvent;
use crate::utils::error::{MetaIndexerError, Result};
use crate::utils::logging::log_error;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Queued work per collection and id; `None` queues a removal.
type Pending = BTreeMap<Collection, BTreeMap<String, Option<Value>>>;

struct Batch {
    collection: Collection,
    upserts: Vec<(String, Value)>,
    removals: Vec<String>,
}

/// Buffers upserts and flushes them per collection.
pub struct MetaWriter {
    store: Arc<dyn DocumentStore>,
    persist_jobs: usize,
    pending: Mutex<Pending>,
}

impl MetaWriter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            persist_jobs: PipelineConfig::default().persist_jobs,
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    /// Collections flushed concurrently.
    #[must_use]
    pub fn with_persist_jobs(mut self, persist_jobs: usize) -> Self {
        self.persist_jobs = persist_jobs;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues an upsert of `document` under `id`; a later call for the same id
    /// (upsert or removal) wins.
    ///
    /// # Errors
    ///
    /// Fails if `document` cannot be serialized.
    pub fn persist<T: Serialize>(
        &self,
        collection: Collection,
        id: impl Into<String>,
        document: &T,
    ) -> Result<()> {
        let value = serde_json::to_value(document)?;
        self.lock()
            .entry(collection)
            .or_default()
            .insert(id.into(), Some(value));
        Ok(())
    }

    /// Queues the removal of `id`, replacing any upsert queued for it.
    pub fn remove(&self, collection: Collection, id: impl Into<String>) {
        self.lock().entry(collection).or_default().insert(id.into(), None);
    }

    /// Upserts and removals waiting for the next flush.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().values().map(BTreeMap::len).sum()
    }

    /// Queues the persistent form of one applied mutation.
    ///
    /// Returns `false` for record kinds without a collection.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be serialized.
    pub fn persist_mutation(&self, mutation: &StateMutation, state: &MetaState) -> Result<bool> {
        match document_for(mutation, state)? {
            Some((collection, id, document)) => {
                self.persist(collection, id, &document)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Queues what a published change means for the document store: an
    /// upsert, or a removal when the event reports an eviction.
    ///
    /// Returns `false` for record kinds without a collection.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be serialized.
    pub fn persist_event(&self, event: &ChangeEvent, state: &MetaState) -> Result<bool> {
        if !event.removed {
            return self.persist_mutation(&event.mutation, state);
        }
        match document_for(&event.mutation, state)? {
            Some((collection, id, _)) => {
                self.remove(collection, id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Queues every record the read side serves and returns how many were queued.
    ///
    /// # Errors
    ///
    /// Fails if a document cannot be serialized.
    pub fn persist_state(&self, state: &MetaState) -> Result<usize> {
        let documents = state_documents(state)?;
        let queued = documents.len();
        let mut pending = self.lock();
        for (collection, id, document) in documents {
            pending.entry(collection).or_default().insert(id, Some(document));
        }
        Ok(queued)
    }

    /// Writes and clears everything queued; returns the number of documents
    /// written or removed.
    ///
    /// # Errors
    ///
    /// Returns `MetaIndexerError::PersistenceError` for the first collection
    /// whose bulk write failed. The failure is logged before it is returned.
    #[tracing::instrument(skip_all, fields(jobs = self.persist_jobs))]
    pub async fn flush(&self) -> Result<usize> {
        let batches: Vec<Batch> = std::mem::take(&mut *self.lock())
            .into_iter()
            .filter(|(_, queued)| !queued.is_empty())
            .map(|(collection, queued)| {
                let mut batch = Batch {
                    collection,
                    upserts: Vec::new(),
                    removals: Vec::new(),
                };
                for (id, document) in queued {
                    match document {
                        Some(document) => batch.upserts.push((id, document)),
                        None => batch.removals.push(id),
                    }
                }
                batch
            })
            .collect();
        if batches.is_empty() {
            return Ok(0);
        }

        let written = AtomicUsize::new(0);
        let options = PipelineOptions::new("persist", self.persist_jobs);
        run_pipeline(futures_util::stream::iter(batches), &options, |batch, _| {
            let store = Arc::clone(&self.store);
            let written = &written;
            async move {
                let Batch {
                    collection,
                    upserts,
                    removals,
                } = batch;
                let (upserted, removed) = (upserts.len(), removals.len());
                let result = async {
                    let mut n = 0;
                    if !upserts.is_empty() {
                        n += store.bulk_upsert(collection, upserts).await?;
                    }
                    if !removals.is_empty() {
                        n += store.delete(collection, removals).await?;
                    }
                    Ok::<usize, MetaIndexerError>(n)
                }
                .await;

                match result {
                    Ok(n) => {
                        written.fetch_add(n, Ordering::SeqCst);
                        tracing::debug!(%collection, upserted, removed, "Bulk write complete");
                        Ok(())
                    }
                    Err(e) => {
                        log_error(&format!("Bulk write to {collection} failed"), &e.to_string());
                        Err(MetaIndexerError::PersistenceError {
                            collection: collection.to_string(),
                            message: e.to_string(),
                        })
                    }
                }
            }
        })
        .await?;

        Ok(written.load(Ordering::SeqCst))
    }
}
