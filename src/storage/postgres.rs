//! `PostgreSQL` [`DocumentStore`]: one JSONB table per collection.
//!
//! Filters compile to SQL with bound parameters: containment (`@>`) for array
//! and creator matches, `#>>` text extraction with `= ANY` for value sets.

use super::{Collection, DocumentStore, Filter};
use crate::storage::filter::CREATORS_PATH;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use std::time::Duration;

/// Rows per `INSERT` statement; two bound parameters each.
const UPSERT_CHUNK: usize = 1000;

/// Document store backed by a `PostgreSQL` connection pool.
///
/// # Example
///
/// ```no_run
/// use metaplex_meta_indexer::storage::{DocumentStore, PostgresDocumentStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = PostgresDocumentStore::new("postgresql://localhost/meta").await?;
/// store.initialize().await?;
/// # Ok(())
/// # }
/// ```
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Connects a small pool to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns `MetaIndexerError::DatabaseError` if the connection fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// `{"a":{"b":leaf}}` for the path `["a", "b"]`.
fn nested(path: &[&str], leaf: Value) -> Value {
    path.iter().rev().fold(leaf, |inner, segment| {
        let mut object = Map::new();
        object.insert((*segment).to_string(), inner);
        Value::Object(object)
    })
}

/// Appends the SQL predicate for `filter` to `builder`.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::Id(id) => {
            builder.push("_id = ").push_bind(id.clone());
        }
        Filter::In { field, values } => {
            let path: Vec<String> = field.split('.').map(str::to_string).collect();
            builder
                .push("(doc #>> ")
                .push_bind(path)
                .push(") = ANY(")
                .push_bind(values.clone())
                .push(")");
        }
        Filter::Contains { field, value } => {
            let segments: Vec<&str> = field.split('.').collect();
            builder
                .push("doc @> ")
                .push_bind(nested(&segments, json!([value])));
        }
        Filter::Creator { address, verified } => {
            let mut creator = Map::new();
            if let Some(address) = address {
                creator.insert("address".to_string(), json!(address));
            }
            if let Some(verified) = verified {
                creator.insert("verified".to_string(), json!(verified));
            }
            builder
                .push("doc @> ")
                .push_bind(nested(&CREATORS_PATH, json!([Value::Object(creator)])));
        }
        Filter::Or(branches) | Filter::And(branches) => {
            let (joiner, empty) = if matches!(filter, Filter::Or(_)) {
                (" OR ", "FALSE")
            } else {
                (" AND ", "TRUE")
            };
            if branches.is_empty() {
                builder.push(empty);
                return;
            }
            builder.push("(");
            for (i, branch) in branches.iter().enumerate() {
                if i > 0 {
                    builder.push(joiner);
                }
                push_filter(builder, branch);
            }
            builder.push(")");
        }
    }
}

fn push_where(builder: &mut QueryBuilder<'_, Postgres>, filter: Option<&Filter>) {
    if let Some(filter) = filter {
        builder.push(" WHERE ");
        push_filter(builder, filter);
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn initialize(&self) -> Result<()> {
        for collection in Collection::ALL {
            sqlx::query(&format!(
                r"
                CREATE TABLE IF NOT EXISTS {} (
                    _id TEXT PRIMARY KEY,
                    doc JSONB NOT NULL,
                    updated_at TIMESTAMPTZ DEFAULT NOW()
                )
                ",
                collection.table()
            ))
            .execute(&self.pool)
            .await?;

            // Containment queries on artworks and creators.
            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{0}_doc ON {0} USING GIN (doc jsonb_path_ops)",
                collection.table()
            ))
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn count(&self, collection: Collection, filter: Option<&Filter>) -> Result<u64> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", collection.table()));
        push_where(&mut builder, filter);
        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count.try_into().unwrap_or(0))
    }

    async fn find(&self, collection: Collection, filter: Option<&Filter>) -> Result<Vec<Value>> {
        let mut builder = QueryBuilder::new(format!("SELECT doc FROM {}", collection.table()));
        push_where(&mut builder, filter);
        builder.push(" ORDER BY _id");
        let documents: Vec<Value> = builder.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(documents)
    }

    async fn ids(&self, collection: Collection) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>(&format!(
            "SELECT _id FROM {} ORDER BY _id",
            collection.table()
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn bulk_upsert(
        &self,
        collection: Collection,
        documents: Vec<(String, Value)>,
    ) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let written = documents.len();
        let mut tx = self.pool.begin().await?;
        for chunk in documents.chunks(UPSERT_CHUNK) {
            let mut builder =
                QueryBuilder::new(format!("INSERT INTO {} (_id, doc) ", collection.table()));
            builder.push_values(chunk, |mut row, (id, document)| {
                let mut document = document.clone();
                if let Value::Object(fields) = &mut document {
                    fields.insert("_id".to_string(), Value::String(id.clone()));
                }
                row.push_bind(id.clone()).push_bind(document);
            });
            builder.push(" ON CONFLICT (_id) DO UPDATE SET doc = EXCLUDED.doc, updated_at = NOW()");
            builder.build().execute(&mut *tx).await?;
        }
        tx.commit().await?;

        Ok(written)
    }

    async fn delete(&self, collection: Collection, ids: Vec<String>) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(&format!("DELETE FROM {} WHERE _id = ANY($1)", collection.table()))
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
    }
}
