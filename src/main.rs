//! `meta-indexer` binary.
//!
//! Loads every configured endpoint in turn, keeps each one current from program
//! subscriptions, and mirrors the state into `PostgreSQL` when `DATABASE_URL`
//! is set. Runs until ctrl-c.

use metaplex_meta_indexer::telemetry::{init_telemetry, TelemetryConfig};
use metaplex_meta_indexer::utils::logging::{log_error, log_section};
use metaplex_meta_indexer::{
    flow_control_chain, ChangeEvent, DocumentStore, MetaConnection, MetaIndexerConfig,
    MetaIndexerError, MetaWriter, PostgresDocumentStore, Result,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How often buffered change documents are written.
const FLUSH_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    let config = MetaIndexerConfig::from_env()?;
    let _telemetry = init_telemetry(TelemetryConfig::default());

    log_section("Metaplex meta indexer");
    tracing::info!(
        endpoints = config.endpoints.len(),
        store = ?config.store_id.map(|s| s.to_string()),
        include_all = config.include_all,
        big_store = config.big_store,
        "Starting"
    );

    let writer = match &config.database_url {
        Some(url) => {
            let store = PostgresDocumentStore::new(url).await?;
            store.initialize().await?;
            let writer = MetaWriter::new(Arc::new(store))
                .with_persist_jobs(config.pipeline.persist_jobs);
            Some(Arc::new(writer))
        }
        None => None,
    };

    let connections: Vec<Arc<MetaConnection>> = config
        .endpoints
        .iter()
        .cloned()
        .map(|endpoint| Arc::new(MetaConnection::new(endpoint, &config)))
        .collect();

    let cancel = CancellationToken::new();
    let tokens = flow_control_chain(connections.len());
    let startups: Vec<JoinHandle<Option<JoinHandle<()>>>> = connections
        .iter()
        .cloned()
        .zip(tokens)
        .map(|(connection, mut token)| {
            let writer = writer.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                match start_connection(&connection, &mut token, writer, cancel).await {
                    Ok(write_through) => write_through,
                    Err(err) => {
                        log_error(&format!("startup of {}", connection.name()), &err.to_string());
                        None
                    }
                }
            })
        })
        .collect();

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| MetaIndexerError::InternalError(format!("Failed to listen for ctrl-c: {e}")))?;
    tracing::info!("Shutting down");

    cancel.cancel();
    let mut write_through = Vec::new();
    for startup in startups {
        if !startup.is_finished() {
            startup.abort();
        }
        if let Ok(Some(handle)) = startup.await {
            write_through.push(handle);
        }
    }
    for connection in &connections {
        connection.teardown().await;
    }
    for handle in write_through {
        let _ = handle.await;
    }

    Ok(())
}

/// Loads in turn, persists the loaded state, then starts change feeds.
///
/// Returns the write-through task when persistence is enabled.
async fn start_connection(
    connection: &Arc<MetaConnection>,
    token: &mut metaplex_meta_indexer::FlowToken,
    writer: Option<Arc<MetaWriter>>,
    cancel: CancellationToken,
) -> Result<Option<JoinHandle<()>>> {
    connection.load_in_turn(token).await?;

    let write_through = match writer {
        Some(writer) => {
            let queued = writer.persist_state(&*connection.state().await)?;
            let written = writer.flush().await?;
            tracing::info!(connection = connection.name(), queued, written, "Loaded state persisted");

            // Subscribe before the feeds start so no change is missed.
            let changes = connection.changes();
            Some(spawn_write_through(Arc::clone(connection), writer, changes, cancel))
        }
        None => None,
    };

    connection.start_subscriptions().await?;
    Ok(write_through)
}

fn spawn_write_through(
    connection: Arc<MetaConnection>,
    writer: Arc<MetaWriter>,
    mut changes: broadcast::Receiver<ChangeEvent>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(FLUSH_INTERVAL);
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(err) = writer.flush().await {
                        log_error("write-through flush", &err.to_string());
                    }
                }
                event = changes.recv() => match event {
                    Ok(event) => {
                        let state = connection.state().await;
                        if let Err(err) = writer.persist_event(&event, &state) {
                            log_error("write-through persist", &err.to_string());
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(connection = connection.name(), missed, "Write-through lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }

        if let Err(err) = writer.flush().await {
            log_error("final flush", &err.to_string());
        }
    })
}
