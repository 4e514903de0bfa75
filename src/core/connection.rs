//! Lifecycle of one endpoint's state: create, load, subscribe, teardown.
//!
//! A [`MetaConnection`] owns an independent [`MetaState`]. The bulk load runs
//! at most once and is shared by every caller; change subscriptions start
//! only after it has resolved, so no change notification can race the scan.

use crate::config::{CommitmentLevel, EndpointConfig, MetaIndexerConfig, ProgramIds, RetryConfig};
use crate::core::flow_control::FlowToken;
use crate::core::loader::{BulkLoader, LoadOptions};
use crate::core::processor::AccountProcessor;
use crate::core::state::MetaState;
use crate::core::updater::IncrementalUpdater;
use crate::streams::websocket::WebSocketSource;
use crate::types::{ChangeEvent, KeyedAccount, StateProp};
use crate::utils::error::{MetaIndexerError, Result};
use crate::utils::logging::{log_error, log_startup};
use crate::utils::retry::{retry_with_backoff, RetryingRpcProvider};
use crate::utils::rpc::{DefaultRpcProvider, RpcProvider};
use futures_util::stream::{self, Stream};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, Mutex, OnceCell, RwLock, RwLockReadGuard};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// One endpoint's live marketplace state.
pub struct MetaConnection {
    endpoint: EndpointConfig,
    programs: ProgramIds,
    loader: BulkLoader,
    load_retry: RetryConfig,
    commitment: CommitmentLevel,
    reconnect_delay_secs: u64,
    state: Arc<RwLock<MetaState>>,
    loaded: OnceCell<()>,
    updater: Arc<IncrementalUpdater>,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl MetaConnection {
    /// Connection over the default RPC client, retrying transient RPC errors
    /// under `config.rpc_retry`.
    pub fn new(endpoint: EndpointConfig, config: &MetaIndexerConfig) -> Self {
        let raw = DefaultRpcProvider::new_with_commitment(
            &endpoint.rpc_url,
            config.commitment_level.into(),
        );
        let rpc: Arc<dyn RpcProvider> =
            Arc::new(RetryingRpcProvider::new(raw, config.rpc_retry.clone()));
        Self::with_rpc(endpoint, config, rpc)
    }

    /// Connection over a caller-supplied RPC provider.
    pub fn with_rpc(endpoint: EndpointConfig, config: &MetaIndexerConfig, rpc: Arc<dyn RpcProvider>) -> Self {
        let processor = AccountProcessor::new(config.programs, config.store_id);
        Self {
            endpoint,
            programs: config.programs,
            loader: BulkLoader::new(rpc, processor.clone(), LoadOptions::from(config)),
            load_retry: config.load_retry.clone(),
            commitment: config.commitment_level,
            reconnect_delay_secs: config.reconnect_delay_secs,
            state: Arc::new(RwLock::new(MetaState::new())),
            loaded: OnceCell::new(),
            updater: Arc::new(IncrementalUpdater::new(processor, config.include_all)),
            cancel: CancellationToken::new(),
            tasks: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.endpoint.name
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Runs the bulk load once; later and concurrent callers share its result.
    ///
    /// Transient failures retry the whole load under the load retry policy.
    /// A failed load is not memoized, so the next call starts over.
    ///
    /// # Errors
    ///
    /// Returns the load error once retries are spent or the error is permanent.
    #[tracing::instrument(skip_all, fields(connection = %self.endpoint.name))]
    pub async fn load(&self) -> Result<()> {
        self.loaded
            .get_or_try_init(|| async {
                log_startup(
                    &self.endpoint.name,
                    &self.endpoint.rpc_url,
                    self.loader.options().include_all,
                );
                let loaded =
                    retry_with_backoff(&self.load_retry, "bulk load", || self.loader.load()).await?;
                *self.state.write().await = loaded;
                Ok::<(), MetaIndexerError>(())
            })
            .await
            .map(|_| ())
    }

    /// Loads behind a flow-control token, then releases the next endpoint.
    ///
    /// The token is released even when the load fails so later endpoints are
    /// not starved.
    ///
    /// # Errors
    ///
    /// Returns the load error.
    pub async fn load_in_turn(&self, token: &mut FlowToken) -> Result<()> {
        token.wait().await;
        let result = self.load().await;
        if let Err(err) = &result {
            log_error(&format!("load of {}", self.endpoint.name), &err.to_string());
        }
        token.signal_done();
        result
    }

    /// Read access to the current state.
    pub async fn state(&self) -> RwLockReadGuard<'_, MetaState> {
        self.state.read().await
    }

    /// Shared handle to the state for long-lived readers.
    #[must_use]
    pub fn state_handle(&self) -> Arc<RwLock<MetaState>> {
        Arc::clone(&self.state)
    }

    /// Change events for one collection, optionally narrowed to one key.
    ///
    /// A subscriber that falls behind skips the events it missed.
    pub fn subscribe(&self, prop: StateProp, key: Option<String>) -> impl Stream<Item = ChangeEvent> {
        let receiver = self.updater.subscribe();
        stream::unfold(receiver, move |mut receiver| {
            let key = key.clone();
            async move {
                loop {
                    match receiver.recv().await {
                        Ok(event) if event.matches(prop, key.as_deref()) => {
                            return Some((event, receiver))
                        }
                        Ok(_) => {}
                        Err(RecvError::Lagged(missed)) => {
                            tracing::warn!(%prop, missed, "Change subscriber lagged");
                        }
                        Err(RecvError::Closed) => return None,
                    }
                }
            }
        })
    }

    /// Every change event, unfiltered.
    #[must_use]
    pub fn changes(&self) -> broadcast::Receiver<ChangeEvent> {
        self.updater.subscribe()
    }

    /// Applies one changed account from an external feed.
    ///
    /// Returns the number of change events published.
    pub async fn apply_change(&self, account: &KeyedAccount) -> usize {
        let mut state = self.state.write().await;
        self.updater.on_change_account(&mut state, account)
    }

    /// Loads if needed, then subscribes to account changes of every program.
    ///
    /// Each program gets its own task that reconnects after the reconnect
    /// delay until [`Self::teardown`] runs.
    ///
    /// # Errors
    ///
    /// Returns the load error; subscription failures are retried in the background.
    pub async fn start_subscriptions(&self) -> Result<()> {
        self.load().await?;

        let programs = self.programs;
        let mut tasks = self.tasks.lock().await;
        if !tasks.is_empty() {
            return Ok(());
        }

        for program in [
            programs.token_metadata,
            programs.vault,
            programs.auction,
            programs.metaplex,
        ] {
            let source = WebSocketSource::new(
                self.endpoint.ws_url.clone(),
                program,
                self.commitment,
                self.reconnect_delay_secs,
            );
            let updater = Arc::clone(&self.updater);
            let state = Arc::clone(&self.state);
            let cancel = self.cancel.child_token();
            let delay = Duration::from_secs(self.reconnect_delay_secs);
            let name = self.endpoint.name.clone();

            tasks.push(tokio::spawn(async move {
                let mut source = source;
                loop {
                    match updater.run(Arc::clone(&state), &mut source, cancel.clone()).await {
                        Ok(_) if cancel.is_cancelled() => break,
                        Ok(_) => tracing::warn!(connection = %name, %program, "Change feed ended"),
                        Err(err) => {
                            tracing::warn!(connection = %name, %program, error = %err, "Change feed failed");
                        }
                    }
                    tokio::select! {
                        () = cancel.cancelled() => break,
                        () = tokio::time::sleep(delay) => {}
                    }
                }
            }));
        }

        tracing::info!(connection = %self.endpoint.name, feeds = tasks.len(), "Subscriptions started");
        Ok(())
    }

    /// Stops every subscription task and waits for them to finish.
    pub async fn teardown(&self) {
        self.cancel.cancel();
        let tasks: Vec<_> = self.tasks.lock().await.drain(..).collect();
        for task in tasks {
            if let Err(err) = task.await {
                log_error("subscription task", &err.to_string());
            }
        }
        tracing::info!(connection = %self.endpoint.name, "Connection torn down");
    }
}
