//! One-shot bulk ingestion of the marketplace programs.
//!
//! The load runs in three phases:
//!
//! 1. Full scans of the vault, auction and metaplex programs, plus the
//!    whitelisted-creator scan, all in flight at once. When the creator scan
//!    finishes, metadata is fetched either per creator (memcmp filters) or,
//!    above the creator threshold, by scanning the whole metadata program.
//! 2. Every metadata record indexed by mint is re-evaluated against the store
//!    membership rule.
//! 3. After a per-creator load, the editions of the retained metadata are
//!    fetched in `getMultipleAccounts` batches.
//!
//! Any RPC failure aborts the load; undecodable accounts are skipped.

use crate::config::{MetaIndexerConfig, PipelineConfig};
use crate::core::decoders::metadata::{creator_offset, MAX_CREATOR_LIMIT};
use crate::core::decoders::metaplex::MAX_WHITELISTED_CREATOR_SIZE;
use crate::core::pipeline::{run_pipeline, PipelineOptions};
use crate::core::processor::AccountProcessor;
use crate::core::state::{MetaState, StateMutation};
use crate::types::KeyedAccount;
use crate::utils::error::{MetaIndexerError, Result};
use crate::utils::logging::log_section;
use crate::utils::rpc::RpcProvider;
use futures_util::stream;
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::future::ready;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Settings for one bulk load.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Disable store scoping.
    pub include_all: bool,
    /// Scan the whole metadata program up front.
    pub big_store: bool,
    pub commitment: CommitmentConfig,
    pub pipeline: PipelineConfig,
    /// Keys per `getMultipleAccounts` call in the editions pass.
    pub edition_batch_size: usize,
    /// Whitelisted creator count above which metadata is fully scanned.
    pub creator_scan_threshold: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            include_all: false,
            big_store: false,
            commitment: CommitmentConfig::confirmed(),
            pipeline: PipelineConfig::default(),
            edition_batch_size: 100,
            creator_scan_threshold: 3,
        }
    }
}

impl From<&MetaIndexerConfig> for LoadOptions {
    fn from(config: &MetaIndexerConfig) -> Self {
        Self {
            include_all: config.include_all,
            big_store: config.big_store,
            commitment: config.commitment_level.into(),
            pipeline: config.pipeline,
            edition_batch_size: config.edition_batch_size,
            creator_scan_threshold: config.creator_scan_threshold,
        }
    }
}

/// How metadata ended up being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataScan {
    /// The whole metadata program was scanned.
    Full,
    /// One memcmp-filtered scan per creator slot and whitelisted creator.
    ByCreator,
}

/// Drives a full load against one RPC endpoint.
pub struct BulkLoader {
    rpc: Arc<dyn RpcProvider>,
    processor: AccountProcessor,
    options: LoadOptions,
}

/// Loads every account in scope into a fresh [`MetaState`].
///
/// # Errors
///
/// Returns the first RPC error raised by any scan.
pub async fn load_accounts(
    rpc: Arc<dyn RpcProvider>,
    processor: AccountProcessor,
    options: LoadOptions,
) -> Result<MetaState> {
    BulkLoader::new(rpc, processor, options).load().await
}

fn lock(state: &Mutex<MetaState>) -> MutexGuard<'_, MetaState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn apply_all(state: &Mutex<MetaState>, mutations: Vec<StateMutation>) {
    if mutations.is_empty() {
        return;
    }
    let mut guard = lock(state);
    for mutation in mutations {
        guard.apply(mutation);
    }
}

impl BulkLoader {
    pub fn new(rpc: Arc<dyn RpcProvider>, processor: AccountProcessor, options: LoadOptions) -> Self {
        Self {
            rpc,
            processor,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Runs all three phases and returns the populated state.
    ///
    /// # Errors
    ///
    /// Returns the first RPC error raised by any scan or edition batch.
    #[tracing::instrument(
        skip_all,
        fields(include_all = self.options.include_all, big_store = self.options.big_store)
    )]
    pub async fn load(&self) -> Result<MetaState> {
        log_section("Bulk load");
        let state = Mutex::new(MetaState::new());
        let programs = *self.processor.programs();

        let vaults = self.scan(&programs.vault, None, "vaults", &state);
        let auctions = self.scan(&programs.auction, None, "auctions", &state);
        let metaplex = self.scan(&programs.metaplex, None, "metaplex", &state);
        let creators = async {
            let size_filter = RpcFilterType::DataSize(MAX_WHITELISTED_CREATOR_SIZE as u64);
            self.scan(&programs.metaplex, Some(vec![size_filter]), "whitelisted-creators", &state)
                .await?;
            self.load_creator_metadata(&state).await
        };
        let everything = async {
            if self.options.big_store {
                self.scan(&programs.token_metadata, None, "metadata", &state).await?;
            }
            Ok::<(), MetaIndexerError>(())
        };

        let (_, _, _, metadata_scan, ()) =
            tokio::try_join!(vaults, auctions, metaplex, creators, everything)?;

        self.process_metadata(&state).await?;

        if metadata_scan == MetadataScan::ByCreator {
            self.load_editions(&state).await?;
        }

        let state = state.into_inner().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(
            metadata = state.metadata().len(),
            master_editions = state.master_editions.len(),
            editions = state.editions.len(),
            auctions = state.auctions.len(),
            vaults = state.vaults.len(),
            auction_managers = state.auction_managers_by_auction.len(),
            store = state.store.is_some(),
            "Bulk load finished"
        );
        Ok(state)
    }

    fn pipeline_options(&self, label: &str, jobs: usize) -> PipelineOptions {
        PipelineOptions::new(label, jobs)
            .with_delay(Duration::from_millis(self.options.pipeline.item_delay_ms))
    }

    /// One `getProgramAccounts` call routed into the state.
    async fn scan(
        &self,
        program: &Pubkey,
        filters: Option<Vec<RpcFilterType>>,
        label: &str,
        state: &Mutex<MetaState>,
    ) -> Result<usize> {
        let accounts = self
            .rpc
            .get_program_accounts(program, filters, Some(self.options.commitment))
            .await?;
        tracing::debug!(scan = label, %program, fetched = accounts.len(), "Program scan returned");
        self.ingest(accounts, label, state).await
    }

    async fn ingest(
        &self,
        accounts: Vec<KeyedAccount>,
        label: &str,
        state: &Mutex<MetaState>,
    ) -> Result<usize> {
        let options = self.pipeline_options(label, self.options.pipeline.data_jobs);
        run_pipeline(stream::iter(accounts), &options, |account, _| {
            apply_all(state, self.processor.process(&account));
            ready(Ok(()))
        })
        .await
    }

    /// Fetches metadata once the whitelisted creators are known.
    async fn load_creator_metadata(&self, state: &Mutex<MetaState>) -> Result<MetadataScan> {
        if self.options.big_store {
            return Ok(MetadataScan::Full);
        }

        let program = self.processor.programs().token_metadata;
        let creators: Vec<Pubkey> = lock(state)
            .whitelisted_creators_by_creator
            .values()
            .map(|creator| creator.info.address)
            .collect();

        if creators.len() > self.options.creator_scan_threshold {
            tracing::info!(
                creators = creators.len(),
                threshold = self.options.creator_scan_threshold,
                "Too many creators for filtered scans, loading all metadata"
            );
            self.scan(&program, None, "metadata", state).await?;
            return Ok(MetadataScan::Full);
        }

        let queries: Vec<(Pubkey, usize)> = creators
            .iter()
            .flat_map(|creator| (0..MAX_CREATOR_LIMIT).map(move |slot| (*creator, slot)))
            .collect();
        tracing::info!(
            creators = creators.len(),
            queries = queries.len(),
            "Loading metadata by creator"
        );

        let options = self.pipeline_options("creator-metadata", self.options.pipeline.data_jobs);
        run_pipeline(stream::iter(queries), &options, |(creator, slot), _| async move {
            let filter = RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                creator_offset(slot),
                creator.as_ref(),
            ));
            self.scan(&program, Some(vec![filter]), "creator-metadata", state)
                .await
                .map(|_| ())
        })
        .await?;

        Ok(MetadataScan::ByCreator)
    }

    /// Applies the membership rule to every metadata record indexed by mint.
    async fn process_metadata(&self, state: &Mutex<MetaState>) -> Result<usize> {
        let candidates: Vec<_> = lock(state).metadata_by_mint.values().cloned().collect();
        let include_all = self.options.include_all;
        let options = self.pipeline_options("metadata", self.options.pipeline.metadata_jobs);

        run_pipeline(stream::iter(candidates), &options, |metadata, _| {
            lock(state).update_metadata(metadata, include_all);
            ready(Ok(()))
        })
        .await
    }

    /// Fetches the edition accounts referenced by retained metadata.
    async fn load_editions(&self, state: &Mutex<MetaState>) -> Result<usize> {
        let mut addresses: Vec<Pubkey> = lock(state)
            .metadata()
            .iter()
            .filter_map(|metadata| metadata.info.master_edition)
            .collect();
        addresses.sort_unstable();
        addresses.dedup();

        let batches: Vec<Vec<Pubkey>> = addresses
            .chunks(self.options.edition_batch_size.max(1))
            .map(<[Pubkey]>::to_vec)
            .collect();
        tracing::info!(
            editions = addresses.len(),
            batches = batches.len(),
            "Loading editions"
        );

        let commitment = self.options.commitment;
        let options = self.pipeline_options("editions", self.options.pipeline.data_jobs);
        run_pipeline(stream::iter(batches), &options, |batch, _| async move {
            let accounts = self
                .rpc
                .get_multiple_accounts(&batch, Some(commitment))
                .await?;
            let mutations: Vec<StateMutation> = batch
                .into_iter()
                .zip(accounts)
                .filter_map(|(pubkey, account)| account.map(|account| KeyedAccount::new(pubkey, account)))
                .flat_map(|account| self.processor.process(&account))
                .collect();
            apply_all(state, mutations);
            Ok(())
        })
        .await
    }
}
