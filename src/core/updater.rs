//! Applies account-change notifications to a loaded state.
//!
//! Changes go through the same [`AccountProcessor`] as the bulk load. Metadata
//! changes re-run the membership rule instead of overwriting blindly, since a
//! single change (a creator verifying, say) can flip membership either way.
//! Every applied change is published as a [`ChangeEvent`], and so is the
//! eviction of a previously indexed metadata record ([`ChangeEvent::removed`]).

use crate::core::processor::AccountProcessor;
use crate::core::state::{MetaState, StateMutation};
use crate::streams::AccountChangeSource;
use crate::types::{ChangeEvent, KeyedAccount};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio_util::sync::CancellationToken;

/// Buffered events per subscriber before the slowest one starts lagging.
pub const EVENT_CAPACITY: usize = 1024;

/// Single writer for a [`MetaState`] after its initial load.
#[derive(Debug)]
pub struct IncrementalUpdater {
    processor: AccountProcessor,
    include_all: bool,
    events: broadcast::Sender<ChangeEvent>,
}

impl IncrementalUpdater {
    pub fn new(processor: AccountProcessor, include_all: bool) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            processor,
            include_all,
            events,
        }
    }

    /// Receives every change applied from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// Applies one changed account and returns the number of events published.
    pub fn on_change_account(&self, state: &mut MetaState, account: &KeyedAccount) -> usize {
        let mut published = 0;

        for mutation in self.processor.process(account) {
            let applied = match mutation {
                StateMutation::MetadataByMint(key, metadata) => {
                    let previous = state.metadata_by_mint.get(&key).cloned();
                    if !state.update_metadata(metadata, self.include_all) {
                        // Only records that were indexed are announced as removed.
                        let Some(previous) = previous else {
                            continue;
                        };
                        tracing::debug!(mint = %key, "Metadata left the store");
                        let _ = self
                            .events
                            .send(ChangeEvent::removal(StateMutation::MetadataByMint(key, previous)));
                        published += 1;
                        continue;
                    }
                    // Publish the admitted record with its derived edition.
                    match state.metadata_by_mint.get(&key) {
                        Some(admitted) => StateMutation::MetadataByMint(key, admitted.clone()),
                        None => continue,
                    }
                }
                other => {
                    state.apply(other.clone());
                    other
                }
            };

            // No receivers is fine; the state is updated either way.
            let _ = self.events.send(ChangeEvent::from(applied));
            published += 1;
        }

        published
    }

    /// Drains `source` into `state` until it ends, fails, or `cancel` fires.
    ///
    /// Returns the number of changed accounts seen.
    ///
    /// # Errors
    ///
    /// Propagates the source error that ended the feed.
    pub async fn run<S>(
        &self,
        state: Arc<RwLock<MetaState>>,
        source: &mut S,
        cancel: CancellationToken,
    ) -> Result<usize>
    where
        S: AccountChangeSource + ?Sized,
    {
        let mut seen = 0usize;
        loop {
            let next = tokio::select! {
                () = cancel.cancelled() => break,
                next = source.next_change() => next?,
            };
            let Some(account) = next else {
                break;
            };

            seen += 1;
            let mut guard = state.write().await;
            let published = self.on_change_account(&mut guard, &account);
            tracing::trace!(
                source = source.source_name(),
                account = %account.pubkey,
                published,
                "Account change applied"
            );
        }

        tracing::debug!(source = source.source_name(), seen, "Change feed stopped");
        Ok(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgramIds;
    use crate::core::decoders::fixtures;
    use crate::types::StateProp;
    use crate::utils::error::MetaIndexerError;
    use async_trait::async_trait;
    use solana_sdk::account::Account;
    use solana_sdk::pubkey::Pubkey;
    use std::collections::VecDeque;
    use std::str::FromStr;

    struct ScriptedSource {
        changes: VecDeque<Result<Option<KeyedAccount>>>,
    }

    #[async_trait]
    impl AccountChangeSource for ScriptedSource {
        async fn next_change(&mut self) -> Result<Option<KeyedAccount>> {
            self.changes.pop_front().unwrap_or(Ok(None))
        }

        fn source_name(&self) -> &str {
            "scripted"
        }
    }

    fn keyed(pubkey: Pubkey, owner: Pubkey, data: &[u8]) -> KeyedAccount {
        KeyedAccount::new(
            pubkey,
            Account {
                lamports: 1,
                data: data.to_vec(),
                owner,
                executable: false,
                rent_epoch: 0,
            },
        )
    }

    fn metadata_account(verified: bool) -> KeyedAccount {
        let mut data = fixtures::METADATA.to_vec();
        // Verified flag of creator slot 0.
        data[crate::core::decoders::metadata::creator_offset(0) + 32] = u8::from(verified);
        keyed(
            Pubkey::from_str(fixtures::METADATA_PUBKEY).unwrap(),
            ProgramIds::default().token_metadata,
            &data,
        )
    }

    fn public_store_state() -> MetaState {
        let programs = ProgramIds::default();
        let mut state = MetaState::new();
        let mut store = fixtures::STORE.to_vec();
        store[1] = 1;
        let processor = AccountProcessor::new(programs, Some(Pubkey::from_str(fixtures::STORE_PUBKEY).unwrap()));
        for mutation in processor.process(&keyed(
            Pubkey::from_str(fixtures::STORE_PUBKEY).unwrap(),
            programs.metaplex,
            &store,
        )) {
            state.apply(mutation);
        }
        assert!(state.store.as_ref().is_some_and(|s| s.info.public));
        state
    }

    fn updater() -> IncrementalUpdater {
        IncrementalUpdater::new(
            AccountProcessor::new(
                ProgramIds::default(),
                Some(Pubkey::from_str(fixtures::STORE_PUBKEY).unwrap()),
            ),
            false,
        )
    }

    #[test]
    fn test_plain_change_is_applied_and_published() {
        let updater = updater();
        let mut events = updater.subscribe();
        let mut state = MetaState::new();

        let auction = keyed(
            Pubkey::from_str(fixtures::AUCTION_PUBKEY).unwrap(),
            ProgramIds::default().auction,
            fixtures::AUCTION,
        );
        assert_eq!(updater.on_change_account(&mut state, &auction), 1);
        assert!(state.auctions.contains_key(fixtures::AUCTION_PUBKEY));

        let event = events.try_recv().unwrap();
        assert!(event.matches(StateProp::Auctions, Some(fixtures::AUCTION_PUBKEY)));
    }

    #[test]
    fn test_metadata_change_reevaluates_membership() {
        let updater = updater();
        let mut events = updater.subscribe();
        let mut state = public_store_state();

        assert_eq!(updater.on_change_account(&mut state, &metadata_account(true)), 1);
        assert_eq!(state.metadata().len(), 1);
        let event = events.try_recv().unwrap();
        assert_eq!(event.prop, StateProp::MetadataByMint);
        match event.mutation {
            StateMutation::MetadataByMint(_, metadata) => {
                assert!(metadata.info.master_edition.is_some());
            }
            other => panic!("unexpected mutation {other:?}"),
        }

        // Every creator unverified: the record falls out everywhere.
        let mut data = metadata_account(false);
        for slot in 0..4 {
            data.account.data[crate::core::decoders::metadata::creator_offset(slot) + 32] = 0;
        }
        assert_eq!(updater.on_change_account(&mut state, &data), 1);
        assert!(state.metadata().is_empty());
        assert!(state.metadata_by_mint.is_empty());
        assert!(state.metadata_by_master_edition.is_empty());

        let removal = events.try_recv().unwrap();
        assert!(removal.removed);
        assert_eq!(removal.prop, StateProp::MetadataByMint);
        match removal.mutation {
            StateMutation::MetadataByMint(_, metadata) => {
                assert_eq!(metadata.pubkey.to_string(), fixtures::METADATA_PUBKEY);
            }
            other => panic!("unexpected mutation {other:?}"),
        }

        // A non-member that was never indexed is dropped without an event.
        assert_eq!(updater.on_change_account(&mut state, &data), 0);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_foreign_account_publishes_nothing() {
        let updater = updater();
        let mut state = MetaState::new();
        let foreign = keyed(Pubkey::new_unique(), Pubkey::new_unique(), fixtures::AUCTION);
        assert_eq!(updater.on_change_account(&mut state, &foreign), 0);
    }

    #[tokio::test]
    async fn test_run_drains_source() {
        let updater = updater();
        let state = Arc::new(RwLock::new(MetaState::new()));
        let programs = ProgramIds::default();
        let mut source = ScriptedSource {
            changes: VecDeque::from(vec![
                Ok(Some(keyed(Pubkey::new_unique(), programs.vault, fixtures::VAULT))),
                Ok(Some(keyed(Pubkey::new_unique(), programs.vault, fixtures::SAFETY_DEPOSIT_BOX))),
            ]),
        };

        let seen = updater
            .run(state.clone(), &mut source, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(seen, 2);
        let state = state.read().await;
        assert_eq!(state.vaults.len(), 1);
        assert_eq!(state.safety_deposit_boxes_by_vault_and_index.len(), 1);
    }

    #[tokio::test]
    async fn test_run_propagates_source_error() {
        let updater = updater();
        let mut source = ScriptedSource {
            changes: VecDeque::from(vec![Err(MetaIndexerError::ConnectionError("closed".into()))]),
        };
        let result = updater
            .run(Arc::new(RwLock::new(MetaState::new())), &mut source, CancellationToken::new())
            .await;
        assert!(matches!(result, Err(MetaIndexerError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_run_stops_on_cancel() {
        struct Pending;

        #[async_trait]
        impl AccountChangeSource for Pending {
            async fn next_change(&mut self) -> Result<Option<KeyedAccount>> {
                std::future::pending().await
            }

            fn source_name(&self) -> &str {
                "pending"
            }
        }

        let updater = updater();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let seen = updater
            .run(Arc::new(RwLock::new(MetaState::new())), &mut Pending, cancel)
            .await
            .unwrap();
        assert_eq!(seen, 0);
    }
}
