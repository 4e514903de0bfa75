//! Routes raw accounts to state mutations.
//!
//! The bulk loader and the incremental updater share this one path, so a
//! record decoded from a full scan and the same record arriving as a change
//! notification always produce identical mutations.

use crate::config::ProgramIds;
use crate::core::decoders::metadata::{is_valid_http_url, MasterEdition};
use crate::core::decoders::metaplex::whitelisted_creator_address;
use crate::core::decoders::{
    try_decode_account, AuctionAccount, DecodedAccount, MetadataAccount, MetaplexAccount,
    VaultAccount,
};
use crate::core::state::StateMutation;
use crate::types::{KeyedAccount, ParsedAccount};
use solana_sdk::pubkey::Pubkey;

/// Turns accounts of the four marketplace programs into [`StateMutation`]s.
#[derive(Debug, Clone)]
pub struct AccountProcessor {
    programs: ProgramIds,
    store_id: Option<Pubkey>,
}

impl AccountProcessor {
    pub fn new(programs: ProgramIds, store_id: Option<Pubkey>) -> Self {
        Self { programs, store_id }
    }

    #[must_use]
    pub fn programs(&self) -> &ProgramIds {
        &self.programs
    }

    #[must_use]
    pub fn store_id(&self) -> Option<&Pubkey> {
        self.store_id.as_ref()
    }

    /// Mutations for one account; empty when it is foreign, undecodable, or
    /// out of the configured store's scope.
    #[must_use]
    pub fn process(&self, account: &KeyedAccount) -> Vec<StateMutation> {
        match try_decode_account(&self.programs, account) {
            Some(DecodedAccount::Metadata(record)) => metadata_mutations(account, record),
            Some(DecodedAccount::Vault(record)) => vault_mutations(account, record),
            Some(DecodedAccount::Auction(record)) => auction_mutations(account, record),
            Some(DecodedAccount::Metaplex(record)) => self.metaplex_mutations(account, record),
            None => Vec::new(),
        }
    }

    fn metaplex_mutations(&self, source: &KeyedAccount, record: MetaplexAccount) -> Vec<StateMutation> {
        let key = source.pubkey.to_string();
        match record {
            MetaplexAccount::Store(store) => {
                let parsed = ParsedAccount::from_keyed(source, store);
                let mut mutations = Vec::with_capacity(2);
                if self.store_id == Some(source.pubkey) {
                    mutations.push(StateMutation::Store(key.clone(), parsed.clone()));
                }
                mutations.push(StateMutation::Stores(key, parsed));
                mutations
            }
            MetaplexAccount::WhitelistedCreator(creator) => {
                let Some(store) = self.store_id else {
                    return Vec::new();
                };
                let expected = whitelisted_creator_address(&self.programs.metaplex, &store, &creator.address);
                if expected != source.pubkey {
                    return Vec::new();
                }
                vec![StateMutation::WhitelistedCreatorsByCreator(
                    creator.address.to_string(),
                    ParsedAccount::from_keyed(source, creator),
                )]
            }
            MetaplexAccount::AuctionManager(manager) => {
                if self.store_id != Some(manager.store) {
                    return Vec::new();
                }
                vec![StateMutation::AuctionManagersByAuction(
                    manager.auction.to_string(),
                    ParsedAccount::from_keyed(source, manager),
                )]
            }
            MetaplexAccount::BidRedemptionTicket(ticket) => {
                let winner_key = ticket.winner_key();
                let parsed = ParsedAccount::from_keyed(source, ticket);
                let mut mutations = Vec::with_capacity(2);
                if let Some(winner_key) = winner_key {
                    mutations.push(StateMutation::BidRedemptionV2sByAuctionManagerAndWinningIndex(
                        winner_key,
                        parsed.clone(),
                    ));
                }
                mutations.push(StateMutation::BidRedemptions(key, parsed));
                mutations
            }
            MetaplexAccount::PayoutTicket(ticket) => {
                vec![StateMutation::PayoutTickets(key, ParsedAccount::from_keyed(source, ticket))]
            }
            MetaplexAccount::PrizeTrackingTicket(ticket) => vec![StateMutation::PrizeTrackingTickets(
                key,
                ParsedAccount::from_keyed(source, ticket),
            )],
            MetaplexAccount::SafetyDepositConfig(config) => {
                vec![StateMutation::SafetyDepositConfigsByAuctionManagerAndIndex(
                    config.index_key(),
                    ParsedAccount::from_keyed(source, config),
                )]
            }
        }
    }
}

fn metadata_mutations(source: &KeyedAccount, record: MetadataAccount) -> Vec<StateMutation> {
    let key = source.pubkey.to_string();
    match record {
        MetadataAccount::Metadata(metadata) => {
            if !is_valid_http_url(&metadata.data.uri) {
                tracing::trace!(account = %source.pubkey, "Skipping metadata with invalid uri");
                return Vec::new();
            }
            let mint = metadata.mint.to_string();
            vec![StateMutation::MetadataByMint(
                mint,
                ParsedAccount::from_keyed(source, metadata),
            )]
        }
        MetadataAccount::Edition(edition) => {
            vec![StateMutation::Editions(key, ParsedAccount::from_keyed(source, edition))]
        }
        MetadataAccount::MasterEditionV1(master) => {
            let printing_mint = master.printing_mint.to_string();
            let auth_mint = master.one_time_printing_authorization_mint.to_string();
            let parsed = ParsedAccount::from_keyed(source, MasterEdition::V1(master));
            vec![
                StateMutation::MasterEditions(key, parsed.clone()),
                StateMutation::MasterEditionsByPrintingMint(printing_mint, parsed.clone()),
                StateMutation::MasterEditionsByOneTimeAuthMint(auth_mint, parsed),
            ]
        }
        MetadataAccount::MasterEditionV2(master) => vec![StateMutation::MasterEditions(
            key,
            ParsedAccount::from_keyed(source, MasterEdition::V2(master)),
        )],
    }
}

fn vault_mutations(source: &KeyedAccount, record: VaultAccount) -> Vec<StateMutation> {
    match record {
        VaultAccount::Vault(vault) => vec![StateMutation::Vaults(
            source.pubkey.to_string(),
            ParsedAccount::from_keyed(source, vault),
        )],
        VaultAccount::SafetyDepositBox(deposit) => {
            vec![StateMutation::SafetyDepositBoxesByVaultAndIndex(
                deposit.index_key(),
                ParsedAccount::from_keyed(source, deposit),
            )]
        }
    }
}

fn auction_mutations(source: &KeyedAccount, record: AuctionAccount) -> Vec<StateMutation> {
    let key = source.pubkey.to_string();
    match record {
        AuctionAccount::AuctionData(auction) => {
            vec![StateMutation::Auctions(key, ParsedAccount::from_keyed(source, auction))]
        }
        AuctionAccount::AuctionDataExtended(extended) => vec![StateMutation::AuctionDataExtended(
            key,
            ParsedAccount::from_keyed(source, extended),
        )],
        AuctionAccount::BidderMetadata(bidder) => {
            vec![StateMutation::BidderMetadataByAuctionAndBidder(
                bidder.index_key(),
                ParsedAccount::from_keyed(source, bidder),
            )]
        }
        AuctionAccount::BidderPot(pot) => vec![StateMutation::BidderPotsByAuctionAndBidder(
            pot.index_key(),
            ParsedAccount::from_keyed(source, pot),
        )],
    }
}
