//! In-memory normalized index of marketplace accounts.
//!
//! [`MetaState`] is mutated through exactly two entry points:
//!
//! - [`MetaState::apply`], the single setter every processor goes through.
//! - [`MetaState::update_metadata`], which re-evaluates one metadata record
//!   against the store-membership rule and keeps every metadata
//!   cross-reference consistent.

use crate::core::decoders::auction::{AuctionData, AuctionDataExtended, BidderMetadata, BidderPot};
use crate::core::decoders::metadata::{Edition, MasterEdition, Metadata};
use crate::core::decoders::metaplex::{
    AuctionManager, BidRedemptionTicket, PayoutTicket, PrizeTrackingTicket, SafetyDepositConfig,
    Store, WhitelistedCreator,
};
use crate::core::decoders::vault::{SafetyDepositBox, Vault};
use crate::types::{ParsedAccount, StateProp};
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;

/// Keyed collection of decoded records.
pub type AccountMap<T> = HashMap<String, ParsedAccount<T>>;

/// One write into the state store.
///
/// Each variant names the collection it targets and carries the key and the
/// record, so a mutation can never put a record into the wrong map.
#[derive(Debug, Clone, PartialEq)]
pub enum StateMutation {
    MetadataByMint(String, ParsedAccount<Metadata>),
    Editions(String, ParsedAccount<Edition>),
    MasterEditions(String, ParsedAccount<MasterEdition>),
    MasterEditionsByPrintingMint(String, ParsedAccount<MasterEdition>),
    MasterEditionsByOneTimeAuthMint(String, ParsedAccount<MasterEdition>),
    AuctionManagersByAuction(String, ParsedAccount<AuctionManager>),
    Auctions(String, ParsedAccount<AuctionData>),
    AuctionDataExtended(String, ParsedAccount<AuctionDataExtended>),
    Vaults(String, ParsedAccount<Vault>),
    SafetyDepositBoxesByVaultAndIndex(String, ParsedAccount<SafetyDepositBox>),
    BidderMetadataByAuctionAndBidder(String, ParsedAccount<BidderMetadata>),
    BidderPotsByAuctionAndBidder(String, ParsedAccount<BidderPot>),
    BidRedemptions(String, ParsedAccount<BidRedemptionTicket>),
    BidRedemptionV2sByAuctionManagerAndWinningIndex(String, ParsedAccount<BidRedemptionTicket>),
    SafetyDepositConfigsByAuctionManagerAndIndex(String, ParsedAccount<SafetyDepositConfig>),
    PayoutTickets(String, ParsedAccount<PayoutTicket>),
    PrizeTrackingTickets(String, ParsedAccount<PrizeTrackingTicket>),
    Stores(String, ParsedAccount<Store>),
    /// Replaces the singleton store slot.
    Store(String, ParsedAccount<Store>),
    WhitelistedCreatorsByCreator(String, ParsedAccount<WhitelistedCreator>),
}

impl StateMutation {
    #[must_use]
    pub fn prop(&self) -> StateProp {
        match self {
            Self::MetadataByMint(..) => StateProp::MetadataByMint,
            Self::Editions(..) => StateProp::Editions,
            Self::MasterEditions(..) => StateProp::MasterEditions,
            Self::MasterEditionsByPrintingMint(..) => StateProp::MasterEditionsByPrintingMint,
            Self::MasterEditionsByOneTimeAuthMint(..) => StateProp::MasterEditionsByOneTimeAuthMint,
            Self::AuctionManagersByAuction(..) => StateProp::AuctionManagersByAuction,
            Self::Auctions(..) => StateProp::Auctions,
            Self::AuctionDataExtended(..) => StateProp::AuctionDataExtended,
            Self::Vaults(..) => StateProp::Vaults,
            Self::SafetyDepositBoxesByVaultAndIndex(..) => {
                StateProp::SafetyDepositBoxesByVaultAndIndex
            }
            Self::BidderMetadataByAuctionAndBidder(..) => StateProp::BidderMetadataByAuctionAndBidder,
            Self::BidderPotsByAuctionAndBidder(..) => StateProp::BidderPotsByAuctionAndBidder,
            Self::BidRedemptions(..) => StateProp::BidRedemptions,
            Self::BidRedemptionV2sByAuctionManagerAndWinningIndex(..) => {
                StateProp::BidRedemptionV2sByAuctionManagerAndWinningIndex
            }
            Self::SafetyDepositConfigsByAuctionManagerAndIndex(..) => {
                StateProp::SafetyDepositConfigsByAuctionManagerAndIndex
            }
            Self::PayoutTickets(..) => StateProp::PayoutTickets,
            Self::PrizeTrackingTickets(..) => StateProp::PrizeTrackingTickets,
            Self::Stores(..) => StateProp::Stores,
            Self::Store(..) => StateProp::Store,
            Self::WhitelistedCreatorsByCreator(..) => StateProp::WhitelistedCreatorsByCreator,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::MetadataByMint(key, _) => key,
            Self::Editions(key, _) => key,
            Self::MasterEditions(key, _)
            | Self::MasterEditionsByPrintingMint(key, _)
            | Self::MasterEditionsByOneTimeAuthMint(key, _) => key,
            Self::AuctionManagersByAuction(key, _) => key,
            Self::Auctions(key, _) => key,
            Self::AuctionDataExtended(key, _) => key,
            Self::Vaults(key, _) => key,
            Self::SafetyDepositBoxesByVaultAndIndex(key, _) => key,
            Self::BidderMetadataByAuctionAndBidder(key, _) => key,
            Self::BidderPotsByAuctionAndBidder(key, _) => key,
            Self::BidRedemptions(key, _)
            | Self::BidRedemptionV2sByAuctionManagerAndWinningIndex(key, _) => key,
            Self::SafetyDepositConfigsByAuctionManagerAndIndex(key, _) => key,
            Self::PayoutTickets(key, _) => key,
            Self::PrizeTrackingTickets(key, _) => key,
            Self::Stores(key, _) | Self::Store(key, _) => key,
            Self::WhitelistedCreatorsByCreator(key, _) => key,
        }
    }
}

/// Snapshot of every marketplace account the ingestion layer has seen.
#[derive(Debug, Clone, Default)]
pub struct MetaState {
    metadata: Vec<ParsedAccount<Metadata>>,
    metadata_positions: HashMap<Pubkey, usize>,
    pub metadata_by_mint: AccountMap<Metadata>,
    pub metadata_by_master_edition: AccountMap<Metadata>,
    pub editions: AccountMap<Edition>,
    pub master_editions: AccountMap<MasterEdition>,
    pub master_editions_by_printing_mint: AccountMap<MasterEdition>,
    pub master_editions_by_one_time_auth_mint: AccountMap<MasterEdition>,
    pub auction_managers_by_auction: AccountMap<AuctionManager>,
    pub auctions: AccountMap<AuctionData>,
    pub auction_data_extended: AccountMap<AuctionDataExtended>,
    pub vaults: AccountMap<Vault>,
    pub safety_deposit_boxes_by_vault_and_index: AccountMap<SafetyDepositBox>,
    pub bidder_metadata_by_auction_and_bidder: AccountMap<BidderMetadata>,
    pub bidder_pots_by_auction_and_bidder: AccountMap<BidderPot>,
    pub bid_redemptions: AccountMap<BidRedemptionTicket>,
    pub bid_redemption_v2s_by_auction_manager_and_winning_index: AccountMap<BidRedemptionTicket>,
    pub safety_deposit_configs_by_auction_manager_and_index: AccountMap<SafetyDepositConfig>,
    pub payout_tickets: AccountMap<PayoutTicket>,
    pub prize_tracking_tickets: AccountMap<PrizeTrackingTicket>,
    pub stores: AccountMap<Store>,
    pub store: Option<ParsedAccount<Store>>,
    pub whitelisted_creators_by_creator: AccountMap<WhitelistedCreator>,
}

impl MetaState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata records admitted to the store, one per metadata account.
    #[must_use]
    pub fn metadata(&self) -> &[ParsedAccount<Metadata>] {
        &self.metadata
    }

    /// The setter: writes one record into the collection its mutation names.
    ///
    /// The store slot is replaced unconditionally; every other collection is
    /// an upsert by key (last write wins).
    pub fn apply(&mut self, mutation: StateMutation) {
        match mutation {
            StateMutation::MetadataByMint(key, value) => {
                self.metadata_by_mint.insert(key, value);
            }
            StateMutation::Editions(key, value) => {
                self.editions.insert(key, value);
            }
            StateMutation::MasterEditions(key, value) => {
                self.master_editions.insert(key, value);
            }
            StateMutation::MasterEditionsByPrintingMint(key, value) => {
                self.master_editions_by_printing_mint.insert(key, value);
            }
            StateMutation::MasterEditionsByOneTimeAuthMint(key, value) => {
                self.master_editions_by_one_time_auth_mint.insert(key, value);
            }
            StateMutation::AuctionManagersByAuction(key, value) => {
                self.auction_managers_by_auction.insert(key, value);
            }
            StateMutation::Auctions(key, value) => {
                self.auctions.insert(key, value);
            }
            StateMutation::AuctionDataExtended(key, value) => {
                self.auction_data_extended.insert(key, value);
            }
            StateMutation::Vaults(key, value) => {
                self.vaults.insert(key, value);
            }
            StateMutation::SafetyDepositBoxesByVaultAndIndex(key, value) => {
                self.safety_deposit_boxes_by_vault_and_index.insert(key, value);
            }
            StateMutation::BidderMetadataByAuctionAndBidder(key, value) => {
                self.bidder_metadata_by_auction_and_bidder.insert(key, value);
            }
            StateMutation::BidderPotsByAuctionAndBidder(key, value) => {
                self.bidder_pots_by_auction_and_bidder.insert(key, value);
            }
            StateMutation::BidRedemptions(key, value) => {
                self.bid_redemptions.insert(key, value);
            }
            StateMutation::BidRedemptionV2sByAuctionManagerAndWinningIndex(key, value) => {
                self.bid_redemption_v2s_by_auction_manager_and_winning_index
                    .insert(key, value);
            }
            StateMutation::SafetyDepositConfigsByAuctionManagerAndIndex(key, value) => {
                self.safety_deposit_configs_by_auction_manager_and_index
                    .insert(key, value);
            }
            StateMutation::PayoutTickets(key, value) => {
                self.payout_tickets.insert(key, value);
            }
            StateMutation::PrizeTrackingTickets(key, value) => {
                self.prize_tracking_tickets.insert(key, value);
            }
            StateMutation::Stores(key, value) => {
                self.stores.insert(key, value);
            }
            StateMutation::Store(_, value) => {
                self.store = Some(value);
            }
            StateMutation::WhitelistedCreatorsByCreator(key, value) => {
                self.whitelisted_creators_by_creator.insert(key, value);
            }
        }
    }

    /// Re-evaluates `metadata` against the configured store.
    ///
    /// A member gets its derived edition address filled in and is indexed by
    /// mint, by master edition and in the flat list. A non-member is evicted
    /// from all three. Returns whether the record is a member.
    pub fn update_metadata(&mut self, mut metadata: ParsedAccount<Metadata>, include_all: bool) -> bool {
        let mint = metadata.info.mint.to_string();
        let member = is_metadata_part_of_store(
            &metadata.info,
            self.store.as_ref().map(|store| &store.info),
            &self.whitelisted_creators_by_creator,
            include_all,
        );

        if !member {
            self.evict_metadata(&metadata);
            return false;
        }

        let edition = metadata.info.edition_address(&metadata.owner);
        metadata.info.master_edition = Some(edition);
        metadata.info.edition = Some(edition);

        self.metadata_by_master_edition
            .insert(edition.to_string(), metadata.clone());
        self.upsert_metadata_list(metadata.clone());
        self.metadata_by_mint.insert(mint, metadata);
        true
    }

    /// Re-runs [`Self::update_metadata`] over every record indexed by mint.
    pub fn post_process_metadata(&mut self, include_all: bool) {
        let candidates: Vec<_> = self.metadata_by_mint.values().cloned().collect();
        for metadata in candidates {
            self.update_metadata(metadata, include_all);
        }
    }

    fn evict_metadata(&mut self, metadata: &ParsedAccount<Metadata>) {
        let mint = metadata.info.mint;
        let removed = self.metadata_by_mint.remove(&mint.to_string());

        if !self.metadata_by_master_edition.is_empty() {
            let edition = removed
                .as_ref()
                .and_then(|previous| previous.info.master_edition)
                .unwrap_or_else(|| metadata.info.edition_address(&metadata.owner));
            let key = edition.to_string();
            if self
                .metadata_by_master_edition
                .get(&key)
                .is_some_and(|indexed| indexed.info.mint == mint)
            {
                self.metadata_by_master_edition.remove(&key);
            }
        }

        self.remove_from_metadata_list(&metadata.pubkey);
    }

    fn upsert_metadata_list(&mut self, metadata: ParsedAccount<Metadata>) {
        match self.metadata_positions.get(&metadata.pubkey) {
            Some(&position) => self.metadata[position] = metadata,
            None => {
                self.metadata_positions
                    .insert(metadata.pubkey, self.metadata.len());
                self.metadata.push(metadata);
            }
        }
    }

    fn remove_from_metadata_list(&mut self, pubkey: &Pubkey) {
        let Some(position) = self.metadata_positions.remove(pubkey) else {
            return;
        };
        self.metadata.swap_remove(position);
        if let Some(moved) = self.metadata.get(position) {
            self.metadata_positions.insert(moved.pubkey, position);
        }
    }
}

/// Store-membership rule for metadata.
///
/// `include_all` admits everything. Otherwise the record needs a store and at
/// least one verified creator who is either in a public store or has an
/// activated whitelist entry.
#[must_use]
pub fn is_metadata_part_of_store(
    metadata: &Metadata,
    store: Option<&Store>,
    whitelisted_creators_by_creator: &AccountMap<WhitelistedCreator>,
    include_all: bool,
) -> bool {
    if include_all {
        return true;
    }
    let Some(store) = store else {
        return false;
    };

    metadata.creators().iter().any(|creator| {
        creator.verified
            && (store.public
                || whitelisted_creators_by_creator
                    .get(&creator.address.to_string())
                    .is_some_and(|entry| entry.info.activated))
    })
}
