use crate::core::state::StateMutation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the keyed collections inside [`crate::core::state::MetaState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateProp {
    MetadataByMint,
    MetadataByMasterEdition,
    Editions,
    MasterEditions,
    MasterEditionsByPrintingMint,
    MasterEditionsByOneTimeAuthMint,
    AuctionManagersByAuction,
    Auctions,
    AuctionDataExtended,
    Vaults,
    SafetyDepositBoxesByVaultAndIndex,
    BidderMetadataByAuctionAndBidder,
    BidderPotsByAuctionAndBidder,
    BidRedemptions,
    BidRedemptionV2sByAuctionManagerAndWinningIndex,
    SafetyDepositConfigsByAuctionManagerAndIndex,
    PayoutTickets,
    PrizeTrackingTickets,
    Stores,
    Store,
    WhitelistedCreatorsByCreator,
}

impl StateProp {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MetadataByMint => "metadataByMint",
            Self::MetadataByMasterEdition => "metadataByMasterEdition",
            Self::Editions => "editions",
            Self::MasterEditions => "masterEditions",
            Self::MasterEditionsByPrintingMint => "masterEditionsByPrintingMint",
            Self::MasterEditionsByOneTimeAuthMint => "masterEditionsByOneTimeAuthMint",
            Self::AuctionManagersByAuction => "auctionManagersByAuction",
            Self::Auctions => "auctions",
            Self::AuctionDataExtended => "auctionDataExtended",
            Self::Vaults => "vaults",
            Self::SafetyDepositBoxesByVaultAndIndex => "safetyDepositBoxesByVaultAndIndex",
            Self::BidderMetadataByAuctionAndBidder => "bidderMetadataByAuctionAndBidder",
            Self::BidderPotsByAuctionAndBidder => "bidderPotsByAuctionAndBidder",
            Self::BidRedemptions => "bidRedemptions",
            Self::BidRedemptionV2sByAuctionManagerAndWinningIndex => {
                "bidRedemptionV2sByAuctionManagerAndWinningIndex"
            }
            Self::SafetyDepositConfigsByAuctionManagerAndIndex => {
                "safetyDepositConfigsByAuctionManagerAndIndex"
            }
            Self::PayoutTickets => "payoutTickets",
            Self::PrizeTrackingTickets => "prizeTrackingTickets",
            Self::Stores => "stores",
            Self::Store => "store",
            Self::WhitelistedCreatorsByCreator => "whitelistedCreatorsByCreator",
        }
    }
}

impl fmt::Display for StateProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change applied to a live state store, as seen by subscribers.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub prop: StateProp,
    pub key: String,
    pub mutation: StateMutation,
    /// Set when `mutation` carries the last indexed version of a record that
    /// has just been evicted.
    pub removed: bool,
}

impl From<StateMutation> for ChangeEvent {
    fn from(mutation: StateMutation) -> Self {
        Self {
            prop: mutation.prop(),
            key: mutation.key().to_string(),
            mutation,
            removed: false,
        }
    }
}

impl ChangeEvent {
    /// An eviction of the record `mutation` last stored.
    #[must_use]
    pub fn removal(mutation: StateMutation) -> Self {
        Self {
            removed: true,
            ..Self::from(mutation)
        }
    }

    /// Whether this event matches a `(prop, key)` subscription; `None` matches every key.
    #[must_use]
    pub fn matches(&self, prop: StateProp, key: Option<&str>) -> bool {
        self.prop == prop && key.map_or(true, |key| key == self.key)
    }
}
