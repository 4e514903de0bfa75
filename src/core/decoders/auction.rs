//! Auction program records.
//!
//! The auction program writes no tag byte; records are told apart by their
//! exact account size, and anything that is not one of the fixed-size kinds
//! is an [`AuctionData`].

use super::{decode_prefix, RecordKind};
use crate::utils::error::DecodeError;
use borsh::BorshDeserialize;
use solana_sdk::pubkey::Pubkey;

pub const AUCTION_DATA_EXTENDED_LEN: usize = 8 + 9 + 2 + 9 + 33 + 158;
pub const BIDDER_METADATA_LEN: usize = 32 + 32 + 8 + 8 + 1;
pub const BIDDER_POT_LEN: usize = 32 + 32 + 32 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshDeserialize)]
pub enum AuctionState {
    Created,
    Started,
    Ended,
}

#[derive(BorshDeserialize)]
enum RawPriceFloor {
    // Unused bytes, still part of the layout.
    None(#[allow(dead_code)] [u8; 32]),
    MinimumPrice([u8; 32]),
    BlindedPrice([u8; 32]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceFloor {
    None,
    /// Minimum accepted bid, in lamports of the auction mint.
    Minimum(u64),
    /// Hash of a price revealed after the auction.
    Blinded([u8; 32]),
}

impl From<RawPriceFloor> for PriceFloor {
    fn from(raw: RawPriceFloor) -> Self {
        match raw {
            RawPriceFloor::None(_) => PriceFloor::None,
            RawPriceFloor::MinimumPrice(hash) => {
                let mut amount = [0u8; 8];
                amount.copy_from_slice(&hash[..8]);
                PriceFloor::Minimum(u64::from_le_bytes(amount))
            }
            RawPriceFloor::BlindedPrice(hash) => PriceFloor::Blinded(hash),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct Bid {
    pub bidder: Pubkey,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub enum BidState {
    EnglishAuction { bids: Vec<Bid>, max: u64 },
    OpenEdition { bids: Vec<Bid>, max: u64 },
}

impl BidState {
    #[must_use]
    pub fn bids(&self) -> &[Bid] {
        match self {
            BidState::EnglishAuction { bids, .. } | BidState::OpenEdition { bids, .. } => bids,
        }
    }

    /// Number of winning places.
    #[must_use]
    pub fn max(&self) -> u64 {
        match self {
            BidState::EnglishAuction { max, .. } | BidState::OpenEdition { max, .. } => *max,
        }
    }
}

#[derive(BorshDeserialize)]
struct RawAuctionData {
    authority: Pubkey,
    token_mint: Pubkey,
    last_bid: Option<i64>,
    ended_at: Option<i64>,
    end_auction_at: Option<i64>,
    end_auction_gap: Option<i64>,
    price_floor: RawPriceFloor,
    state: AuctionState,
    bid_state: BidState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionData {
    pub authority: Pubkey,
    pub token_mint: Pubkey,
    pub last_bid: Option<i64>,
    pub ended_at: Option<i64>,
    /// Absolute end time, or a duration before the auction starts.
    pub end_auction_at: Option<i64>,
    pub end_auction_gap: Option<i64>,
    pub price_floor: PriceFloor,
    pub state: AuctionState,
    pub bid_state: BidState,
}

impl From<RawAuctionData> for AuctionData {
    fn from(raw: RawAuctionData) -> Self {
        Self {
            authority: raw.authority,
            token_mint: raw.token_mint,
            last_bid: raw.last_bid,
            ended_at: raw.ended_at,
            end_auction_at: raw.end_auction_at,
            end_auction_gap: raw.end_auction_gap,
            price_floor: raw.price_floor.into(),
            state: raw.state,
            bid_state: raw.bid_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct AuctionDataExtended {
    pub total_uncancelled_bids: u64,
    pub tick_size: Option<u64>,
    pub gap_tick_size_percentage: Option<u8>,
    pub instant_sale_price: Option<u64>,
    pub name: Option<[u8; 32]>,
}

impl AuctionDataExtended {
    /// Auction name with its NUL padding removed.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.name
            .map(|raw| String::from_utf8_lossy(&raw).trim_end_matches('\0').to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct BidderMetadata {
    pub bidder: Pubkey,
    pub auction: Pubkey,
    pub last_bid: u64,
    pub last_bid_timestamp: i64,
    /// Once set, every earlier bid from this bidder is void.
    pub cancelled: bool,
}

impl BidderMetadata {
    /// Composite `"{auction}-{bidder}"` key.
    #[must_use]
    pub fn index_key(&self) -> String {
        format!("{}-{}", self.auction, self.bidder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct BidderPot {
    /// Token account holding the escrowed bid.
    pub bidder_pot: Pubkey,
    pub bidder_act: Pubkey,
    pub auction_act: Pubkey,
    pub emptied: bool,
}

impl BidderPot {
    /// Composite `"{auction}-{bidder}"` key.
    #[must_use]
    pub fn index_key(&self) -> String {
        format!("{}-{}", self.auction_act, self.bidder_act)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuctionAccount {
    AuctionData(AuctionData),
    AuctionDataExtended(AuctionDataExtended),
    BidderMetadata(BidderMetadata),
    BidderPot(BidderPot),
}

impl AuctionAccount {
    /// Decodes an auction-program account, picking the layout by size.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Malformed`] when the bytes do not fit the chosen layout.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        match data.len() {
            AUCTION_DATA_EXTENDED_LEN => decode_prefix(data).map(Self::AuctionDataExtended),
            BIDDER_METADATA_LEN => decode_prefix(data).map(Self::BidderMetadata),
            BIDDER_POT_LEN => decode_prefix(data).map(Self::BidderPot),
            _ => decode_prefix::<RawAuctionData>(data).map(|raw| Self::AuctionData(raw.into())),
        }
    }

    #[must_use]
    pub fn try_decode(data: &[u8]) -> Option<Self> {
        Self::decode(data).ok()
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::AuctionData(_) => RecordKind::AuctionData,
            Self::AuctionDataExtended(_) => RecordKind::AuctionDataExtended,
            Self::BidderMetadata(_) => RecordKind::BidderMetadata,
            Self::BidderPot(_) => RecordKind::BidderPot,
        }
    }
}

pub(super) fn classify(data: &[u8]) -> Option<RecordKind> {
    match data.len() {
        0 => None,
        AUCTION_DATA_EXTENDED_LEN => Some(RecordKind::AuctionDataExtended),
        BIDDER_METADATA_LEN => Some(RecordKind::BidderMetadata),
        BIDDER_POT_LEN => Some(RecordKind::BidderPot),
        _ => Some(RecordKind::AuctionData),
    }
}
