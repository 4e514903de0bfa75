//! Metaplex marketplace program records.

use super::{decode_prefix, split_tag, ByteReader, RecordKind};
use crate::utils::error::DecodeError;
use borsh::BorshDeserialize;
use solana_sdk::pubkey::Pubkey;

/// PDA seed prefix of the marketplace program.
pub const METAPLEX_PREFIX: &[u8] = b"metaplex";
/// Whitelisted creator accounts are exactly this long.
pub const MAX_WHITELISTED_CREATOR_SIZE: usize = 2 + 32 + 10;

/// Leading tag byte of marketplace accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MetaplexKey {
    Uninitialized = 0,
    OriginalAuthorityLookupV1 = 1,
    BidRedemptionTicketV1 = 2,
    StoreV1 = 3,
    WhitelistedCreatorV1 = 4,
    PayoutTicketV1 = 5,
    SafetyDepositValidationTicketV1 = 6,
    AuctionManagerV1 = 7,
    PrizeTrackingTicketV1 = 8,
    SafetyDepositConfigV1 = 9,
    AuctionManagerV2 = 10,
    BidRedemptionTicketV2 = 11,
    AuctionWinnerTokenTypeTrackerV1 = 12,
    StoreIndexerV1 = 13,
    AuctionCacheV1 = 14,
    StoreConfigV1 = 15,
}

impl TryFrom<u8> for MetaplexKey {
    type Error = DecodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        use MetaplexKey::*;
        Ok(match tag {
            0 => Uninitialized,
            1 => OriginalAuthorityLookupV1,
            2 => BidRedemptionTicketV1,
            3 => StoreV1,
            4 => WhitelistedCreatorV1,
            5 => PayoutTicketV1,
            6 => SafetyDepositValidationTicketV1,
            7 => AuctionManagerV1,
            8 => PrizeTrackingTicketV1,
            9 => SafetyDepositConfigV1,
            10 => AuctionManagerV2,
            11 => BidRedemptionTicketV2,
            12 => AuctionWinnerTokenTypeTrackerV1,
            13 => StoreIndexerV1,
            14 => AuctionCacheV1,
            15 => StoreConfigV1,
            other => return Err(DecodeError::UnknownTag(other)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct Store {
    /// Public stores accept any verified creator.
    pub public: bool,
    pub auction_program: Pubkey,
    pub token_vault_program: Pubkey,
    pub token_metadata_program: Pubkey,
    pub token_program: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct WhitelistedCreator {
    pub address: Pubkey,
    pub activated: bool,
}

/// Address a whitelisted-creator record for `creator` in `store` must live at.
#[must_use]
pub fn whitelisted_creator_address(program_id: &Pubkey, store: &Pubkey, creator: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            METAPLEX_PREFIX,
            program_id.as_ref(),
            store.as_ref(),
            creator.as_ref(),
        ],
        program_id,
    )
    .0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshDeserialize)]
pub enum AuctionManagerStatus {
    Initialized,
    Validated,
    Running,
    Disbursing,
    Finished,
}

impl TryFrom<u8> for AuctionManagerStatus {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Initialized,
            1 => Self::Validated,
            2 => Self::Running,
            3 => Self::Disbursing,
            4 => Self::Finished,
            other => {
                return Err(DecodeError::Malformed(format!(
                    "invalid auction manager status {other}"
                )))
            }
        })
    }
}

/// Auction manager, both layout versions folded into one shape.
///
/// V1 managers keep their per-winning-config state in a different layout;
/// only its item counter is carried over (as `safety_config_items_validated`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionManager {
    pub version: u8,
    pub store: Pubkey,
    pub authority: Pubkey,
    pub auction: Pubkey,
    pub vault: Pubkey,
    pub accept_payment: Pubkey,
    pub status: AuctionManagerStatus,
    pub safety_config_items_validated: u64,
    pub bids_pushed_to_accept_payment: u64,
    pub has_participation: bool,
}

impl AuctionManager {
    fn decode_body(version: u8, body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(body);
        let store = reader.pubkey()?;
        let authority = reader.pubkey()?;
        let auction = reader.pubkey()?;
        let vault = reader.pubkey()?;
        let accept_payment = reader.pubkey()?;
        let status = AuctionManagerStatus::try_from(reader.u8()?)?;

        let (validated, pushed, has_participation) = if version == 2 {
            (reader.u64()?, reader.u64()?, reader.bool()?)
        } else {
            (u64::from(reader.u8()?), 0, false)
        };

        Ok(Self {
            version,
            store,
            authority,
            auction,
            vault,
            accept_payment,
            status,
            safety_config_items_validated: validated,
            bids_pushed_to_accept_payment: pushed,
            has_participation,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct PayoutTicket {
    pub recipient: Pubkey,
    pub amount_paid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct PrizeTrackingTicket {
    pub metadata: Pubkey,
    pub supply_snapshot: u64,
    pub expected_redemptions: u64,
    pub redemptions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidRedemptionTicket {
    V1 {
        participation_redeemed: bool,
        items_redeemed: u8,
    },
    V2 {
        winner_index: Option<u64>,
        auction_manager: Pubkey,
        /// One bit per safety deposit order, most significant bit first.
        redeemed: Vec<u8>,
    },
}

impl BidRedemptionTicket {
    fn decode_v2(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(body);
        let winner_index = reader.option(ByteReader::u64)?;
        let auction_manager = reader.pubkey()?;
        Ok(Self::V2 {
            winner_index,
            auction_manager,
            redeemed: reader.rest().to_vec(),
        })
    }

    /// Whether the prize with safety-deposit `order` has been redeemed.
    #[must_use]
    pub fn bid_redeemed(&self, order: u8) -> bool {
        match self {
            Self::V1 { items_redeemed, .. } => order < *items_redeemed,
            Self::V2 { redeemed, .. } => {
                let mask = 1u8 << (7 - order % 8);
                redeemed
                    .get(usize::from(order / 8))
                    .is_some_and(|byte| byte & mask != 0)
            }
        }
    }

    /// `"{auction_manager}-{winner_index}"` for V2 tickets with a winner.
    #[must_use]
    pub fn winner_key(&self) -> Option<String> {
        match self {
            Self::V2 {
                winner_index: Some(index),
                auction_manager,
                ..
            } => Some(format!("{auction_manager}-{index}")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinningConfigType {
    TokenOnlyTransfer,
    FullRightsTransfer,
    PrintingV1,
    PrintingV2,
    Participation,
}

impl TryFrom<u8> for WinningConfigType {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::TokenOnlyTransfer,
            1 => Self::FullRightsTransfer,
            2 => Self::PrintingV1,
            3 => Self::PrintingV2,
            4 => Self::Participation,
            other => {
                return Err(DecodeError::Malformed(format!(
                    "invalid winning config type {other}"
                )))
            }
        })
    }
}

/// Winners `[start, start + length)` of the ranking receive `amount` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    pub amount: u64,
    pub length: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipationConfig {
    pub winner_constraint: u8,
    pub non_winning_constraint: u8,
    pub fixed_price: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipationState {
    pub collected_to_accept_payment: u64,
}

/// Per-deposit prize configuration of an auction manager.
///
/// Amounts and lengths are stored with the integer width named by
/// `amount_type` / `length_type` (1, 2, 4 or 8 bytes), so this one is
/// decoded by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyDepositConfig {
    pub auction_manager: Pubkey,
    pub order: u64,
    pub winning_config_type: WinningConfigType,
    pub amount_type: u8,
    pub length_type: u8,
    pub amount_ranges: Vec<AmountRange>,
    pub participation_config: Option<ParticipationConfig>,
    pub participation_state: Option<ParticipationState>,
}

impl SafetyDepositConfig {
    fn decode_body(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(body);
        let auction_manager = reader.pubkey()?;
        let order = reader.u64()?;
        let winning_config_type = WinningConfigType::try_from(reader.u8()?)?;
        let amount_type = reader.u8()?;
        let length_type = reader.u8()?;

        let count = reader.u32()?;
        let mut amount_ranges = Vec::with_capacity(count.min(64) as usize);
        for _ in 0..count {
            let amount = reader.uint(usize::from(amount_type))?;
            let length = reader.uint(usize::from(length_type))?;
            amount_ranges.push(AmountRange { amount, length });
        }

        let participation_config = reader.option(|r| {
            Ok(ParticipationConfig {
                winner_constraint: r.u8()?,
                non_winning_constraint: r.u8()?,
                fixed_price: r.option(ByteReader::u64)?,
            })
        })?;
        let participation_state = reader.option(|r| {
            Ok(ParticipationState {
                collected_to_accept_payment: r.u64()?,
            })
        })?;

        Ok(Self {
            auction_manager,
            order,
            winning_config_type,
            amount_type,
            length_type,
            amount_ranges,
            participation_config,
            participation_state,
        })
    }

    /// Composite `"{auction_manager}-{order}"` key.
    #[must_use]
    pub fn index_key(&self) -> String {
        format!("{}-{}", self.auction_manager, self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaplexAccount {
    Store(Store),
    WhitelistedCreator(WhitelistedCreator),
    AuctionManager(AuctionManager),
    BidRedemptionTicket(BidRedemptionTicket),
    PayoutTicket(PayoutTicket),
    PrizeTrackingTicket(PrizeTrackingTicket),
    SafetyDepositConfig(SafetyDepositConfig),
}

impl MetaplexAccount {
    /// Decodes a marketplace account by its tag byte.
    ///
    /// # Errors
    ///
    /// Record kinds the index does not hold report
    /// [`DecodeError::UnknownTag`].
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let (tag, body) = split_tag(data)?;
        match MetaplexKey::try_from(tag)? {
            MetaplexKey::StoreV1 => decode_prefix(body).map(Self::Store),
            MetaplexKey::WhitelistedCreatorV1 => decode_prefix(body).map(Self::WhitelistedCreator),
            MetaplexKey::AuctionManagerV1 => {
                AuctionManager::decode_body(1, body).map(Self::AuctionManager)
            }
            MetaplexKey::AuctionManagerV2 => {
                AuctionManager::decode_body(2, body).map(Self::AuctionManager)
            }
            MetaplexKey::BidRedemptionTicketV1 => {
                let mut reader = ByteReader::new(body);
                Ok(Self::BidRedemptionTicket(BidRedemptionTicket::V1 {
                    participation_redeemed: reader.bool()?,
                    items_redeemed: reader.u8()?,
                }))
            }
            MetaplexKey::BidRedemptionTicketV2 => {
                BidRedemptionTicket::decode_v2(body).map(Self::BidRedemptionTicket)
            }
            MetaplexKey::PayoutTicketV1 => decode_prefix(body).map(Self::PayoutTicket),
            MetaplexKey::PrizeTrackingTicketV1 => decode_prefix(body).map(Self::PrizeTrackingTicket),
            MetaplexKey::SafetyDepositConfigV1 => {
                SafetyDepositConfig::decode_body(body).map(Self::SafetyDepositConfig)
            }
            _ => Err(DecodeError::UnknownTag(tag)),
        }
    }

    #[must_use]
    pub fn try_decode(data: &[u8]) -> Option<Self> {
        Self::decode(data).ok()
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Store(_) => RecordKind::Store,
            Self::WhitelistedCreator(_) => RecordKind::WhitelistedCreator,
            Self::AuctionManager(manager) if manager.version == 1 => RecordKind::AuctionManagerV1,
            Self::AuctionManager(_) => RecordKind::AuctionManagerV2,
            Self::BidRedemptionTicket(BidRedemptionTicket::V1 { .. }) => {
                RecordKind::BidRedemptionTicketV1
            }
            Self::BidRedemptionTicket(BidRedemptionTicket::V2 { .. }) => {
                RecordKind::BidRedemptionTicketV2
            }
            Self::PayoutTicket(_) => RecordKind::PayoutTicket,
            Self::PrizeTrackingTicket(_) => RecordKind::PrizeTrackingTicket,
            Self::SafetyDepositConfig(_) => RecordKind::SafetyDepositConfig,
        }
    }
}

pub(super) fn classify(data: &[u8]) -> Option<RecordKind> {
    Some(match MetaplexKey::try_from(*data.first()?).ok()? {
        MetaplexKey::StoreV1 => RecordKind::Store,
        MetaplexKey::WhitelistedCreatorV1 => RecordKind::WhitelistedCreator,
        MetaplexKey::AuctionManagerV1 => RecordKind::AuctionManagerV1,
        MetaplexKey::AuctionManagerV2 => RecordKind::AuctionManagerV2,
        MetaplexKey::BidRedemptionTicketV1 => RecordKind::BidRedemptionTicketV1,
        MetaplexKey::BidRedemptionTicketV2 => RecordKind::BidRedemptionTicketV2,
        MetaplexKey::PayoutTicketV1 => RecordKind::PayoutTicket,
        MetaplexKey::PrizeTrackingTicketV1 => RecordKind::PrizeTrackingTicket,
        MetaplexKey::SafetyDepositConfigV1 => RecordKind::SafetyDepositConfig,
        _ => return None,
    })
}
