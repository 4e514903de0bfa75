//! Binary account decoders and classifiers.
//!
//! Each on-chain program gets a sum type over the record kinds it owns
//! ([`MetadataAccount`], [`VaultAccount`], [`AuctionAccount`],
//! [`MetaplexAccount`]). Classification and decoding happen in one step:
//! `decode` inspects the discriminant (leading tag byte, or exact length for
//! the untagged auction program) and returns either the typed record or a
//! [`DecodeError`]. `try_decode` is the lenient form used by the ingestion
//! paths, where a foreign or corrupt account is skipped, never fatal.
//!
//! [`classify`] answers "which record kind is this?" without paying for a
//! full decode; it is what the memcmp scans and the exclusivity tests use.

pub mod auction;
pub mod metadata;
pub mod metaplex;
pub mod vault;

#[cfg(test)]
#[allow(dead_code)]
pub(crate) mod fixtures;

pub use auction::AuctionAccount;
pub use metadata::MetadataAccount;
pub use metaplex::MetaplexAccount;
pub use vault::VaultAccount;

use crate::config::ProgramIds;
use crate::types::KeyedAccount;
use crate::utils::error::DecodeError;
use borsh::BorshDeserialize;
use solana_sdk::pubkey::Pubkey;

/// Every record kind the ingestion layer understands, across all programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Metadata,
    Edition,
    MasterEditionV1,
    MasterEditionV2,
    Vault,
    SafetyDepositBox,
    AuctionData,
    AuctionDataExtended,
    BidderMetadata,
    BidderPot,
    Store,
    WhitelistedCreator,
    AuctionManagerV1,
    AuctionManagerV2,
    BidRedemptionTicketV1,
    BidRedemptionTicketV2,
    PayoutTicket,
    PrizeTrackingTicket,
    SafetyDepositConfig,
}

/// A decoded account from any of the four marketplace programs.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedAccount {
    Metadata(MetadataAccount),
    Vault(VaultAccount),
    Auction(AuctionAccount),
    Metaplex(MetaplexAccount),
}

impl DecodedAccount {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            DecodedAccount::Metadata(record) => record.kind(),
            DecodedAccount::Vault(record) => record.kind(),
            DecodedAccount::Auction(record) => record.kind(),
            DecodedAccount::Metaplex(record) => record.kind(),
        }
    }
}

/// Decides the record kind of an account owned by `owner`.
///
/// The owner check comes first: an account from any other program is never
/// classified, whatever its bytes look like.
#[must_use]
pub fn classify(programs: &ProgramIds, owner: &Pubkey, data: &[u8]) -> Option<RecordKind> {
    if *owner == programs.token_metadata {
        metadata::classify(data)
    } else if *owner == programs.vault {
        vault::classify(data)
    } else if *owner == programs.auction {
        auction::classify(data)
    } else if *owner == programs.metaplex {
        metaplex::classify(data)
    } else {
        None
    }
}

/// Decodes `account` with the decoder of its owning program.
///
/// # Errors
///
/// [`DecodeError::WrongOwner`] when the owner is none of the configured
/// programs, otherwise whatever the program decoder reports.
pub fn decode_account(
    programs: &ProgramIds,
    account: &KeyedAccount,
) -> Result<DecodedAccount, DecodeError> {
    let owner = account.owner();
    let data = account.data();

    if *owner == programs.token_metadata {
        MetadataAccount::decode(data).map(DecodedAccount::Metadata)
    } else if *owner == programs.vault {
        VaultAccount::decode(data).map(DecodedAccount::Vault)
    } else if *owner == programs.auction {
        AuctionAccount::decode(data).map(DecodedAccount::Auction)
    } else if *owner == programs.metaplex {
        MetaplexAccount::decode(data).map(DecodedAccount::Metaplex)
    } else {
        Err(DecodeError::WrongOwner {
            expected: "a marketplace program".to_string(),
            actual: owner.to_string(),
        })
    }
}

/// Lenient [`decode_account`]: failures are logged at debug level and dropped.
#[must_use]
pub fn try_decode_account(programs: &ProgramIds, account: &KeyedAccount) -> Option<DecodedAccount> {
    match decode_account(programs, account) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::debug!(account = %account.pubkey, error = %err, "Skipping undecodable account");
            None
        }
    }
}

/// Splits the leading tag byte off a tagged account.
pub(crate) fn split_tag(data: &[u8]) -> Result<(u8, &[u8]), DecodeError> {
    data.split_first()
        .map(|(tag, body)| (*tag, body))
        .ok_or(DecodeError::TooShort { needed: 1, actual: 0 })
}

/// Borsh-decodes a `T` from the front of `data`, ignoring trailing padding.
pub(crate) fn decode_prefix<T: BorshDeserialize>(data: &[u8]) -> Result<T, DecodeError> {
    let mut cursor = data;
    Ok(T::deserialize(&mut cursor)?)
}

/// Strips the NUL padding the programs append to fixed-width strings.
pub(crate) fn trim_padding(value: &str) -> String {
    value.trim_end_matches('\0').to_string()
}

/// Forward-only cursor for layouts borsh cannot describe (variable-width
/// integers, hand-packed option flags).
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.offset.saturating_add(len);
        let bytes = self.data.get(self.offset..end).ok_or(DecodeError::TooShort {
            needed: end,
            actual: self.data.len(),
        })?;
        self.offset = end;
        Ok(bytes)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn bool(&mut self) -> Result<bool, DecodeError> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::Malformed(format!("invalid bool byte {other}"))),
        }
    }

    pub(crate) fn u32(&mut self) -> Result<u32, DecodeError> {
        Ok(self.uint(4)? as u32)
    }

    pub(crate) fn u64(&mut self) -> Result<u64, DecodeError> {
        self.uint(8)
    }

    /// Little-endian unsigned integer of `width` bytes (1, 2, 4 or 8).
    pub(crate) fn uint(&mut self, width: usize) -> Result<u64, DecodeError> {
        if !matches!(width, 1 | 2 | 4 | 8) {
            return Err(DecodeError::Malformed(format!("unsupported integer width {width}")));
        }
        let bytes = self.take(width)?;
        let mut buf = [0u8; 8];
        buf[..width].copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    pub(crate) fn pubkey(&mut self) -> Result<Pubkey, DecodeError> {
        let bytes = self.take(32)?;
        Pubkey::try_from(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))
    }

    /// Reads a one-byte presence flag, then `read` when the flag is set.
    pub(crate) fn option<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        match self.u8()? {
            0 => Ok(None),
            1 => read(self).map(Some),
            other => Err(DecodeError::Malformed(format!("invalid option tag {other}"))),
        }
    }

    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.offset.min(self.data.len())..];
        self.offset = self.data.len();
        rest
    }
}
