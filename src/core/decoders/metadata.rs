//! Token-metadata program records: metadata, editions and master editions.

use super::{decode_prefix, split_tag, trim_padding, RecordKind};
use crate::utils::error::DecodeError;
use borsh::BorshDeserialize;
use solana_sdk::pubkey::Pubkey;

/// PDA seed prefix shared by metadata and edition addresses.
pub const METADATA_PREFIX: &[u8] = b"metadata";
/// PDA seed suffix for edition addresses.
pub const EDITION_SEED: &[u8] = b"edition";

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_CREATOR_LIMIT: usize = 5;
pub const MAX_CREATOR_LEN: usize = 32 + 1 + 1;

/// Byte offset of creator slot 0 inside a metadata account: key, update
/// authority, mint, the three padded strings with their length prefixes,
/// seller fee, the creators option flag and the vec length.
pub const CREATORS_OFFSET: usize = 1
    + 32
    + 32
    + 4
    + MAX_NAME_LENGTH
    + 4
    + MAX_URI_LENGTH
    + 4
    + MAX_SYMBOL_LENGTH
    + 2
    + 1
    + 4;

/// Memcmp offset matching the creator stored in `slot` (0-based).
#[must_use]
pub fn creator_offset(slot: usize) -> usize {
    CREATORS_OFFSET + slot * MAX_CREATOR_LEN
}

/// Leading tag byte of token-metadata accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MetadataKey {
    Uninitialized = 0,
    EditionV1 = 1,
    MasterEditionV1 = 2,
    ReservationListV1 = 3,
    MetadataV1 = 4,
    ReservationListV2 = 5,
    MasterEditionV2 = 6,
    EditionMarker = 7,
}

impl TryFrom<u8> for MetadataKey {
    type Error = DecodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Ok(match tag {
            0 => Self::Uninitialized,
            1 => Self::EditionV1,
            2 => Self::MasterEditionV1,
            3 => Self::ReservationListV1,
            4 => Self::MetadataV1,
            5 => Self::ReservationListV2,
            6 => Self::MasterEditionV2,
            7 => Self::EditionMarker,
            other => return Err(DecodeError::UnknownTag(other)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    /// Percentage of royalties, 0-100.
    pub share: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct Data {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
}

#[derive(BorshDeserialize)]
struct RawMetadata {
    update_authority: Pubkey,
    mint: Pubkey,
    data: Data,
    primary_sale_happened: bool,
    is_mutable: bool,
}

/// One NFT's on-chain metadata.
///
/// `master_edition` and `edition` are not stored on chain; they hold the
/// derived edition address once the record has been admitted to a store
/// (see [`crate::core::state::MetaState::update_metadata`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub data: Data,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    pub edition_nonce: Option<u8>,
    pub master_edition: Option<Pubkey>,
    pub edition: Option<Pubkey>,
}

impl Metadata {
    fn decode_body(body: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = body;
        let raw = RawMetadata::deserialize(&mut cursor)?;

        // Accounts written before the nonce existed end in zero padding.
        let edition_nonce = match cursor {
            [1, nonce, ..] => Some(*nonce),
            _ => None,
        };

        Ok(Self {
            update_authority: raw.update_authority,
            mint: raw.mint,
            data: Data {
                name: trim_padding(&raw.data.name),
                symbol: trim_padding(&raw.data.symbol),
                uri: trim_padding(&raw.data.uri),
                ..raw.data
            },
            primary_sale_happened: raw.primary_sale_happened,
            is_mutable: raw.is_mutable,
            edition_nonce,
            master_edition: None,
            edition: None,
        })
    }

    /// The creators list, empty when the account has none.
    #[must_use]
    pub fn creators(&self) -> &[Creator] {
        self.data.creators.as_deref().unwrap_or_default()
    }

    /// Address of this mint's edition account under `program_id`.
    #[must_use]
    pub fn edition_address(&self, program_id: &Pubkey) -> Pubkey {
        edition_address(program_id, &self.mint, self.edition_nonce)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct Edition {
    /// Master edition this print was made from.
    pub parent: Pubkey,
    pub edition: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct MasterEditionV1 {
    pub supply: u64,
    pub max_supply: Option<u64>,
    pub printing_mint: Pubkey,
    pub one_time_printing_authorization_mint: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct MasterEditionV2 {
    pub supply: u64,
    /// `None` means unlimited prints.
    pub max_supply: Option<u64>,
}

/// Either master edition layout, as held by the state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterEdition {
    V1(MasterEditionV1),
    V2(MasterEditionV2),
}

impl MasterEdition {
    #[must_use]
    pub fn supply(&self) -> u64 {
        match self {
            Self::V1(edition) => edition.supply,
            Self::V2(edition) => edition.supply,
        }
    }

    #[must_use]
    pub fn max_supply(&self) -> Option<u64> {
        match self {
            Self::V1(edition) => edition.max_supply,
            Self::V2(edition) => edition.max_supply,
        }
    }

    /// Tag byte of the on-chain layout.
    #[must_use]
    pub fn key(&self) -> MetadataKey {
        match self {
            Self::V1(_) => MetadataKey::MasterEditionV1,
            Self::V2(_) => MetadataKey::MasterEditionV2,
        }
    }
}

/// Records owned by the token-metadata program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataAccount {
    Metadata(Metadata),
    Edition(Edition),
    MasterEditionV1(MasterEditionV1),
    MasterEditionV2(MasterEditionV2),
}

impl MetadataAccount {
    /// Decodes a token-metadata account by its tag byte.
    ///
    /// # Errors
    ///
    /// Reservation lists, edition markers and uninitialized accounts are not
    /// ingested and report [`DecodeError::UnknownTag`], as do unknown tags.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let (tag, body) = split_tag(data)?;
        match MetadataKey::try_from(tag)? {
            MetadataKey::MetadataV1 => Metadata::decode_body(body).map(Self::Metadata),
            MetadataKey::EditionV1 => decode_prefix(body).map(Self::Edition),
            MetadataKey::MasterEditionV1 => decode_prefix(body).map(Self::MasterEditionV1),
            MetadataKey::MasterEditionV2 => decode_prefix(body).map(Self::MasterEditionV2),
            MetadataKey::Uninitialized
            | MetadataKey::ReservationListV1
            | MetadataKey::ReservationListV2
            | MetadataKey::EditionMarker => Err(DecodeError::UnknownTag(tag)),
        }
    }

    #[must_use]
    pub fn try_decode(data: &[u8]) -> Option<Self> {
        Self::decode(data).ok()
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Metadata(_) => RecordKind::Metadata,
            Self::Edition(_) => RecordKind::Edition,
            Self::MasterEditionV1(_) => RecordKind::MasterEditionV1,
            Self::MasterEditionV2(_) => RecordKind::MasterEditionV2,
        }
    }
}

pub(super) fn classify(data: &[u8]) -> Option<RecordKind> {
    match MetadataKey::try_from(*data.first()?).ok()? {
        MetadataKey::MetadataV1 => Some(RecordKind::Metadata),
        MetadataKey::EditionV1 => Some(RecordKind::Edition),
        MetadataKey::MasterEditionV1 => Some(RecordKind::MasterEditionV1),
        MetadataKey::MasterEditionV2 => Some(RecordKind::MasterEditionV2),
        _ => None,
    }
}

/// Canonical edition PDA for `mint` and its bump.
#[must_use]
pub fn find_edition_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[METADATA_PREFIX, program_id.as_ref(), mint.as_ref(), EDITION_SEED],
        program_id,
    )
}

/// Edition PDA for `mint`, using the stored bump when there is one.
///
/// A known nonce skips the bump search; if it does not yield a valid
/// off-curve address the canonical search runs instead.
#[must_use]
pub fn edition_address(program_id: &Pubkey, mint: &Pubkey, nonce: Option<u8>) -> Pubkey {
    if let Some(nonce) = nonce {
        let seeds: [&[u8]; 5] = [
            METADATA_PREFIX,
            program_id.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
            &[nonce],
        ];
        if let Ok(address) = Pubkey::create_program_address(&seeds, program_id) {
            return address;
        }
    }
    find_edition_address(program_id, mint).0
}

/// Metadata PDA for `mint`.
#[must_use]
pub fn metadata_address(program_id: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[METADATA_PREFIX, program_id.as_ref(), mint.as_ref()],
        program_id,
    )
    .0
}

/// True for an absolute `http`/`https` URL with a host.
#[must_use]
pub fn is_valid_http_url(text: &str) -> bool {
    match url::Url::parse(text) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}
