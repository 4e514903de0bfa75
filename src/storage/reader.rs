//! Read adapter over a [`DocumentStore`].
//!
//! Serves the query surface of the in-memory state from persisted documents.
//! Artwork queries are scoped by [`MetaReader::filter_artworks`], which needs a
//! store id and resolves owner filters through live token-account balances.

use super::documents::{
    CreatorDocument, EditionDocument, MasterEditionV1Document, MasterEditionV2Document,
    MetadataDocument, StoreDocument,
};
use super::{Collection, DocumentStore, Filter};
use crate::config::TOKEN_PROGRAM_ID;
use crate::core::decoders::metadata::MetadataKey;
use crate::utils::error::Result;
use crate::utils::rpc::RpcProvider;
use serde::de::DeserializeOwned;
use serde_json::Value;
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::{ParsePubkeyError, Pubkey, PUBKEY_BYTES};
use std::sync::Arc;

/// Size of an SPL token account.
pub const TOKEN_ACCOUNT_LEN: u64 = 165;
const TOKEN_OWNER_OFFSET: usize = 32;
const TOKEN_AMOUNT_OFFSET: usize = 64;

/// Artwork query arguments. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworksInput {
    pub store_id: Option<String>,
    pub creator_id: Option<String>,
    pub owner_id: Option<String>,
    /// Narrows the result to one artwork.
    pub art_id: Option<String>,
    pub only_verified: bool,
}

/// A master edition in the layout its key tag names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterEditionRecord {
    V1(MasterEditionV1Document),
    V2(MasterEditionV2Document),
}

impl MasterEditionRecord {
    fn from_document(document: Value) -> Result<Self> {
        let key = document.get("key").and_then(Value::as_u64);
        if key == Some(MetadataKey::MasterEditionV1 as u64) {
            Ok(Self::V1(serde_json::from_value(document)?))
        } else {
            Ok(Self::V2(serde_json::from_value(document)?))
        }
    }
}

fn decode_all<T: DeserializeOwned>(documents: Vec<Value>) -> Result<Vec<T>> {
    documents
        .into_iter()
        .map(|doc| serde_json::from_value(doc).map_err(Into::into))
        .collect()
}

fn decode_one<T: DeserializeOwned>(document: Option<Value>) -> Result<Option<T>> {
    document
        .map(|doc| serde_json::from_value(doc).map_err(Into::into))
        .transpose()
}

/// Query surface over persisted meta documents.
pub struct MetaReader {
    store: Arc<dyn DocumentStore>,
    rpc: Arc<dyn RpcProvider>,
    token_program: Pubkey,
    commitment: Option<CommitmentConfig>,
}

impl MetaReader {
    /// `rpc` answers the owned-token lookups behind owner filters.
    pub fn new(store: Arc<dyn DocumentStore>, rpc: Arc<dyn RpcProvider>) -> Self {
        Self {
            store,
            rpc,
            token_program: TOKEN_PROGRAM_ID,
            commitment: None,
        }
    }

    #[must_use]
    pub fn with_token_program(mut self, token_program: Pubkey) -> Self {
        self.token_program = token_program;
        self
    }

    #[must_use]
    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = Some(commitment);
        self
    }

    pub async fn stores_count(&self) -> Result<u64> {
        self.store.count(Collection::Stores, None).await
    }

    pub async fn creators_count(&self) -> Result<u64> {
        self.store.count(Collection::Creators, None).await
    }

    pub async fn artworks_count(&self) -> Result<u64> {
        self.store.count(Collection::Metadata, None).await
    }

    pub async fn auctions_count(&self) -> Result<u64> {
        self.store.count(Collection::Auctions, None).await
    }

    pub async fn get_store_ids(&self) -> Result<Vec<String>> {
        self.store.ids(Collection::Stores).await
    }

    pub async fn get_stores(&self) -> Result<Vec<StoreDocument>> {
        decode_all(self.store.find(Collection::Stores, None).await?)
    }

    pub async fn get_store(&self, store_id: &str) -> Result<Option<StoreDocument>> {
        decode_one(
            self.store
                .find_one(Collection::Stores, Some(&Filter::id(store_id)))
                .await?,
        )
    }

    pub async fn get_creator_ids(&self) -> Result<Vec<String>> {
        self.store.ids(Collection::Creators).await
    }

    /// Creators whitelisted by `store_id`.
    pub async fn get_creators(&self, store_id: &str) -> Result<Vec<CreatorDocument>> {
        decode_all(
            self.store
                .find(Collection::Creators, Some(&Filter::contains("storeIds", store_id)))
                .await?,
        )
    }

    /// `creator_id`, provided `store_id` whitelists it.
    pub async fn get_creator(
        &self,
        store_id: &str,
        creator_id: &str,
    ) -> Result<Option<CreatorDocument>> {
        let filter = Filter::And(vec![
            Filter::id(creator_id),
            Filter::contains("storeIds", store_id),
        ]);
        decode_one(self.store.find_one(Collection::Creators, Some(&filter)).await?)
    }

    /// Artworks matching `input`; no usable filter means every artwork.
    pub async fn get_artworks(&self, input: &ArtworksInput) -> Result<Vec<MetadataDocument>> {
        let filter = self.filter_artworks(input).await?;
        let filter = match (filter, &input.art_id) {
            (Some(filter), Some(art_id)) => Some(Filter::And(vec![filter, Filter::id(art_id.as_str())])),
            (None, Some(art_id)) => Some(Filter::id(art_id.as_str())),
            (filter, None) => filter,
        };
        decode_all(self.store.find(Collection::Metadata, filter.as_ref()).await?)
    }

    pub async fn get_artwork(&self, art_id: &str) -> Result<Option<MetadataDocument>> {
        decode_one(
            self.store
                .find_one(Collection::Metadata, Some(&Filter::id(art_id)))
                .await?,
        )
    }

    /// The edition `id`, or the first stored edition.
    pub async fn get_edition(&self, id: Option<&str>) -> Result<Option<EditionDocument>> {
        let filter = id.map(Filter::id);
        decode_one(self.store.find_one(Collection::Editions, filter.as_ref()).await?)
    }

    /// The master edition `id`, or the first stored one.
    pub async fn get_master_edition(&self, id: Option<&str>) -> Result<Option<MasterEditionRecord>> {
        let filter = id.map(Filter::id);
        self.store
            .find_one(Collection::MasterEditions, filter.as_ref())
            .await?
            .map(MasterEditionRecord::from_document)
            .transpose()
    }

    /// Builds the artwork filter for `input`.
    ///
    /// Without a store id there is no filter. A creator filter applies only
    /// when the store whitelists that creator; otherwise only the owner filter
    /// (if any) remains. An owner filter needs at least one mint with a
    /// positive balance. When both exist they are OR-ed.
    ///
    /// # Errors
    ///
    /// Propagates store and RPC failures, and rejects an owner id that is not
    /// base58 or decodes to more than 32 bytes.
    #[tracing::instrument(skip_all, fields(store_id = ?input.store_id))]
    pub async fn filter_artworks(&self, input: &ArtworksInput) -> Result<Option<Filter>> {
        let Some(store_id) = input.store_id.as_deref() else {
            return Ok(None);
        };

        let by_owner = match input.owner_id.as_deref() {
            Some(owner) => {
                let mints = self.owned_mints(owner).await?;
                (!mints.is_empty()).then(|| Filter::field_in("mint", mints))
            }
            None => None,
        };

        if let Some(creator_id) = input.creator_id.as_deref() {
            if self.get_creator(store_id, creator_id).await?.is_none() {
                tracing::debug!(creator_id, "Creator not whitelisted by store");
                return Ok(by_owner);
            }
        }

        let by_creator = (input.creator_id.is_some() || input.only_verified).then(|| Filter::Creator {
            address: input.creator_id.clone(),
            verified: input.only_verified.then_some(true),
        });

        Ok(match (by_creator, by_owner) {
            (Some(creator), Some(owner)) => Some(Filter::Or(vec![creator, owner])),
            (creator, owner) => creator.or(owner),
        })
    }

    /// Mints `owner` holds a positive balance of, sorted.
    ///
    /// # Errors
    ///
    /// Rejects an unparsable owner and propagates RPC failures.
    pub async fn owned_mints(&self, owner: &str) -> Result<Vec<String>> {
        let owner = parse_owner(owner)?;
        let filters = vec![
            RpcFilterType::DataSize(TOKEN_ACCOUNT_LEN),
            RpcFilterType::Memcmp(Memcmp::new_base58_encoded(TOKEN_OWNER_OFFSET, owner.as_ref())),
        ];
        let accounts = self
            .rpc
            .get_program_accounts(&self.token_program, Some(filters), self.commitment)
            .await?;

        let mut mints: Vec<String> = accounts
            .iter()
            .filter_map(|account| {
                let data = account.data();
                let amount = data.get(TOKEN_AMOUNT_OFFSET..TOKEN_AMOUNT_OFFSET + 8)?;
                let amount = u64::from_le_bytes(amount.try_into().ok()?);
                if amount == 0 {
                    return None;
                }
                let mint = Pubkey::try_from(data.get(..32)?).ok()?;
                Some(mint.to_string())
            })
            .collect();
        mints.sort();
        mints.dedup();
        Ok(mints)
    }
}

/// Decodes an owner id as a big-endian base58 number, left-padded to 32
/// bytes, so short ids such as `"99"` still name an address.
pub fn parse_owner(owner: &str) -> std::result::Result<Pubkey, ParsePubkeyError> {
    let bytes = bs58::decode(owner)
        .into_vec()
        .map_err(|_| ParsePubkeyError::Invalid)?;
    if bytes.len() > PUBKEY_BYTES {
        return Err(ParsePubkeyError::WrongSize);
    }
    let mut padded = [0u8; PUBKEY_BYTES];
    padded[PUBKEY_BYTES - bytes.len()..].copy_from_slice(&bytes);
    Ok(Pubkey::new_from_array(padded))
}
