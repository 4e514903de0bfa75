//! JSON document shapes for persisted records.
//!
//! Keys are base58 strings and field names are camelCase. Stores list their
//! whitelisted creators in `creatorIds`, and creators list the stores that
//! whitelist them in `storeIds`, so either side can be queried without a join.

use crate::core::decoders::auction::{AuctionData, AuctionState, BidState, PriceFloor};
use crate::core::decoders::metadata::{Edition, MasterEdition, Metadata, MetadataKey};
use crate::core::decoders::metaplex::{Store, WhitelistedCreator};
use crate::core::state::{MetaState, StateMutation};
use crate::storage::Collection;
use crate::types::ParsedAccount;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub public: bool,
    pub auction_program: String,
    pub token_vault_program: String,
    pub token_metadata_program: String,
    pub token_program: String,
    #[serde(default)]
    pub creator_ids: Vec<String>,
}

impl StoreDocument {
    pub fn new(store: &ParsedAccount<Store>, creator_ids: Vec<String>) -> Self {
        Self {
            id: store.pubkey.to_string(),
            public: store.info.public,
            auction_program: store.info.auction_program.to_string(),
            token_vault_program: store.info.token_vault_program.to_string(),
            token_metadata_program: store.info.token_metadata_program.to_string(),
            token_program: store.info.token_program.to_string(),
            creator_ids,
        }
    }
}

/// A whitelisted creator, keyed by the creator's wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorDocument {
    #[serde(rename = "_id")]
    pub id: String,
    /// Whitelist account address.
    pub pubkey: String,
    pub address: String,
    pub activated: bool,
    #[serde(default)]
    pub store_ids: Vec<String>,
}

impl CreatorDocument {
    pub fn new(creator: &ParsedAccount<WhitelistedCreator>, store_ids: Vec<String>) -> Self {
        Self {
            id: creator.info.address.to_string(),
            pubkey: creator.pubkey.to_string(),
            address: creator.info.address.to_string(),
            activated: creator.info.activated,
            store_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorShareDocument {
    pub address: String,
    pub verified: bool,
    pub share: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDataDocument {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    #[serde(default)]
    pub creators: Option<Vec<CreatorShareDocument>>,
}

/// An artwork: one metadata account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub update_authority: String,
    pub mint: String,
    pub data: MetadataDataDocument,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    #[serde(default)]
    pub edition_nonce: Option<u8>,
    #[serde(default)]
    pub master_edition: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
}

impl MetadataDocument {
    pub fn new(metadata: &ParsedAccount<Metadata>) -> Self {
        let info = &metadata.info;
        Self {
            id: metadata.pubkey.to_string(),
            update_authority: info.update_authority.to_string(),
            mint: info.mint.to_string(),
            data: MetadataDataDocument {
                name: info.data.name.clone(),
                symbol: info.data.symbol.clone(),
                uri: info.data.uri.clone(),
                seller_fee_basis_points: info.data.seller_fee_basis_points,
                creators: info.data.creators.as_ref().map(|creators| {
                    creators
                        .iter()
                        .map(|c| CreatorShareDocument {
                            address: c.address.to_string(),
                            verified: c.verified,
                            share: c.share,
                        })
                        .collect()
                }),
            },
            primary_sale_happened: info.primary_sale_happened,
            is_mutable: info.is_mutable,
            edition_nonce: info.edition_nonce,
            master_edition: info.master_edition.map(|k| k.to_string()),
            edition: info.edition.map(|k| k.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PriceFloorDocument {
    None,
    Minimum {
        #[serde(rename = "minimumPrice")]
        minimum_price: u64,
    },
    /// Hex-encoded price hash.
    Blinded { hash: String },
}

impl From<&PriceFloor> for PriceFloorDocument {
    fn from(floor: &PriceFloor) -> Self {
        match floor {
            PriceFloor::None => Self::None,
            PriceFloor::Minimum(minimum_price) => Self::Minimum {
                minimum_price: *minimum_price,
            },
            PriceFloor::Blinded(hash) => Self::Blinded {
                hash: hash.iter().map(|b| format!("{b:02x}")).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidDocument {
    pub bidder: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidStateDocument {
    /// `englishAuction` or `openEdition`.
    #[serde(rename = "type")]
    pub kind: String,
    pub bids: Vec<BidDocument>,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub authority: String,
    pub token_mint: String,
    pub last_bid: Option<i64>,
    pub ended_at: Option<i64>,
    pub end_auction_at: Option<i64>,
    pub end_auction_gap: Option<i64>,
    pub price_floor: PriceFloorDocument,
    /// `created`, `started` or `ended`.
    pub state: String,
    pub bid_state: BidStateDocument,
}

impl AuctionDocument {
    pub fn new(auction: &ParsedAccount<AuctionData>) -> Self {
        let info = &auction.info;
        let kind = match info.bid_state {
            BidState::EnglishAuction { .. } => "englishAuction",
            BidState::OpenEdition { .. } => "openEdition",
        };
        let state = match info.state {
            AuctionState::Created => "created",
            AuctionState::Started => "started",
            AuctionState::Ended => "ended",
        };
        Self {
            id: auction.pubkey.to_string(),
            authority: info.authority.to_string(),
            token_mint: info.token_mint.to_string(),
            last_bid: info.last_bid,
            ended_at: info.ended_at,
            end_auction_at: info.end_auction_at,
            end_auction_gap: info.end_auction_gap,
            price_floor: PriceFloorDocument::from(&info.price_floor),
            state: state.to_string(),
            bid_state: BidStateDocument {
                kind: kind.to_string(),
                bids: info
                    .bid_state
                    .bids()
                    .iter()
                    .map(|bid| BidDocument {
                        bidder: bid.bidder.to_string(),
                        amount: bid.amount,
                    })
                    .collect(),
                max: info.bid_state.max(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub key: u8,
    pub parent: String,
    pub edition: u64,
}

impl EditionDocument {
    pub fn new(edition: &ParsedAccount<Edition>) -> Self {
        Self {
            id: edition.pubkey.to_string(),
            key: MetadataKey::EditionV1 as u8,
            parent: edition.info.parent.to_string(),
            edition: edition.info.edition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterEditionV1Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub key: u8,
    pub supply: u64,
    pub max_supply: Option<u64>,
    pub printing_mint: String,
    pub one_time_printing_authorization_mint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterEditionV2Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub key: u8,
    pub supply: u64,
    pub max_supply: Option<u64>,
}

/// Serializes a master edition in the layout matching its key tag.
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn master_edition_document(edition: &ParsedAccount<MasterEdition>) -> Result<Value> {
    let id = edition.pubkey.to_string();
    let key = edition.info.key() as u8;
    let value = match &edition.info {
        MasterEdition::V1(v1) => serde_json::to_value(MasterEditionV1Document {
            id,
            key,
            supply: v1.supply,
            max_supply: v1.max_supply,
            printing_mint: v1.printing_mint.to_string(),
            one_time_printing_authorization_mint: v1.one_time_printing_authorization_mint.to_string(),
        })?,
        MasterEdition::V2(v2) => serde_json::to_value(MasterEditionV2Document {
            id,
            key,
            supply: v2.supply,
            max_supply: v2.max_supply,
        })?,
    };
    Ok(value)
}

/// Stores that whitelist creators: only the configured store is known.
fn store_ids(state: &MetaState) -> Vec<String> {
    state.store.iter().map(|s| s.pubkey.to_string()).collect()
}

fn creator_ids(state: &MetaState, store: &ParsedAccount<Store>) -> Vec<String> {
    if state.store.as_ref().is_some_and(|s| s.pubkey == store.pubkey) {
        let mut ids: Vec<String> = state.whitelisted_creators_by_creator.keys().cloned().collect();
        ids.sort();
        ids
    } else {
        Vec::new()
    }
}

/// Persistent form of a mutation, when its kind has a collection.
///
/// `state` supplies the cross references (`creatorIds`, `storeIds`).
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn document_for(
    mutation: &StateMutation,
    state: &MetaState,
) -> Result<Option<(Collection, String, Value)>> {
    let entry = match mutation {
        StateMutation::Store(_, store) | StateMutation::Stores(_, store) => (
            Collection::Stores,
            store.pubkey.to_string(),
            serde_json::to_value(StoreDocument::new(store, creator_ids(state, store)))?,
        ),
        StateMutation::WhitelistedCreatorsByCreator(_, creator) => {
            let document = CreatorDocument::new(creator, store_ids(state));
            (Collection::Creators, document.id.clone(), serde_json::to_value(document)?)
        }
        StateMutation::MetadataByMint(_, metadata) => (
            Collection::Metadata,
            metadata.pubkey.to_string(),
            serde_json::to_value(MetadataDocument::new(metadata))?,
        ),
        StateMutation::Auctions(_, auction) => (
            Collection::Auctions,
            auction.pubkey.to_string(),
            serde_json::to_value(AuctionDocument::new(auction))?,
        ),
        StateMutation::Editions(_, edition) => (
            Collection::Editions,
            edition.pubkey.to_string(),
            serde_json::to_value(EditionDocument::new(edition))?,
        ),
        StateMutation::MasterEditions(_, edition) => (
            Collection::MasterEditions,
            edition.pubkey.to_string(),
            master_edition_document(edition)?,
        ),
        _ => return Ok(None),
    };
    Ok(Some(entry))
}

/// Every persistable record in `state`, grouped the way the read side serves them.
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn state_documents(state: &MetaState) -> Result<Vec<(Collection, String, Value)>> {
    let mut documents = Vec::new();

    let mut stores: Vec<&ParsedAccount<Store>> = state.stores.values().collect();
    if let Some(store) = &state.store {
        if !state.stores.contains_key(&store.pubkey.to_string()) {
            stores.push(store);
        }
    }
    for store in stores {
        let document = StoreDocument::new(store, creator_ids(state, store));
        documents.push((Collection::Stores, document.id.clone(), serde_json::to_value(document)?));
    }

    let store_ids = store_ids(state);
    for creator in state.whitelisted_creators_by_creator.values() {
        let document = CreatorDocument::new(creator, store_ids.clone());
        documents.push((Collection::Creators, document.id.clone(), serde_json::to_value(document)?));
    }

    for metadata in state.metadata() {
        let document = MetadataDocument::new(metadata);
        documents.push((Collection::Metadata, document.id.clone(), serde_json::to_value(document)?));
    }

    for auction in state.auctions.values() {
        let document = AuctionDocument::new(auction);
        documents.push((Collection::Auctions, document.id.clone(), serde_json::to_value(document)?));
    }

    for edition in state.editions.values() {
        let document = EditionDocument::new(edition);
        documents.push((Collection::Editions, document.id.clone(), serde_json::to_value(document)?));
    }

    for edition in state.master_editions.values() {
        documents.push((
            Collection::MasterEditions,
            edition.pubkey.to_string(),
            master_edition_document(edition)?,
        ));
    }

    Ok(documents)
}
