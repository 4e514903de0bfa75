//! Token-vault (fractionalization) program records.

use super::{decode_prefix, split_tag, RecordKind};
use crate::utils::error::DecodeError;
use borsh::BorshDeserialize;
use solana_sdk::pubkey::Pubkey;

pub const SAFETY_DEPOSIT_BOX_V1: u8 = 1;
pub const EXTERNAL_ACCOUNT_KEY_V1: u8 = 2;
pub const VAULT_V1: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshDeserialize)]
pub enum VaultState {
    Inactive,
    Active,
    Combined,
    Deactivated,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct Vault {
    pub token_program: Pubkey,
    pub fraction_mint: Pubkey,
    pub authority: Pubkey,
    pub fraction_treasury: Pubkey,
    pub redeem_treasury: Pubkey,
    pub allow_further_share_creation: bool,
    pub pricing_lookup_address: Pubkey,
    /// Number of token types deposited so far; also the next box order.
    pub token_type_count: u8,
    pub state: VaultState,
    pub locked_price_per_share: u64,
}

/// One token type locked in a vault.
#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct SafetyDepositBox {
    pub vault: Pubkey,
    pub token_mint: Pubkey,
    pub store: Pubkey,
    pub order: u8,
}

impl SafetyDepositBox {
    /// Composite `"{vault}-{order}"` key.
    #[must_use]
    pub fn index_key(&self) -> String {
        format!("{}-{}", self.vault, self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultAccount {
    Vault(Vault),
    SafetyDepositBox(SafetyDepositBox),
}

impl VaultAccount {
    /// Decodes a vault-program account by its tag byte.
    ///
    /// # Errors
    ///
    /// External account keys are not ingested and report
    /// [`DecodeError::UnknownTag`].
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        match split_tag(data)? {
            (VAULT_V1, body) => decode_prefix(body).map(Self::Vault),
            (SAFETY_DEPOSIT_BOX_V1, body) => decode_prefix(body).map(Self::SafetyDepositBox),
            (tag, _) => Err(DecodeError::UnknownTag(tag)),
        }
    }

    #[must_use]
    pub fn try_decode(data: &[u8]) -> Option<Self> {
        Self::decode(data).ok()
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Vault(_) => RecordKind::Vault,
            Self::SafetyDepositBox(_) => RecordKind::SafetyDepositBox,
        }
    }
}

pub(super) fn classify(data: &[u8]) -> Option<RecordKind> {
    match *data.first()? {
        VAULT_V1 => Some(RecordKind::Vault),
        SAFETY_DEPOSIT_BOX_V1 => Some(RecordKind::SafetyDepositBox),
        _ => None,
    }
}
