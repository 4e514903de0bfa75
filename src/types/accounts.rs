use solana_sdk::{account::Account, pubkey::Pubkey};

/// A raw account as returned by `getProgramAccounts` or a change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedAccount {
    pub pubkey: Pubkey,
    pub account: Account,
}

impl KeyedAccount {
    pub fn new(pubkey: Pubkey, account: Account) -> Self {
        Self { pubkey, account }
    }

    /// Program that owns the account.
    #[must_use]
    pub fn owner(&self) -> &Pubkey {
        &self.account.owner
    }

    /// Raw account bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.account.data
    }
}

/// A decoded record together with the account it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAccount<T> {
    pub pubkey: Pubkey,
    pub owner: Pubkey,
    pub info: T,
}

impl<T> ParsedAccount<T> {
    pub fn new(pubkey: Pubkey, owner: Pubkey, info: T) -> Self {
        Self {
            pubkey,
            owner,
            info,
        }
    }

    /// Wraps `info` with the identity of `source`.
    pub fn from_keyed(source: &KeyedAccount, info: T) -> Self {
        Self::new(source.pubkey, source.account.owner, info)
    }
}
