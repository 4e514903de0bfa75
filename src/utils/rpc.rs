//! JSON-RPC access used by the loaders and the read adapter.

use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::RpcFilterType;
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::types::KeyedAccount;
use crate::utils::error::{MetaIndexerError, Result};

/// Account queries the ingestion layer issues against a cluster.
#[async_trait]
pub trait RpcProvider: Send + Sync {
    /// `getProgramAccounts`, optionally narrowed by size / memcmp filters.
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Option<Vec<RpcFilterType>>,
        commitment: Option<CommitmentConfig>,
    ) -> Result<Vec<KeyedAccount>>;

    /// `getMultipleAccounts`; missing accounts come back as `None` in request order.
    async fn get_multiple_accounts(
        &self,
        pubkeys: &[Pubkey],
        commitment: Option<CommitmentConfig>,
    ) -> Result<Vec<Option<Account>>>;
}

/// [`RpcProvider`] backed by the nonblocking `solana-client`.
pub struct DefaultRpcProvider {
    client: RpcClient,
}

impl DefaultRpcProvider {
    /// Creates a provider connecting to `rpc_url` with the default commitment level.
    pub fn new(rpc_url: &str) -> Self {
        Self {
            client: RpcClient::new(rpc_url.to_string()),
        }
    }

    /// Creates a provider with a specific commitment configuration.
    pub fn new_with_commitment(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
        }
    }

    /// The endpoint this provider talks to.
    #[must_use]
    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl RpcProvider for DefaultRpcProvider {
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Option<Vec<RpcFilterType>>,
        commitment: Option<CommitmentConfig>,
    ) -> Result<Vec<KeyedAccount>> {
        let config = RpcProgramAccountsConfig {
            filters,
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment,
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .client
            .get_program_accounts_with_config(program_id, config)
            .await
            .map_err(|e| MetaIndexerError::RpcClientError(Box::new(e)))?;

        Ok(accounts
            .into_iter()
            .map(|(pubkey, account)| KeyedAccount::new(pubkey, account))
            .collect())
    }

    async fn get_multiple_accounts(
        &self,
        pubkeys: &[Pubkey],
        commitment: Option<CommitmentConfig>,
    ) -> Result<Vec<Option<Account>>> {
        Ok(self
            .client
            .get_multiple_accounts_with_commitment(
                pubkeys,
                commitment.unwrap_or_else(|| self.client.commitment()),
            )
            .await
            .map_err(|e| MetaIndexerError::RpcClientError(Box::new(e)))?
            .value)
    }
}
