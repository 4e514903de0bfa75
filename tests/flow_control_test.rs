use async_trait::async_trait;
use metaplex_meta_indexer::utils::rpc::RpcProvider;
use metaplex_meta_indexer::{
    flow_control_chain, KeyedAccount, MetaConnection, MetaIndexerConfigBuilder, MetaIndexerError,
    Result, RetryConfig,
};
use solana_client::rpc_filter::RpcFilterType;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records a global sequence number for every RPC call it serves.
struct ProbeRpc {
    name: &'static str,
    clock: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<(&'static str, usize)>>>,
    fail: bool,
}

#[async_trait]
impl RpcProvider for ProbeRpc {
    async fn get_program_accounts(
        &self,
        _program_id: &Pubkey,
        _filters: Option<Vec<RpcFilterType>>,
        _commitment: Option<CommitmentConfig>,
    ) -> Result<Vec<KeyedAccount>> {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push((self.name, tick));
        tokio::time::sleep(Duration::from_millis(5)).await;
        if self.fail {
            return Err(MetaIndexerError::ConfigError("not retried".to_string()));
        }
        Ok(Vec::new())
    }

    async fn get_multiple_accounts(
        &self,
        pubkeys: &[Pubkey],
        _commitment: Option<CommitmentConfig>,
    ) -> Result<Vec<Option<Account>>> {
        Ok(vec![None; pubkeys.len()])
    }
}

fn ticks(calls: &[(&'static str, usize)], name: &str) -> Vec<usize> {
    calls.iter().filter(|(n, _)| *n == name).map(|(_, t)| *t).collect()
}

#[tokio::test]
async fn test_endpoints_load_strictly_in_order() {
    let config = MetaIndexerConfigBuilder::new()
        .with_rpc("zero", "http://127.0.0.1:1")
        .with_rpc("one", "http://127.0.0.1:2")
        .with_rpc("two", "http://127.0.0.1:3")
        .with_store(Pubkey::new_unique().to_string())
        .build()
        .unwrap();

    let clock = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(Mutex::new(Vec::new()));
    let names = ["zero", "one", "two"];
    let connections: Vec<Arc<MetaConnection>> = config
        .endpoints
        .iter()
        .zip(names)
        .map(|(endpoint, name)| {
            let rpc = Arc::new(ProbeRpc {
                name,
                clock: clock.clone(),
                calls: calls.clone(),
                fail: false,
            });
            Arc::new(MetaConnection::with_rpc(endpoint.clone(), &config, rpc))
        })
        .collect();

    // Spawned last-first so scheduling order cannot explain the result.
    let mut handles = Vec::new();
    for (connection, mut token) in connections.iter().cloned().zip(flow_control_chain(3)).rev() {
        handles.push(tokio::spawn(async move {
            connection.load_in_turn(&mut token).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let calls = calls.lock().unwrap().clone();
    let (zero, one, two) = (ticks(&calls, "zero"), ticks(&calls, "one"), ticks(&calls, "two"));
    assert!(!zero.is_empty() && !one.is_empty() && !two.is_empty());
    assert!(zero.iter().max() < one.iter().min());
    assert!(one.iter().max() < two.iter().min());
    assert!(connections.iter().all(|c| c.is_loaded()));
}

#[tokio::test]
async fn test_failed_endpoint_does_not_block_the_next() {
    let config = MetaIndexerConfigBuilder::new()
        .with_rpc("broken", "http://127.0.0.1:1")
        .with_rpc("healthy", "http://127.0.0.1:2")
        .with_store(Pubkey::new_unique().to_string())
        .with_load_retry(RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        })
        .build()
        .unwrap();

    let clock = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(Mutex::new(Vec::new()));
    let broken = MetaConnection::with_rpc(
        config.endpoints[0].clone(),
        &config,
        Arc::new(ProbeRpc {
            name: "broken",
            clock: clock.clone(),
            calls: calls.clone(),
            fail: true,
        }),
    );
    let healthy = MetaConnection::with_rpc(
        config.endpoints[1].clone(),
        &config,
        Arc::new(ProbeRpc {
            name: "healthy",
            clock,
            calls,
            fail: false,
        }),
    );

    let mut tokens = flow_control_chain(2).into_iter();
    let (mut first, mut second) = (tokens.next().unwrap(), tokens.next().unwrap());

    assert!(broken.load_in_turn(&mut first).await.is_err());
    tokio::time::timeout(Duration::from_secs(5), healthy.load_in_turn(&mut second))
        .await
        .expect("the next endpoint must not wait on a failed one")
        .unwrap();
    assert!(!broken.is_loaded());
    assert!(healthy.is_loaded());
}
