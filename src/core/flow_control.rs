//! Sequential startup gate for several endpoints.
//!
//! Each endpoint gets a [`FlowToken`]. Token *i* may start its bulk load only
//! after token *i - 1* has signalled completion, so at most one full load
//! hits the RPC fleet at a time.

use tokio::sync::oneshot;

/// One link in a startup chain.
#[derive(Debug)]
pub struct FlowToken {
    index: usize,
    ready: Option<oneshot::Receiver<()>>,
    done: Option<oneshot::Sender<()>>,
}

/// Builds a chain of `n` tokens. The first is ready immediately.
#[must_use]
pub fn flow_control_chain(n: usize) -> Vec<FlowToken> {
    let mut tokens = Vec::with_capacity(n);
    let mut previous: Option<oneshot::Receiver<()>> = None;

    for index in 0..n {
        let (done, next_ready) = if index + 1 < n {
            let (tx, rx) = oneshot::channel();
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };
        tokens.push(FlowToken {
            index,
            ready: previous.take(),
            done,
        });
        previous = next_ready;
    }

    tokens
}

impl FlowToken {
    /// A standalone token that never waits, for single-endpoint setups.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            index: 0,
            ready: None,
            done: None,
        }
    }

    /// Position of this token in its chain.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Waits until the previous token has signalled.
    ///
    /// If the previous holder was dropped without signalling (its load
    /// failed and was abandoned) the wait ends anyway.
    pub async fn wait(&mut self) {
        let Some(ready) = self.ready.take() else {
            return;
        };
        if ready.await.is_err() {
            tracing::warn!(
                token = self.index,
                "Previous startup token dropped without signalling; proceeding"
            );
        }
    }

    /// Releases the next token. Calling it more than once is a no-op.
    pub fn signal_done(&mut self) {
        if let Some(done) = self.done.take() {
            // The next holder may already be gone; nothing to release then.
            let _ = done.send(());
        }
    }
}
