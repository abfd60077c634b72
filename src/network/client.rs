use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::PeerError;
use crate::blockchain::Block;

/// Path every node serves its chain on.
pub const CHAIN_PATH: &str = "/api/v1/chain/";

/// A node's chain as served on [`CHAIN_PATH`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// Fetch the current chain of a peer given its `host:port` location.
#[async_trait]
pub trait ChainFetcher: Send + Sync {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError>;
}

/// [`ChainFetcher`] over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    client: reqwest::Client,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
        let url = format!("http://{peer}{CHAIN_PATH}");
        debug!("fetching chain from {url}");

        let transport = |source| PeerError::Transport {
            peer: peer.to_string(),
            source,
        };
        let response = self.client.get(&url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PeerError::Status {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        let snapshot: ChainSnapshot =
            serde_json::from_slice(&body).map_err(|e| PeerError::Malformed {
                peer: peer.to_string(),
                reason: e.to_string(),
            })?;

        if snapshot.length != snapshot.chain.len() {
            return Err(PeerError::LengthMismatch {
                peer: peer.to_string(),
                reported: snapshot.length,
                actual: snapshot.chain.len(),
            });
        }
        Ok(snapshot)
    }
}
