use futures_util::future::join_all;
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;

use super::ChainFetcher;
use crate::blockchain::{Block, ProofOfWork, validate_chain};

/// Outcome of a consensus round.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub replaced: bool,
    pub chain: Vec<Block>,
}

/// Longest-valid-chain rule over a set of peers.
///
/// A peer chain wins only if it is strictly longer than the best seen so far
/// (starting from the local length) and passes full validation.
#[derive(Clone)]
pub struct ConsensusResolver {
    fetcher: Arc<dyn ChainFetcher>,
}

impl ConsensusResolver {
    pub fn new(fetcher: Arc<dyn ChainFetcher>) -> Self {
        Self { fetcher }
    }

    /// Poll every peer concurrently and return the winning chain, if any.
    /// Unreachable or misbehaving peers are skipped.
    pub async fn longest_valid_chain(
        &self,
        peers: &[String],
        local_len: usize,
        pow: &ProofOfWork,
    ) -> Option<Vec<Block>> {
        let fetches = peers.iter().map(|peer| async move {
            (peer, self.fetcher.fetch_chain(peer).await)
        });
        let responses = join_all(fetches).await;

        let mut max_len = local_len;
        let mut winner: Option<(&String, Vec<Block>)> = None;

        for (peer, response) in responses {
            let snapshot = match response {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("skipping peer {peer}: {e}");
                    continue;
                }
            };

            if snapshot.length <= max_len {
                debug!(
                    "peer {peer} not longer ({} <= {max_len}), ignoring",
                    snapshot.length
                );
                continue;
            }
            match validate_chain(&snapshot.chain, pow) {
                Ok(()) => {
                    max_len = snapshot.length;
                    winner = Some((peer, snapshot.chain));
                }
                Err(e) => warn!("peer {peer} chain rejected: {e}"),
            }
        }

        match winner {
            Some((peer, chain)) => {
                info!("peer {peer} holds the longest valid chain ({max_len} blocks)");
                Some(chain)
            }
            None => {
                info!("local chain is authoritative ({local_len} blocks)");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Blockchain;
    use crate::network::{ChainSnapshot, PeerError};
    use crate::transaction::Transaction;
    use async_trait::async_trait;
    use std::collections::HashMap;

    const DIFFICULTY: u32 = 2;

    #[derive(Default)]
    struct FakeFetcher {
        chains: HashMap<String, ChainSnapshot>,
    }

    impl FakeFetcher {
        fn with(mut self, peer: &str, chain: Vec<Block>) -> Self {
            let length = chain.len();
            self.chains.insert(peer.to_string(), ChainSnapshot { chain, length });
            self
        }
    }

    #[async_trait]
    impl ChainFetcher for FakeFetcher {
        async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
            self.chains.get(peer).cloned().ok_or_else(|| PeerError::Status {
                peer: peer.to_string(),
                status: 503,
            })
        }
    }

    fn pow() -> ProofOfWork {
        ProofOfWork::new(DIFFICULTY)
    }

    fn chain_of(len: usize) -> Vec<Block> {
        let mut bc = Blockchain::new(pow());
        while bc.len() < len {
            bc.new_transaction(Transaction::new("a", "b", bc.len() as i64));
            let proof = bc.pow().solve(bc.last_block().proof);
            bc.new_block(proof, None);
        }
        bc.chain().to_vec()
    }

    fn peers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[actix_web::test]
    async fn no_peers_means_no_winner() {
        let resolver = ConsensusResolver::new(Arc::new(FakeFetcher::default()));
        assert!(resolver.longest_valid_chain(&[], 3, &pow()).await.is_none());
    }

    #[actix_web::test]
    async fn longer_valid_chain_wins() {
        let long = chain_of(5);
        let fetcher = FakeFetcher::default().with("a:1", long.clone());
        let resolver = ConsensusResolver::new(Arc::new(fetcher));

        let winner = resolver.longest_valid_chain(&peers(&["a:1"]), 3, &pow()).await;
        assert_eq!(winner, Some(long));
    }

    #[actix_web::test]
    async fn longer_invalid_chain_loses() {
        let mut forged = chain_of(5);
        forged[3].previous_hash = "forged".into();
        let fetcher = FakeFetcher::default().with("a:1", forged);
        let resolver = ConsensusResolver::new(Arc::new(fetcher));

        assert!(
            resolver
                .longest_valid_chain(&peers(&["a:1"]), 3, &pow())
                .await
                .is_none()
        );
    }

    #[actix_web::test]
    async fn equal_length_never_wins() {
        let fetcher = FakeFetcher::default().with("a:1", chain_of(3));
        let resolver = ConsensusResolver::new(Arc::new(fetcher));
        assert!(
            resolver
                .longest_valid_chain(&peers(&["a:1"]), 3, &pow())
                .await
                .is_none()
        );
    }

    #[actix_web::test]
    async fn longest_of_several_peers_wins_and_failures_are_skipped() {
        let four = chain_of(4);
        let six = chain_of(6);
        let fetcher = FakeFetcher::default()
            .with("four:1", four)
            .with("six:1", six.clone());
        let resolver = ConsensusResolver::new(Arc::new(fetcher));

        let winner = resolver
            .longest_valid_chain(&peers(&["four:1", "down:1", "six:1"]), 2, &pow())
            .await;
        assert_eq!(winner, Some(six));
    }
}
