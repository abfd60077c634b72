use actix_web::rt::time::timeout;
use actix_web::web;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::blockchain::{Block, Blockchain, ProofOfWork, REWARD_SENDER, is_valid_chain};
use crate::config::Config;
use crate::error::NodeError;
use crate::network::{
    ChainFetcher, ChainSnapshot, ConsensusResolver, PeerRegistry, Resolution, normalize_address,
};
use crate::transaction::Transaction;

/// A ledger node: the chain, its pending pool and the known peers, shared
/// between concurrent requests.
///
/// Writers (new transaction, seal, chain replacement) take the ledger's write
/// lock; snapshots take the read lock. The proof search itself runs with no
/// lock held.
/// Chain tip a proof search starts from.
struct Head {
    pow: ProofOfWork,
    last_proof: u64,
    hash: String,
}

pub struct Node {
    node_id: String,
    mining_reward: i64,
    mine_timeout: Duration,
    ledger: RwLock<Blockchain>,
    peers: RwLock<PeerRegistry>,
    resolver: ConsensusResolver,
}

impl Node {
    pub fn new(config: &Config, fetcher: Arc<dyn ChainFetcher>) -> Self {
        Self {
            node_id: config.node_id.clone(),
            mining_reward: config.mining_reward,
            mine_timeout: config.mine_timeout,
            ledger: RwLock::new(Blockchain::new(ProofOfWork::new(config.difficulty))),
            peers: RwLock::new(PeerRegistry::new()),
            resolver: ConsensusResolver::new(fetcher),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Solve the next puzzle, pay the reward to this node and seal a block.
    ///
    /// The search is cancelled once the mining timeout elapses; in that case
    /// nothing has been written to the ledger. If another block lands while
    /// searching, the search restarts against the new head.
    pub async fn mine(&self) -> Result<Block, NodeError> {
        let cancel = Arc::new(AtomicBool::new(false));
        let started = Instant::now();

        loop {
            let head = self.head();
            let (pow, last_proof) = (head.pow, head.last_proof);

            let flag = Arc::clone(&cancel);
            let search = web::block(move || pow.solve_cancellable(last_proof, &flag));
            let remaining = self.mine_timeout.saturating_sub(started.elapsed());

            let proof = match timeout(remaining, search).await {
                Ok(Ok(Some(proof))) => proof,
                Ok(Ok(None)) | Err(_) => {
                    cancel.store(true, Ordering::Relaxed);
                    warn!(
                        "mining cancelled after {:?} (last_proof={last_proof})",
                        started.elapsed()
                    );
                    return Err(NodeError::MiningCancelled {
                        secs: self.mine_timeout.as_secs(),
                    });
                }
                Ok(Err(e)) => return Err(NodeError::Internal(e.to_string())),
            };

            match self.seal_on(head, proof) {
                Some(block) => return Ok(block),
                None => debug!("head moved while mining, searching again"),
            }
        }
    }

    fn head(&self) -> Head {
        let bc = self.ledger.read().expect("ledger lock poisoned");
        Head {
            pow: *bc.pow(),
            last_proof: bc.last_block().proof,
            hash: bc.last_block().hash(),
        }
    }

    /// Reward this node and seal a block with `proof`, unless the chain no
    /// longer ends at `head`. Reward and seal share one write-lock section.
    fn seal_on(&self, head: Head, proof: u64) -> Option<Block> {
        let mut bc = self.ledger.write().expect("ledger lock poisoned");
        if bc.last_block().hash() != head.hash {
            return None;
        }
        bc.new_transaction(Transaction::new(
            REWARD_SENDER,
            self.node_id.clone(),
            self.mining_reward,
        ));
        Some(bc.new_block(proof, Some(head.hash)).clone())
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn submit_transaction(&self, tx: Transaction) -> u64 {
        let mut bc = self.ledger.write().expect("ledger lock poisoned");
        bc.new_transaction(tx)
    }

    pub fn chain(&self) -> ChainSnapshot {
        let bc = self.ledger.read().expect("ledger lock poisoned");
        ChainSnapshot {
            chain: bc.chain().to_vec(),
            length: bc.len(),
        }
    }

    pub fn pending(&self) -> Vec<Transaction> {
        let bc = self.ledger.read().expect("ledger lock poisoned");
        bc.pending().to_vec()
    }

    pub fn last_block(&self) -> Block {
        let bc = self.ledger.read().expect("ledger lock poisoned");
        bc.last_block().clone()
    }

    pub fn is_valid(&self) -> bool {
        let bc = self.ledger.read().expect("ledger lock poisoned");
        is_valid_chain(bc.chain(), bc.pow())
    }

    /// Register peers; all addresses are checked before any is added.
    /// Returns every known peer afterwards (an empty input changes nothing).
    pub fn register_peers(&self, addresses: &[String]) -> Result<Vec<String>, NodeError> {
        for address in addresses {
            normalize_address(address)?;
        }

        let mut peers = self.peers.write().expect("peer lock poisoned");
        for address in addresses {
            let location = peers.register(address)?;
            info!("registered peer {location}");
        }
        Ok(peers.addresses())
    }

    pub fn peers(&self) -> Vec<String> {
        self.peers.read().expect("peer lock poisoned").addresses()
    }

    /// Replace the local chain with the longest valid peer chain, if one is
    /// strictly longer.
    pub async fn resolve_consensus(&self) -> Resolution {
        let peers = self.peers();
        let (local_len, pow) = {
            let bc = self.ledger.read().expect("ledger lock poisoned");
            (bc.len(), *bc.pow())
        };

        let winner = self
            .resolver
            .longest_valid_chain(&peers, local_len, &pow)
            .await;

        let mut bc = self.ledger.write().expect("ledger lock poisoned");
        let replaced = match winner {
            Some(chain) if chain.len() > bc.len() => {
                bc.replace_chain(chain);
                true
            }
            Some(_) => {
                warn!("local chain grew during resolution, keeping it");
                false
            }
            None => false,
        };

        Resolution {
            replaced,
            chain: bc.chain().to_vec(),
        }
    }
}
