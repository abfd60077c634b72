use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};

/// How many candidates are tried between two looks at the cancel flag.
const CANCEL_CHECK_INTERVAL: u64 = 1 << 12;

/// Proof-of-Work puzzle: find `proof` such that
/// `sha256("{last_proof}{proof}")` starts with `difficulty` zero hex chars.
///
/// The difficulty is a protocol parameter: nodes that reconcile with each
/// other must agree on it or they will reject each other's chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: u32,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Check a candidate proof against the previous block's proof.
    pub fn valid_proof(&self, last_proof: u64, proof: u64) -> bool {
        let guess = format!("{last_proof}{proof}");
        let digest = hex::encode(Sha256::digest(guess.as_bytes()));
        let wanted = self.difficulty as usize;
        wanted <= digest.len() && digest.bytes().take(wanted).all(|c| c == b'0')
    }

    /// Brute-force search from 0 upward. Unbounded: this is the mining cost.
    pub fn solve(&self, last_proof: u64) -> u64 {
        let never = AtomicBool::new(false);
        self.solve_cancellable(last_proof, &never)
            .expect("search without a cancel signal always finishes")
    }

    /// Same search as [`solve`](Self::solve), giving up with `None` once
    /// `cancel` is raised.
    pub fn solve_cancellable(&self, last_proof: u64, cancel: &AtomicBool) -> Option<u64> {
        let mut proof: u64 = 0;
        loop {
            if proof % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
                return None;
            }
            if self.valid_proof(last_proof, proof) {
                return Some(proof);
            }
            proof = proof.wrapping_add(1);
        }
    }
}
