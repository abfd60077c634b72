use thiserror::Error;

use super::{Block, ProofOfWork};

/// Why a candidate chain was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("chain is empty")]
    EmptyChain,
    #[error("block #{index} does not link to the hash of its predecessor")]
    BrokenLink { index: u64 },
    #[error("block #{index} carries a proof that does not solve its predecessor's puzzle")]
    InvalidProof { index: u64 },
}

/// Validate linkage and proof-of-work of every adjacent pair.
///
/// Works on untrusted chains (e.g. fetched from a peer); nothing about the
/// blocks is assumed beyond their structure.
pub fn validate_chain(chain: &[Block], pow: &ProofOfWork) -> Result<(), ValidationError> {
    if chain.is_empty() {
        return Err(ValidationError::EmptyChain);
    }

    for pair in chain.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);

        if cur.previous_hash != prev.hash() {
            return Err(ValidationError::BrokenLink { index: cur.index });
        }
        if !pow.valid_proof(prev.proof, cur.proof) {
            return Err(ValidationError::InvalidProof { index: cur.index });
        }
    }

    Ok(())
}

pub fn is_valid_chain(chain: &[Block], pow: &ProofOfWork) -> bool {
    validate_chain(chain, pow).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Blockchain;
    use crate::transaction::Transaction;

    const DIFFICULTY: u32 = 2;

    fn mined_chain(blocks: usize) -> Vec<Block> {
        let mut bc = Blockchain::new(ProofOfWork::new(DIFFICULTY));
        for i in 0..blocks {
            bc.new_transaction(Transaction::new("a", "b", i as i64));
            let proof = bc.pow().solve(bc.last_block().proof);
            bc.new_block(proof, None);
        }
        bc.chain().to_vec()
    }

    #[test]
    fn genesis_only_chain_is_valid() {
        let pow = ProofOfWork::new(DIFFICULTY);
        assert!(is_valid_chain(&[Block::genesis()], &pow));
    }

    #[test]
    fn empty_chain_is_invalid() {
        let pow = ProofOfWork::new(DIFFICULTY);
        assert_eq!(validate_chain(&[], &pow), Err(ValidationError::EmptyChain));
    }

    #[test]
    fn mined_chain_is_valid() {
        let pow = ProofOfWork::new(DIFFICULTY);
        assert_eq!(validate_chain(&mined_chain(3), &pow), Ok(()));
    }

    #[test]
    fn tampered_previous_hash_is_rejected() {
        let pow = ProofOfWork::new(DIFFICULTY);
        let mut chain = mined_chain(3);
        chain[2].previous_hash = "deadbeef".into();
        assert_eq!(
            validate_chain(&chain, &pow),
            Err(ValidationError::BrokenLink { index: 3 })
        );
    }

    #[test]
    fn tampered_transactions_break_the_next_link() {
        let pow = ProofOfWork::new(DIFFICULTY);
        let mut chain = mined_chain(3);
        chain[1].transactions[0].amount = 1_000i64.into();
        assert_eq!(
            validate_chain(&chain, &pow),
            Err(ValidationError::BrokenLink { index: 3 })
        );
    }

    #[test]
    fn unsolved_proof_is_rejected() {
        let pow = ProofOfWork::new(DIFFICULTY);
        let mut chain = mined_chain(1);
        let last_proof = chain[0].proof;
        let bad = (0..).find(|p| !pow.valid_proof(last_proof, *p)).unwrap();
        chain[1].proof = bad;
        assert_eq!(
            validate_chain(&chain, &pow),
            Err(ValidationError::InvalidProof { index: 2 })
        );
    }

    #[test]
    fn difficulty_mismatch_rejects_chain() {
        let chain = mined_chain(2);
        assert!(!is_valid_chain(&chain, &ProofOfWork::new(DIFFICULTY + 6)));
    }
}
