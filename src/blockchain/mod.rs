pub mod block;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use model::Blockchain;
pub use pow::ProofOfWork;
pub use validator::{ValidationError, is_valid_chain, validate_chain};

/// Default Proof-of-Work difficulty (number of leading zero hex chars).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// A SHA-256 hex digest has 64 characters; no proof can satisfy more.
pub const MAX_DIFFICULTY: u32 = 64;

/// Reward paid to the miner of each block (dev value).
pub const MINING_REWARD: i64 = 1;

/// Sender marker used for reward transactions.
pub const REWARD_SENDER: &str = "0";

/// Placeholder proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
