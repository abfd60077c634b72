pub mod client;
pub mod consensus;
pub mod peers;

pub use client::{ChainFetcher, ChainSnapshot, HttpChainFetcher};
pub use consensus::{ConsensusResolver, Resolution};
pub use peers::{PeerRegistry, normalize_address};

use thiserror::Error;

/// Failures talking to, or understanding, a peer.
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("invalid peer address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("peer {peer} unreachable: {source}")]
    Transport {
        peer: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("peer {peer} answered with status {status}")]
    Status { peer: String, status: u16 },
    #[error("peer {peer} sent a malformed chain: {reason}")]
    Malformed { peer: String, reason: String },
    #[error("peer {peer} reported length {reported} but sent {actual} blocks")]
    LengthMismatch {
        peer: String,
        reported: usize,
        actual: usize,
    },
}
