//! Minimal proof-of-work ledger: hash-linked blocks, a brute-force puzzle and
//! longest-valid-chain reconciliation between peers, served over actix-web.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod transaction;

pub use config::Config;
pub use error::NodeError;
pub use node::Node;
