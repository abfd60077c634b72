use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY, MINING_REWARD};

/// Node settings, read from the environment (optionally via `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Opaque identity; receives the mining reward.
    pub node_id: String,
    pub difficulty: u32,
    pub mining_reward: i64,
    pub peer_timeout: Duration,
    pub mine_timeout: Duration,
    pub bootstrap_peers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            node_id: new_node_id(),
            difficulty: DEFAULT_DIFFICULTY,
            mining_reward: MINING_REWARD,
            peer_timeout: Duration::from_secs(5),
            mine_timeout: Duration::from_secs(60),
            bootstrap_peers: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port),
            node_id: env::var("NODE_ID")
                .ok()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(defaults.node_id),
            difficulty: clamp_difficulty(parse_var("POW_DIFFICULTY", defaults.difficulty)),
            mining_reward: parse_var("MINING_REWARD", defaults.mining_reward),
            peer_timeout: Duration::from_secs(parse_var(
                "PEER_TIMEOUT_SECS",
                defaults.peer_timeout.as_secs(),
            )),
            mine_timeout: Duration::from_secs(parse_var(
                "MINE_TIMEOUT_SECS",
                defaults.mine_timeout.as_secs(),
            )),
            bootstrap_peers: env::var("BOOTSTRAP_PEERS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        }
    }
}

/// Random identity without dashes.
pub fn new_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{key}={raw:?} is not valid, using {default}");
            default
        }),
        Err(_) => default,
    }
}

fn clamp_difficulty(difficulty: u32) -> u32 {
    if difficulty > MAX_DIFFICULTY {
        warn!("POW_DIFFICULTY={difficulty} can never be met, using {MAX_DIFFICULTY}");
        return MAX_DIFFICULTY;
    }
    difficulty
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_is_32_hex_chars() {
        let id = new_node_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_node_id());
    }

    #[test]
    fn defaults_match_protocol_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.difficulty, 4);
        assert_eq!(cfg.mining_reward, 1);
        assert_eq!(cfg.port, 5000);
    }

    #[test]
    fn peer_list_is_split_and_trimmed() {
        assert_eq!(
            split_list(" a:1, ,http://b:2/ ,"),
            vec!["a:1".to_string(), "http://b:2/".to_string()]
        );
    }

    #[test]
    fn difficulty_is_capped_at_digest_length() {
        assert_eq!(clamp_difficulty(4), 4);
        assert_eq!(clamp_difficulty(64), 64);
        assert_eq!(clamp_difficulty(65), 64);
        assert_eq!(clamp_difficulty(u32::MAX), 64);
    }

    #[test]
    fn unset_variable_falls_back() {
        assert_eq!(parse_var("POW_LEDGER_TEST_SURELY_UNSET", 17u32), 17);
    }
}
