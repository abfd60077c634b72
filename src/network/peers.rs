use reqwest::Url;
use std::collections::HashSet;

use super::PeerError;

/// Known peers, stored as normalized `host:port` strings.
#[derive(Debug, Default, Clone)]
pub struct PeerRegistry {
    peers: HashSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer by URL or bare `host:port`. Returns the normalized location.
    /// Registering an already-known peer is a no-op.
    pub fn register(&mut self, address: &str) -> Result<String, PeerError> {
        let location = normalize_address(address)?;
        self.peers.insert(location.clone());
        Ok(location)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.peers.contains(location)
    }

    /// Snapshot of all peers, sorted for stable output.
    pub fn addresses(&self) -> Vec<String> {
        let mut out: Vec<String> = self.peers.iter().cloned().collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Reduce `http://Host:5000/path` or `host:5000` to `host:5000`.
///
/// A missing scheme is read as `http`; a missing port becomes 80 so that
/// `http://a` and `a:80` name the same peer. Peers are always fetched over
/// plain HTTP, so any other scheme (including `https`) is rejected.
pub fn normalize_address(address: &str) -> Result<String, PeerError> {
    let trimmed = address.trim();
    let invalid = |reason: &str| PeerError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    };
    if trimmed.is_empty() {
        return Err(invalid("empty address"));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;

    if url.scheme() != "http" {
        return Err(invalid("only http peers are supported"));
    }
    let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| invalid("missing port"))?;

    Ok(format!("{host}:{port}"))
}
