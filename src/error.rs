use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::api::models::ErrorResponse;
use crate::network::PeerError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("mining cancelled after {secs}s without finding a proof")]
    MiningCancelled { secs: u64 },
    #[error(transparent)]
    Peer(#[from] PeerError),
    #[error("please supply a valid list of nodes")]
    NoPeersSupplied,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for NodeError {
    fn status_code(&self) -> StatusCode {
        match self {
            NodeError::MiningCancelled { .. } => StatusCode::SERVICE_UNAVAILABLE,
            NodeError::Peer(PeerError::InvalidAddress { .. }) | NodeError::NoPeersSupplied => {
                StatusCode::BAD_REQUEST
            }
            NodeError::Peer(_) => StatusCode::BAD_GATEWAY,
            NodeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let bad_addr = NodeError::from(PeerError::InvalidAddress {
            address: "x".into(),
            reason: "nope".into(),
        });
        assert_eq!(bad_addr.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(NodeError::NoPeersSupplied.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn cancelled_mining_is_unavailable() {
        let err = NodeError::MiningCancelled { secs: 3 };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.to_string().contains("3s"));
    }
}
