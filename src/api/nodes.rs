use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::error::NodeError;
use crate::node::Node;

#[post("/nodes/register/")]
pub async fn register_nodes(
    node: web::Data<Node>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, NodeError> {
    let addresses = body.into_inner().nodes.ok_or(NodeError::NoPeersSupplied)?;
    let total_nodes = node.register_peers(&addresses)?;

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes,
    }))
}

#[get("/nodes/")]
pub async fn list_nodes(node: web::Data<Node>) -> impl Responder {
    let nodes = node.peers();
    HttpResponse::Ok().json(NodesResponse {
        count: nodes.len(),
        nodes,
    })
}

/// Run one consensus round against every known peer.
#[get("/nodes/resolve/")]
pub async fn resolve(node: web::Data<Node>) -> impl Responder {
    let outcome = node.resolve_consensus().await;
    let message = if outcome.replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    info!("consensus: {message} (length={})", outcome.chain.len());

    HttpResponse::Ok().json(ResolveResponse {
        message,
        replaced: outcome.replaced,
        chain: outcome.chain,
    })
}
