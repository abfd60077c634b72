use actix_web::{HttpResponse, get, web};
use log::info;
use std::time::Instant;

use super::models::MineResponse;
use crate::error::NodeError;
use crate::node::Node;

/// Solve the next proof, reward this node and seal the pending pool.
#[get("/mine/")]
pub async fn mine(node: web::Data<Node>) -> Result<HttpResponse, NodeError> {
    let t0 = Instant::now();
    let block = node.mine().await?;

    info!(
        "MINER - forged block #{} (proof={}, txs={}) in {} ms",
        block.index,
        block.proof,
        block.transactions.len(),
        t0.elapsed().as_millis()
    );

    Ok(HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged",
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}
