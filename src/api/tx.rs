use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{NewTxRequest, NewTxResponse, PendingResponse};
use crate::node::Node;
use crate::transaction::Transaction;

/// Queue a transaction for the next block.
#[post("/transactions/new/")]
pub async fn new_transaction(
    node: web::Data<Node>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();
    let index = node.submit_transaction(Transaction::new(sender, recipient, amount));
    debug!("POST /transactions/new/ - queued for block #{index}");

    HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}

/// List the pending pool.
#[get("/transactions/pending/")]
pub async fn get_pending(node: web::Data<Node>) -> impl Responder {
    let transactions = node.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: transactions.len(),
        transactions,
    })
}
