use actix_web::{HttpResponse, Responder, get, web};

use super::models::ValidateResponse;
use crate::node::Node;

/// Get the full blockchain. Peers fetch this during consensus.
#[get("/chain/")]
pub async fn get_chain(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(node.chain())
}

/// Validate the whole local chain.
#[get("/validate/")]
pub async fn validate_chain(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(ValidateResponse {
        valid: node.is_valid(),
        length: node.chain().length,
    })
}
