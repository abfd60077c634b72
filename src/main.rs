use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};
use std::io;
use std::sync::Arc;

use pow_ledger::network::HttpChainFetcher;
use pow_ledger::{Config, Node, api};

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();
    let fetcher = HttpChainFetcher::new(config.peer_timeout).map_err(io::Error::other)?;
    let node = Node::new(&config, Arc::new(fetcher));

    if !config.bootstrap_peers.is_empty() {
        match node.register_peers(&config.bootstrap_peers) {
            Ok(peers) => info!("bootstrap peers: {}", peers.join(", ")),
            Err(e) => warn!("ignoring BOOTSTRAP_PEERS: {e}"),
        }
    }

    println!(
        "⛓️ Starting ledger node {} at http://{}:{} (difficulty={})",
        node.node_id(),
        config.host,
        config.port,
        config.difficulty
    );

    let state = web::Data::new(node);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
