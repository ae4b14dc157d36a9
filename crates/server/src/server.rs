use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{categories, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/import", post(transactions::import))
        .route(
            "/transactions/{id}",
            get(transactions::get).delete(transactions::delete),
        )
        .route("/categories", get(categories::list))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}
