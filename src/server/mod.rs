pub mod handlers;
mod types;

pub use types::{ActionResponse, AskRequest, ClearRequest, ErrorResponse};

use crate::{Result, config::Config, controller::Controller};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/ask", post(handlers::ask))
        .route("/clear", post(handlers::clear))
        // Video uploads easily exceed the 2 MB default.
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let controller = Controller::new(&config.llm);
    let app = router(handlers::AppState::new(controller));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
