use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

mod api;
mod articles;
mod config;
mod content_negotiation;
mod error;
mod health;
mod provenance;
mod qr;
mod shacl;
mod sparql;
mod state;
mod upload;

pub use config::{ServerConfig, DEFAULT_BIND, MAX_BODY_SIZE};
pub use error::WepServerError;
pub use state::AppState;

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let app_state = AppState::new(config.store, config.uris);

    let app = create_router(app_state).layer(TraceLayer::new_for_http());
    let app = if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(axum::serve(listener, app).await?)
}

/// All routes of the API, mounted under `/api`.
pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .merge(api::create_index_routes())
        .merge(articles::create_article_routes())
        .merge(sparql::create_sparql_routes())
        .merge(provenance::create_provenance_routes())
        .merge(shacl::create_shacl_routes())
        .merge(health::create_health_routes())
        .merge(upload::create_upload_routes());

    Router::new()
        .nest("/api", api)
        .fallback(api::handle_not_found)
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
}
