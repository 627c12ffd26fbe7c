mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use compdoc_core::models::SiteSettings;
use compdoc_core::Catalog;

/// Shared, read-only state behind every handler.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    site: Arc<SiteSettings>,
}

impl AppState {
    pub fn new(catalog: Catalog, site: SiteSettings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            site: Arc::new(site),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Sources
        .route("/sources", get(handlers::list_sources))
        .route("/sources/{name}", get(handlers::get_source))
        .route("/sources/{name}/fields", get(handlers::list_fields))
        .route("/sources/{name}/page", get(handlers::get_source_page))
        // Page layout for arbitrary page metadata
        .route("/layout", post(handlers::layout_page))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
