use axum::extract::State;
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::cache::CatalogCache;

// Every path and method answers 200 with the current listing.
pub fn router(cache: CatalogCache) -> Router {
    Router::new()
        .fallback(listing)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(cache)
}

async fn listing(State(cache): State<CatalogCache>) -> String {
    cache.current().to_string()
}
